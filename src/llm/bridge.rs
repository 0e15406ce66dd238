use log::{ error, info, warn };
use std::sync::Arc;

use super::error::BridgeError;
use super::gemini::{
    GeminiContent,
    GeminiHttpTransport,
    GeminiTransport,
    GenerateContentRequest,
    GenerateContentResponse,
    GenerationConfig,
};
use super::{ BridgeConfig, CallResult, API_KEY_ENV };
use crate::models::chat::ChatMessage;

const UNKNOWN_REASON: &str = "UNKNOWN";

#[derive(Clone)]
enum BridgeState {
    Configured(Arc<dyn GeminiTransport>),
    Disabled,
}

/// Translates OpenAI-style transcripts into Gemini `generateContent` calls
/// and folds every outcome into a `CallResult`.
///
/// Whether the bridge is usable is decided once, at construction. A
/// disabled bridge answers every call with `BridgeError::NotConfigured`
/// and never touches the network.
#[derive(Clone)]
pub struct MessageBridge {
    state: BridgeState,
}

impl MessageBridge {
    pub fn initialize(config: &BridgeConfig) -> Self {
        let api_key = match config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            Some(key) => key.to_string(),
            None => {
                error!("{} environment variable not found; LLM calls are disabled.", API_KEY_ENV);
                return Self::disabled();
            }
        };

        match GeminiHttpTransport::new(api_key, config.base_url.clone()) {
            Ok(transport) => {
                info!("Google API Key configured successfully (endpoint: {}).", transport.base_url());
                Self::with_transport(Arc::new(transport))
            }
            Err(e) => {
                error!("Failed to configure Google API Key during initial setup: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn from_env() -> Self {
        Self::initialize(&BridgeConfig::from_env())
    }

    pub fn with_transport(transport: Arc<dyn GeminiTransport>) -> Self {
        Self {
            state: BridgeState::Configured(transport),
        }
    }

    pub fn disabled() -> Self {
        Self { state: BridgeState::Disabled }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.state, BridgeState::Configured(_))
    }

    pub async fn invoke(
        &self,
        model: &str,
        transcript: &[ChatMessage],
        temperature: f32
    ) -> CallResult {
        info!("Attempting to call model: {} with temperature: {}", model, temperature);

        let transport = match &self.state {
            BridgeState::Configured(transport) => transport,
            BridgeState::Disabled => {
                error!("Cannot call LLM, Google API Key was not configured successfully.");
                return CallResult::failure(BridgeError::NotConfigured);
            }
        };

        let contents = to_provider_contents(transcript);
        if contents.is_empty() {
            error!("No valid messages found after format conversion.");
            return CallResult::failure(BridgeError::NoValidMessages);
        }

        let request = GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: clamp_temperature(temperature),
            },
        };
        info!(
            "Sending converted contents format: {}",
            serde_json::to_string(&request).unwrap_or_else(|_| format!("{:?}", request))
        );

        match transport.generate_content(model, &request).await {
            Ok(response) => extract_result(response),
            Err(e) => {
                let err = BridgeError::from(e);
                match &err {
                    BridgeError::PermissionDenied(msg) => {
                        error!("Gemini API Permission Denied (Check API Key/Project Billing?): {}", msg);
                    }
                    BridgeError::QuotaExceeded(msg) => {
                        error!("Gemini API Quota Exceeded: {}", msg);
                    }
                    BridgeError::NotFound(msg) => {
                        error!(
                            "Gemini API resource not found (Check model name '{}' or endpoint): {}",
                            model,
                            msg
                        );
                    }
                    BridgeError::InvalidArgument(msg) => {
                        error!("Invalid argument sent to Gemini API (Check messages format?): {}", msg);
                        log_call_context(transcript, &request);
                    }
                    other => {
                        error!("Unexpected error during Gemini API call: {}", other);
                        log_call_context(transcript, &request);
                    }
                }
                CallResult::failure(err)
            }
        }
    }
}

/// Clamps into `[0.0, 1.0]`. NaN falls back to the default of 0.0.
pub fn clamp_temperature(temperature: f32) -> f32 {
    if temperature.is_nan() {
        return 0.0;
    }
    temperature.clamp(0.0, 1.0)
}

pub fn to_provider_contents(transcript: &[ChatMessage]) -> Vec<GeminiContent> {
    transcript
        .iter()
        .filter_map(|msg| {
            let content = msg.to_provider_content();
            if content.is_none() {
                warn!("Skipping message with invalid format: {:?}", msg);
            }
            content
        })
        .collect()
}

fn extract_result(response: GenerateContentResponse) -> CallResult {
    let usage = response.usage_metadata;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let feedback = response.prompt_feedback.unwrap_or_default();
        let block_reason = feedback.block_reason.unwrap_or_else(|| UNKNOWN_REASON.to_string());
        error!(
            "LLM call failed. Prompt Feedback Block Reason: {}, Safety Ratings: {:?}",
            block_reason,
            feedback.safety_ratings
        );
        return CallResult::Failure {
            error: BridgeError::PromptBlocked(block_reason),
            usage,
        };
    };

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    if parts.is_empty() {
        let finish_reason = candidate.finish_reason.unwrap_or_else(|| UNKNOWN_REASON.to_string());
        warn!(
            "LLM call finished but no content parts found. Finish Reason: {}, Safety Ratings: {:?}",
            finish_reason,
            candidate.safety_ratings
        );
        return CallResult::Failure {
            error: BridgeError::FinishedWithoutContent(finish_reason),
            usage,
        };
    }

    let text: String = parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    info!("LLM call successful.");
    CallResult::Success { text, usage }
}

fn log_call_context(transcript: &[ChatMessage], request: &GenerateContentRequest) {
    error!("Original messages at time of error: {:?}", transcript);
    error!("Converted contents at time of error: {:?}", request.contents);
}
