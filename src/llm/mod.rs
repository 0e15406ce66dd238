pub mod bridge;
pub mod error;
pub mod gemini;

use std::env;

use crate::cli::Args;
use self::error::BridgeError;
use self::gemini::UsageMetadata;

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

#[derive(Debug, Clone, Default)]
pub struct BridgeConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl BridgeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: None,
        }
    }

    /// Reads `GOOGLE_API_KEY` and `GEMINI_BASE_URL` from the process
    /// environment. Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty(env::var(API_KEY_ENV).ok()),
            base_url: non_empty(env::var(BASE_URL_ENV).ok()),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self {
            api_key: non_empty(args.api_key.clone()),
            base_url: non_empty(args.base_url.clone()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Outcome of one bridge call. Failures carry the normalized error and,
/// when the provider reported it, usage metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    Success {
        text: String,
        usage: Option<UsageMetadata>,
    },
    Failure {
        error: BridgeError,
        usage: Option<UsageMetadata>,
    },
}

impl CallResult {
    pub fn failure(error: BridgeError) -> Self {
        CallResult::Failure { error, usage: None }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            CallResult::Success { text, .. } => Some(text),
            CallResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&BridgeError> {
        match self {
            CallResult::Success { .. } => None,
            CallResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn error_text(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }

    pub fn usage(&self) -> Option<&UsageMetadata> {
        match self {
            CallResult::Success { usage, .. } | CallResult::Failure { usage, .. } => usage.as_ref(),
        }
    }

    /// Text on success, error text on failure.
    pub fn into_text(self) -> String {
        match self {
            CallResult::Success { text, .. } => text,
            CallResult::Failure { error, .. } => error.to_string(),
        }
    }
}
