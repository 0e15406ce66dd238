use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Broad failure categories, used by callers that branch on the kind of
/// failure rather than its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Authorization,
    Quota,
    NotFound,
    MalformedRequest,
    ContentBlocked,
    Unknown,
}

/// Every failure the bridge can report. The `Display` text is the error
/// string handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("Error: Library not configured")]
    NotConfigured,

    #[error("Error: no valid messages to send")]
    NoValidMessages,

    #[error("Error: Permission Denied - {0}")]
    PermissionDenied(String),

    #[error("Error: Quota Exceeded - {0}")]
    QuotaExceeded(String),

    #[error("Error: Not Found - {0}")]
    NotFound(String),

    #[error("Error: Invalid Argument - {0}")]
    InvalidArgument(String),

    #[error("Error: Generation finished without content. Reason: {0}")]
    FinishedWithoutContent(String),

    #[error("Error: LLM call failed. Prompt Block Reason: {0}")]
    PromptBlocked(String),

    #[error("Error calling LLM: {category} - {message}")]
    Unknown {
        category: String,
        message: String,
    },
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::NotConfigured => ErrorKind::Configuration,
            BridgeError::NoValidMessages => ErrorKind::Validation,
            BridgeError::PermissionDenied(_) => ErrorKind::Authorization,
            BridgeError::QuotaExceeded(_) => ErrorKind::Quota,
            BridgeError::NotFound(_) => ErrorKind::NotFound,
            BridgeError::InvalidArgument(_) => ErrorKind::MalformedRequest,
            BridgeError::FinishedWithoutContent(_) | BridgeError::PromptBlocked(_) => {
                ErrorKind::ContentBlocked
            }
            BridgeError::Unknown { .. } => ErrorKind::Unknown,
        }
    }
}

impl From<TransportError> for BridgeError {
    fn from(err: TransportError) -> Self {
        match err.category {
            TransportErrorCategory::PermissionDenied => BridgeError::PermissionDenied(err.message),
            TransportErrorCategory::ResourceExhausted => BridgeError::QuotaExceeded(err.message),
            TransportErrorCategory::NotFound => BridgeError::NotFound(err.message),
            TransportErrorCategory::InvalidArgument => BridgeError::InvalidArgument(err.message),
            TransportErrorCategory::Other(category) => BridgeError::Unknown {
                category,
                message: err.message,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportErrorCategory {
    PermissionDenied,
    ResourceExhausted,
    NotFound,
    InvalidArgument,
    Other(String),
}

impl TransportErrorCategory {
    /// Google's canonical status string wins; the HTTP code is the fallback.
    pub fn classify(status: Option<&str>, http_code: u16) -> Self {
        match status {
            Some("PERMISSION_DENIED") | Some("UNAUTHENTICATED") => {
                return TransportErrorCategory::PermissionDenied;
            }
            Some("RESOURCE_EXHAUSTED") => return TransportErrorCategory::ResourceExhausted,
            Some("NOT_FOUND") => return TransportErrorCategory::NotFound,
            Some("INVALID_ARGUMENT") | Some("FAILED_PRECONDITION") => {
                return TransportErrorCategory::InvalidArgument;
            }
            _ => {}
        }
        match http_code {
            401 | 403 => TransportErrorCategory::PermissionDenied,
            429 => TransportErrorCategory::ResourceExhausted,
            404 => TransportErrorCategory::NotFound,
            400 => TransportErrorCategory::InvalidArgument,
            _ => {
                let name = status
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP {}", http_code));
                TransportErrorCategory::Other(name)
            }
        }
    }
}

impl fmt::Display for TransportErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorCategory::PermissionDenied => write!(f, "PermissionDenied"),
            TransportErrorCategory::ResourceExhausted => write!(f, "ResourceExhausted"),
            TransportErrorCategory::NotFound => write!(f, "NotFound"),
            TransportErrorCategory::InvalidArgument => write!(f, "InvalidArgument"),
            TransportErrorCategory::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Failure raised by a `GeminiTransport` before any response body could be
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{category}: {message}")]
pub struct TransportError {
    pub category: TransportErrorCategory,
    pub message: String,
}

#[derive(Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

impl TransportError {
    pub fn new(category: TransportErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// Builds an error from a non-2xx response, reading Google's
    /// `{"error": {code, message, status}}` envelope when present.
    pub fn from_response(http_code: u16, body: &str) -> Self {
        match serde_json::from_str::<GoogleErrorEnvelope>(body) {
            Ok(envelope) => {
                let code = envelope.error.code.unwrap_or(http_code);
                let status = envelope.error.status.as_deref();
                let message = envelope.error.message.as_deref().unwrap_or("").trim();
                Self::new(
                    TransportErrorCategory::classify(status, code),
                    format!("{} {}", code, message).trim_end().to_string(),
                )
            }
            Err(_) => {
                let body = body.trim();
                let message = if body.is_empty() {
                    http_code.to_string()
                } else {
                    format!("{} {}", http_code, body)
                };
                Self::new(TransportErrorCategory::classify(None, http_code), message)
            }
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let category = if err.is_decode() {
            "decode"
        } else if err.is_timeout() {
            "timeout"
        } else {
            "transport"
        };
        Self::new(TransportErrorCategory::Other(category.to_string()), err.to_string())
    }
}
