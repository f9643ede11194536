use thiserror::Error;

pub type Result<T> = std::result::Result<T, LlamaError>;

#[derive(Debug, Error)]
pub enum LlamaError {
    /// Unknown API section, bad header, or HTTP client construction failure.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A user supplied identifier is not present in the reference listing.
    #[error("Invalid {category}: {input}. Available: {available}")]
    Resolution {
        category: &'static str,
        input: String,
        available: String,
    },

    /// Non-2xx status after the retry budget was spent.
    #[error("upstream returned status {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid data: {body}")]
    Decode { body: String },

    #[error("unexpected {context} payload: {source}")]
    Payload {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {reason}")]
    Resource { path: String, reason: String },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),
}

impl LlamaError {
    pub fn status(&self) -> Option<u16> {
        match self {
            LlamaError::Transport { status, .. } => Some(*status),
            LlamaError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_resolution(&self) -> bool {
        matches!(self, LlamaError::Resolution { .. })
    }
}
