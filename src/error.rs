use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("API token not configured. Set the DIRLOOK_TOKEN environment variable or add directory.token to ~/.dirlook/config.yaml.")]
    NoToken,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    ApiError {
        code: String,
        message: String,
        hint: Option<String>,
    },

    #[error("Unable to reach the directory API: {0}")]
    Unreachable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Supply one of --user, --device or --group.")]
    NoMode,

    #[error("Parameter overlap: supply either a user, device or group.")]
    AmbiguousMode,

    #[error("`{0}` does not have a provider registered.")]
    NoProvider(String),

    #[error("A provider is already registered for `{0}`.")]
    DuplicateProvider(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit,

    #[error("{0}")]
    Other(String),
}

impl LookupError {
    /// Create an API error with an optional hint
    pub fn api_error(
        code: impl Into<String>,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self::ApiError {
            code: code.into(),
            message: message.into(),
            hint,
        }
    }

    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NoToken => Some(
                "Request an API token from your ITS administrator, then export DIRLOOK_TOKEN."
                    .to_string(),
            ),
            Self::ApiError { hint, .. } => hint.clone(),
            Self::Network(_) => Some("Check your internet connection and try again.".to_string()),
            Self::Unreachable(_) => {
                Some("Please ensure you are connected to the campus network or VPN.".to_string())
            }
            Self::RateLimit => {
                Some("You've made too many requests. Please wait a moment.".to_string())
            }
            _ => None,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::ServerError(_) | Self::RateLimit
        )
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
