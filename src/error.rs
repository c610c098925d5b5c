use thiserror::Error;

/// Body returned with "Error 1" responses, documented for every endpoint.
pub(crate) const INVALID_APP_ID_BODY: &str = "Error 1: Invalid appid";
/// Body returned with "Error 2" responses, documented for every endpoint.
pub(crate) const MISSING_APP_ID_BODY: &str = "Error 2: Appid missing";

#[derive(Debug, Error)]
pub enum WolframError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid app id")]
    InvalidAppId,

    #[error("App id missing")]
    MissingAppId,

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl WolframError {
    /// Classify a non-success HTTP response by its body.
    ///
    /// The service reports app-id problems as a plain-text body matching one
    /// of two documented literals; anything else is kept verbatim so callers
    /// can inspect it.
    pub fn from_error_body(status: u16, body: String) -> Self {
        match body.as_str() {
            INVALID_APP_ID_BODY => Self::InvalidAppId,
            MISSING_APP_ID_BODY => Self::MissingAppId,
            _ => Self::Api { status, body },
        }
    }

    /// Get a user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::InvalidAppId => Some(
                "Double-check that your AppID is typed correctly and that the appid \
                 parameter is using the correct syntax."
                    .to_string(),
            ),
            Self::MissingAppId => Some(
                "The request did not contain any option for the appid parameter. \
                 Obtain an AppID at https://developer.wolframalpha.com and pass it with every call."
                    .to_string(),
            ),
            Self::Network(_) => Some("Check your internet connection and try again.".to_string()),
            Self::Api { status, .. } if *status == 501 => Some(
                "The input could not be interpreted by this API. Check the query for typos \
                 or use the Full Results API for richer disambiguation."
                    .to_string(),
            ),
            _ => None,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500 && *status != 501,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, WolframError>;
