use thiserror::Error;

/// Why a contact submission did not go out
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid contact payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("could not encode outgoing email: {0}")]
    Encode(serde_json::Error),

    #[error("email provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("email provider unreachable: {0}")]
    Transport(String),
}

impl RelayError {
    /// HTTP status reported back to the form
    pub fn status(&self) -> u16 {
        match self {
            RelayError::Payload(_) => 400,
            RelayError::Encode(_) | RelayError::Rejected { .. } | RelayError::Transport(_) => 500,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("{0} lists no recipients")]
    NoRecipients(&'static str),
}
