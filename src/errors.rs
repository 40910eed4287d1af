use thiserror::Error;

pub type ParleyResult<T> = Result<T, ParleyError>;

/// Everything that can go wrong while talking to the chat backend or
/// bootstrapping the client.
#[derive(Debug, Error)]
pub enum ParleyError {
    #[error("server returned {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("config error: {0}")]
    Config(String),
}

impl ParleyError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
