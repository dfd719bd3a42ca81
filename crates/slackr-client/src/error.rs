use thiserror::Error;

/// Error string the backend returns when a non-member opens a channel.
pub const NOT_A_MEMBER: &str = "Authorised user is not a member of this channel";

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rejected before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// HTTP 400 with the backend's message.
    #[error("{0}")]
    Input(String),

    /// HTTP 403 with the backend's message.
    #[error("{0}")]
    Access(String),

    /// Network failure, timeout, or a status the backend contract does not define.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected payload: {0}")]
    Payload(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("not signed in")]
    NotSignedIn,

    #[error("no channel is open")]
    NoChannel,
}

impl ClientError {
    pub fn is_not_member(&self) -> bool {
        matches!(self, Self::Input(msg) | Self::Access(msg) if msg == NOT_A_MEMBER)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Payload(e.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
