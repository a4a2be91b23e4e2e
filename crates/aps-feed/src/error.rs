use std::fmt;

/// Errors a feed transport may return.
#[derive(Debug)]
pub enum FeedError {
    /// Network or transport failure.
    Transport(String),
    /// The server answered with a non-success HTTP status.
    Status { code: u16, message: String },
    /// A response payload could not be decoded.
    Decode(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Transport(msg) => write!(f, "transport error: {msg}"),
            FeedError::Status { code, message } => {
                write!(f, "server error status={code}: {message}")
            }
            FeedError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Transport(err.to_string())
    }
}
