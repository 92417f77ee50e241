use std::fmt;

#[derive(Debug)]
pub enum ArmError {
    Http(reqwest::Error),
    /// The arm answered with a non-success status.
    Status { status: u16, body: String },
    Url(String),
}

impl fmt::Display for ArmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmError::Http(err) => write!(f, "http error: {err}"),
            ArmError::Status { status, body } => write!(f, "arm returned {status}: {body}"),
            ArmError::Url(msg) => write!(f, "invalid arm url: {msg}"),
        }
    }
}

impl std::error::Error for ArmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArmError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ArmError {
    fn from(err: reqwest::Error) -> Self {
        ArmError::Http(err)
    }
}
