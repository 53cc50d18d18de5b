use std::{error::Error, fmt, io};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, NetError>;

/// Failures surfaced by model creation, evaluation, training and persistence.
#[derive(Debug)]
pub enum NetError {
    /// Topology arguments or vector lengths do not match what the model declares.
    Shape(String),
    /// A serialized stream is truncated or structurally inconsistent.
    Format(String),
    /// The underlying file or stream could not be read or written.
    Io(io::Error),
    /// A JSON configuration file could not be parsed.
    Config(String),
}

impl NetError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        NetError::Shape(msg.into())
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        NetError::Format(msg.into())
    }
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Shape(msg) => write!(f, "shape error: {msg}"),
            NetError::Format(msg) => write!(f, "format error: {msg}"),
            NetError::Io(e) => write!(f, "io error: {e}"),
            NetError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl Error for NetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NetError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NetError {
    fn from(value: io::Error) -> Self {
        NetError::Io(value)
    }
}

impl From<serde_json::Error> for NetError {
    fn from(value: serde_json::Error) -> Self {
        if value.is_io() {
            NetError::Io(value.into())
        } else {
            NetError::Config(value.to_string())
        }
    }
}
