use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelloError {
    #[error("drone not connected")]
    NotConnected,

    #[error("command task did not complete - {msg}")]
    CommandAborted { msg: String },

    #[error("failed to parse drone response - {msg}")]
    ParseError { msg: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, TelloError>;
