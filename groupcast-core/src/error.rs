use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupcastError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(String),

    #[error("No groups selected")]
    EmptySelection,

    #[error("No content to broadcast")]
    NoContent,

    #[error("Invalid group index: {0}")]
    InvalidGroupIndex(usize),

    #[error("Invalid callback data: {0}")]
    InvalidCallback(String),
}

pub type Result<T> = std::result::Result<T, GroupcastError>;
