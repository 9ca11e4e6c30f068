use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetainerError {
    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("Record index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, MetainerError>;
