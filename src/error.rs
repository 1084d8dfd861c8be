use thiserror::Error;

#[derive(Debug, Error)]
pub enum NovaBotError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("database error: {0}")]
    Database(String),
    #[error("{0}")]
    Validation(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl NovaBotError {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub use crate::Result;
