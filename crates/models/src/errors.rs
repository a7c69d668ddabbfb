use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
}

pub(crate) fn invalid(msg: impl Into<String>) -> ModelError {
    ModelError::Validation(msg.into())
}
