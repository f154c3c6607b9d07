use std::fmt;

use crate::error::AppError;

/// One field that failed coercion, with the parser's own message
#[derive(Debug)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Structured validation failure enumerating every invalid field.
///
/// Coercion does not stop at the first bad field; the client sees all of them
/// in one response.
#[derive(Debug)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field.field, field.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("model not loaded")]
    ModelUnavailable,

    #[error("{0}")]
    Engine(String),

    #[error("synthesis task failed: {0}")]
    Task(String),
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::ModelUnavailable => AppError::ModelUnavailable,
            SynthesisError::Engine(msg) => AppError::Generation(msg),
            SynthesisError::Task(msg) => AppError::Generation(msg),
        }
    }
}
