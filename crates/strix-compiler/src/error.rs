//! Compilation errors

use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid lowering options: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to serialize lowering options: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("IR validation failed:\n  {}", .errors.join("\n  "))]
    Validation { errors: Vec<String> },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}
