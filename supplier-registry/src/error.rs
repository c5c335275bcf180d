//! Registry error type

use crate::validation::FieldError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Supplier not found: {0}")]
    SupplierNotFound(Uuid),

    #[error("Invalid supplier form: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("{name} exceeds the {limit} size limit.")]
    FileTooLarge { name: String, limit: String },

    #[error("You can only upload up to {max} files at a time (got {count}).")]
    TooManyFiles { count: usize, max: usize },

    #[error(transparent)]
    Core(#[from] esg_core::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, RegistryError>;
