use thiserror::Error;

/// Result alias used across the form values crate.
pub type FormValuesResult<T> = Result<T, FormValuesError>;

/// Errors produced while resolving field names against a control set.
#[derive(Debug, Error)]
pub enum FormValuesError {
    /// The referenced control does not exist or cannot be addressed by name.
    #[error("invalid control reference: {reason}")]
    InvalidControlReference { reason: String },

    /// A write or probe target path has no matching control (strict mode only).
    #[error("undefined field: {field}")]
    MissingField { field: String },

    /// A control name with two adjacent unknown positions and no explicit fieldname.
    #[error("complex field '{name}' requires an explicit fieldname")]
    AmbiguousFieldName { name: String },

    /// An empty or otherwise unusable dotted path was supplied.
    #[error("invalid field path '{path}'")]
    InvalidFieldPath { path: String },

    /// A JSON document could not be decoded.
    #[error("failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML document could not be decoded.
    #[error("failed to decode YAML: {0}")]
    Yaml(#[from] serde_yml::Error),
}
