//! Error types for service code generation

use thiserror::Error;

/// Result type alias for code generation
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Error type for code generation
///
/// Every variant aborts generation of the whole invocation; there is no
/// partial output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// A type lives outside the current crate and no crate mapping names it
    #[error("unmapped dependency: `{file}` (defining `{type_name}`) is not in the crate mapping")]
    UnmappedDependency { file: String, type_name: String },

    /// The crate mapping file is structurally invalid
    #[error("malformed crate mapping file: {0}")]
    MalformedMappingFile(String),

    /// A file could not be opened or fully read
    #[error("failed to read {path}: {reason}")]
    FileReadFailure { path: String, reason: String },

    /// The generator parameter string could not be parsed
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A template refers to a placeholder that has no binding
    #[error("template references undefined variable `{0}`")]
    UndefinedTemplateVariable(String),

    /// A template contains an unterminated placeholder
    #[error("malformed template: {0}")]
    MalformedTemplate(String),

    /// Two generated methods of one service would share an identifier
    #[error("method `{method}` of `{service}` generates `{ident}`, which is already defined")]
    MethodNameCollision {
        service: String,
        method: String,
        ident: String,
    },
}

impl CodegenError {
    /// Stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            CodegenError::UnmappedDependency { .. } => 1,
            CodegenError::MalformedMappingFile(_) => 2,
            CodegenError::FileReadFailure { .. } => 3,
            CodegenError::InvalidParameters(_) => 4,
            CodegenError::UndefinedTemplateVariable(_) => 5,
            CodegenError::MalformedTemplate(_) => 6,
            CodegenError::MethodNameCollision { .. } => 7,
        }
    }
}
