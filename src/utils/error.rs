use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed model: {message}")]
    MalformedModel { message: String },

    #[error("Duplicate processor ID: '{id}'")]
    DuplicateProcessorId { id: String },
}

impl DiagramError {
    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DiagramError::IoError(_) => "Check that the file exists and is readable",
            DiagramError::SerializationError(_) => {
                "Check the JSON against the processors/wires field layout"
            }
            DiagramError::ConfigError { .. }
            | DiagramError::ConfigValidationError { .. }
            | DiagramError::MissingConfigError { .. }
            | DiagramError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the suite file"
            }
            DiagramError::MalformedModel { .. } | DiagramError::DuplicateProcessorId { .. } => {
                "Fix the model file; every processor needs a unique, non-empty ID"
            }
        }
    }

    /// Loading and configuration failures all map to the same exit code;
    /// check failures are reported separately by the binaries.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

pub type Result<T> = std::result::Result<T, DiagramError>;
