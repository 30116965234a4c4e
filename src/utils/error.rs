use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsultError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Roster error: {message}")]
    RosterError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Config,
    Data,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConsultError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConsultError::IoError(_) => ErrorCategory::Io,
            ConsultError::SerializationError(_) | ConsultError::CsvError(_) => ErrorCategory::Data,
            ConsultError::ConfigValidationError { .. }
            | ConsultError::InvalidConfigValueError { .. }
            | ConsultError::MissingConfigError { .. } => ErrorCategory::Config,
            ConsultError::RosterError { .. } | ConsultError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConsultError::IoError(_) => ErrorSeverity::Critical,
            ConsultError::SerializationError(_) | ConsultError::CsvError(_) => ErrorSeverity::High,
            ConsultError::ConfigValidationError { .. }
            | ConsultError::InvalidConfigValueError { .. }
            | ConsultError::MissingConfigError { .. } => ErrorSeverity::Medium,
            ConsultError::RosterError { .. } => ErrorSeverity::High,
            ConsultError::ProcessingError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ConsultError::IoError(_) => {
                "Check that the roster file exists and the output directory is writable".to_string()
            }
            ConsultError::SerializationError(_) => {
                "Check that the roster file contains a JSON array of expert records".to_string()
            }
            ConsultError::CsvError(_) => {
                "Check free disk space and permissions on the output directory".to_string()
            }
            ConsultError::ConfigValidationError { field, .. }
            | ConsultError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting and run again", field)
            }
            ConsultError::MissingConfigError { field } => {
                format!("Provide '{}' on the command line or in the config file", field)
            }
            ConsultError::RosterError { .. } => {
                "Fix the offending expert record in the roster file".to_string()
            }
            ConsultError::ProcessingError { .. } => {
                "Re-run with --verbose to see which phase failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConsultError::IoError(e) => format!("Could not read or write a file: {}", e),
            ConsultError::SerializationError(_) => "The roster file is not valid JSON".to_string(),
            ConsultError::CsvError(_) => "Writing the leaderboard CSV failed".to_string(),
            ConsultError::ConfigValidationError { field, message } => {
                format!("Configuration problem ({}): {}", field, message)
            }
            ConsultError::InvalidConfigValueError { field, value, .. } => {
                format!("'{}' is not a valid value for {}", value, field)
            }
            ConsultError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            ConsultError::RosterError { message } => format!("Roster problem: {}", message),
            ConsultError::ProcessingError { message } => message.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsultError>;
