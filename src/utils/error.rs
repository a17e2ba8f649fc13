use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Stored pins under '{key}' are malformed: {source}")]
    CorruptDataError {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot encode pin #{index}: ({latitude}, {longitude}) is not a finite coordinate")]
    NonFiniteCoordinateError {
        index: usize,
        latitude: f64,
        longitude: f64,
    },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidCoordinateError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid radius {value}: {reason}")]
    InvalidRadiusError { value: f64, reason: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Data,
    Input,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PinError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PinError::IoError(_) | PinError::StorageError { .. } => ErrorCategory::Storage,
            PinError::SerializationError(_)
            | PinError::CorruptDataError { .. }
            | PinError::NonFiniteCoordinateError { .. } => ErrorCategory::Data,
            PinError::InvalidCoordinateError { .. } | PinError::InvalidRadiusError { .. } => {
                ErrorCategory::Input
            }
            PinError::ConfigError { .. } | PinError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PinError::IoError(_) | PinError::StorageError { .. } => {
                "Check that the data directory exists and is writable"
            }
            PinError::SerializationError(_) | PinError::NonFiniteCoordinateError { .. } => {
                "Only finite latitude/longitude values can be saved"
            }
            PinError::CorruptDataError { .. } => {
                "Restart with on_corrupt = \"backup\" to keep the bad value and start with no pins"
            }
            PinError::InvalidCoordinateError { .. } => {
                "Latitude must be within [-90, 90] and longitude within [-180, 180]"
            }
            PinError::InvalidRadiusError { .. } => "Use a positive radius in meters",
            PinError::ConfigError { .. } | PinError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PinError::InvalidCoordinateError { field, value, .. } => {
                format!("The {} '{}' is out of range", field, value)
            }
            PinError::InvalidRadiusError { value, .. } => {
                format!("The radius {} is not usable", value)
            }
            PinError::CorruptDataError { key, .. } => {
                format!("Saved pins under '{}' could not be read", key)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PinError>;
