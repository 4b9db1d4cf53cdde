use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid {field}: {reason}")]
    InvalidFieldError { field: String, reason: String },

    #[error("Reservation request rejected with status {status}: {message}")]
    RequestRejectedError { status: u16, message: String },

    #[error("Wizard error: {message}")]
    WizardError { message: String },
}

impl BookingError {
    /// True when the failure is recoverable by correcting input or
    /// resubmitting; the wizard never treats these as fatal.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ApiError(_)
                | Self::InvalidFieldError { .. }
                | Self::RequestRejectedError { .. }
                | Self::WizardError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) => format!("Could not reach the booking service: {}", e),
            Self::RequestRejectedError { status, message } => format!(
                "The booking service rejected the request ({}): {}",
                status, message
            ),
            Self::InvalidFieldError { field, reason } => format!("{}: {}", field, reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
