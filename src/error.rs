use std::error::Error;
use std::fmt;
use std::sync::PoisonError;

#[derive(Debug)]
pub enum RustyCanvasError {
    // Session errors
    SessionLock(String),

    // Messages errors
    MessageParseError(String),
    MessageTooLarge(usize),

    // Persistence errors
    SnapshotNotFound(String),
    StorageError(String),
    SerializationError(String),

    // Validation errors
    ValidationError(String),

    // Configuration errors
    ConfigError(String),
}

impl fmt::Display for RustyCanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionLock(msg) => write!(f, "Session lock error: {}", msg),
            Self::MessageParseError(msg) => write!(f, "Message parse error: {}", msg),
            Self::MessageTooLarge(size) => write!(f, "Message too large: {} bytes", size),
            Self::SnapshotNotFound(room) => write!(f, "No saved session for room: {}", room),
            Self::StorageError(msg) => write!(f, "Storage error: {}", msg),
            Self::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for RustyCanvasError {}

// Converting from PoisonError to facilitate poisoned lock handling
impl<T> From<PoisonError<T>> for RustyCanvasError {
    fn from(err: PoisonError<T>) -> Self {
        RustyCanvasError::SessionLock(format!("Lock poisoned: {}", err))
    }
}

impl From<serde_json::Error> for RustyCanvasError {
    fn from(err: serde_json::Error) -> Self {
        RustyCanvasError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for RustyCanvasError {
    fn from(err: std::io::Error) -> Self {
        RustyCanvasError::StorageError(err.to_string())
    }
}

// Generic result type for RustyCanvas
pub type Result<T> = std::result::Result<T, RustyCanvasError>;
