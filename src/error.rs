use std::fmt;

/// Failure of the underlying key-value persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend could not be reached (no window, storage disabled, ...).
    Unavailable(String),
    /// Persisted data could not be encoded or decoded.
    Serde(String),
    /// The backend refused the write (e.g. quota exceeded).
    Quota(String),
    /// An in-process lock was poisoned.
    Poisoned(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
            StorageError::Serde(msg) => write!(f, "storage serialization error: {}", msg),
            StorageError::Quota(msg) => write!(f, "storage write rejected: {}", msg),
            StorageError::Poisoned(msg) => write!(f, "storage lock poisoned: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serde(err.to_string())
    }
}

/// Error type for option store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// Normalized input was rejected (empty text).
    Validation(String),
    /// No option with the given id is stored.
    NotFound(String),
    /// The collection could not be written.
    Persistence(StorageError),
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionError::Validation(msg) => write!(f, "invalid option: {}", msg),
            OptionError::NotFound(id) => write!(f, "option not found: {}", id),
            OptionError::Persistence(e) => write!(f, "persistence error: {}", e),
        }
    }
}

impl std::error::Error for OptionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptionError::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for OptionError {
    fn from(err: StorageError) -> Self {
        OptionError::Persistence(err)
    }
}

impl OptionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, OptionError::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, OptionError::Validation(_))
    }
}
