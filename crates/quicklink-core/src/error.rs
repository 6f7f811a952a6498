use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while constructing domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid alias: {0}")]
    InvalidAlias(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid record id: {0}")]
    InvalidRecordId(String),
}

/// Errors returned by a [`UrlStore`](crate::store::UrlStore).
///
/// Every variant carries the name of the operation that failed so callers
/// can log or surface it without extra wrapping.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{op}: storage backend unavailable: {message}")]
    Connection { op: &'static str, message: String },
    #[error("{op}: schema bootstrap failed: {message}")]
    Schema { op: &'static str, message: String },
    #[error("{op}: alias already exists: {alias}")]
    DuplicateAlias { op: &'static str, alias: String },
    #[error("{op}: no url stored for alias: {alias}")]
    NotFound { op: &'static str, alias: String },
    #[error("{op}: storage write failed: {message}")]
    Write { op: &'static str, message: String },
    #[error("{op}: storage read failed: {message}")]
    Read { op: &'static str, message: String },
    #[error("{op}: operation cancelled before completion")]
    Cancelled { op: &'static str },
}

impl StoreError {
    /// Name of the operation that produced this error.
    pub fn op(&self) -> &'static str {
        match self {
            StoreError::Connection { op, .. }
            | StoreError::Schema { op, .. }
            | StoreError::DuplicateAlias { op, .. }
            | StoreError::NotFound { op, .. }
            | StoreError::Write { op, .. }
            | StoreError::Read { op, .. }
            | StoreError::Cancelled { op } => *op,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_duplicate_alias(&self) -> bool {
        matches!(self, StoreError::DuplicateAlias { .. })
    }
}
