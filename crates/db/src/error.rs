use tasktrack_core::error::CoreError;

/// Errors surfaced by [`Store`](crate::store::Store) implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write. Carries the offending field.
    #[error("Duplicate value for {0}")]
    Duplicate(&'static str),

    /// A stored row could not be mapped back into a domain value.
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

impl StoreError {
    /// Map a sqlx error, turning a violation of `constraint` into
    /// [`StoreError::Duplicate`] for `field`.
    pub(crate) fn from_unique(err: sqlx::Error, constraint: &str, field: &'static str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(constraint)
            {
                return StoreError::Duplicate(field);
            }
        }
        StoreError::Database(err)
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}
