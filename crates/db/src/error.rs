use switchdeck_core::error::CoreError;

/// Failure of a repository operation that enforces marketplace rules.
///
/// Rule violations (ownership, disposition compatibility, missing rows
/// discovered mid-transaction) surface as [`CoreError`]; everything else is
/// a database error.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
