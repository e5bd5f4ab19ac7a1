/// Primary keys are PostgreSQL BIGSERIAL, except the UUID-keyed dialog tables.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
