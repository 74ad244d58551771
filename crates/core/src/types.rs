/// All primary keys are PostgreSQL UUIDs assigned by the store at insert.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
