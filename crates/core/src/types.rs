/// Staff account primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Leads are keyed by an opaque UUID assigned on creation.
pub type LeadId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
