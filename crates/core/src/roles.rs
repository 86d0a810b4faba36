//! Well-known staff role name constants.
//!
//! These must match the `CHECK` constraint on `staff_users.role`.

/// May read, export and triage leads.
pub const ROLE_ADMIN: &str = "admin";

/// Signed-up account without lead access until promoted.
pub const ROLE_MEMBER: &str = "member";
