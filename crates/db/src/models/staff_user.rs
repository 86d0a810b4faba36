//! Staff account model and DTOs.

use estate_core::roles::ROLE_ADMIN;
use estate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `staff_users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`StaffUserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct StaffUser {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    /// `"admin"` or `"member"`.
    pub role: String,
    pub created_at: Timestamp,
}

impl StaffUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Safe staff representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUserResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl From<&StaffUser> for StaffUserResponse {
    fn from(user: &StaffUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a staff account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateStaffUser {
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
