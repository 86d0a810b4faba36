//! Creates the configured admin account on startup.

use estate_core::roles::ROLE_ADMIN;
use estate_db::models::staff_user::CreateStaffUser;
use estate_db::{StaffStore, StoreError};

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Ensure an admin account exists for `admin.email`.
///
/// Returns `true` when an account was created. An existing account with
/// that email is left untouched, whatever its role.
pub async fn ensure_admin(staff: &dyn StaffStore, admin: &AdminBootstrap) -> AppResult<bool> {
    if staff.find_by_email(&admin.email).await?.is_some() {
        tracing::debug!(email = %admin.email, "Admin account already present");
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    match staff
        .create(CreateStaffUser {
            email: admin.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        })
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = user.id, email = %user.email, "Admin account created");
            Ok(true)
        }
        // Another instance created it between the lookup and the insert.
        Err(StoreError::Conflict(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
