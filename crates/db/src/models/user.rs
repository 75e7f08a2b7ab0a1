//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use t2t_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// Role string from the closed set in `t2t_core::roles`.
    pub role: String,
    pub location: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: String,
    pub location: String,
    pub is_verified: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            role: user.role.clone(),
            location: user.location.clone(),
            is_verified: user.is_verified,
        }
    }
}

/// DTO for creating a new user. The password arrives pre-hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: String,
    pub location: String,
}

/// DTO for a user updating their own profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// DTO for admin updates. Role changes go through here only.
#[derive(Debug)]
pub struct AdminUpdateUser {
    pub role: Option<String>,
    pub is_verified: Option<bool>,
    pub is_active: Option<bool>,
}
