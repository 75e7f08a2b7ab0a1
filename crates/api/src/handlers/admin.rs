//! Handlers for the `/admin` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use t2t_core::error::CoreError;
use t2t_core::roles::Role;
use t2t_core::types::DbId;
use t2t_db::models::user::{AdminUpdateUser, UserResponse};
use t2t_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/users/{id}`.
///
/// Omitted fields keep their current values. Role changes only happen here;
/// the profile endpoint never touches role or the moderation flags.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub role: Option<String>,
    pub is_verified: Option<bool>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/users
///
/// List all users, newest first.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;

    let responses: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();

    Ok(Json(responses))
}

/// PUT /api/admin/users/{id}
///
/// Update a user's role and moderation flags.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    // An incoming role must come from the closed set.
    let role = match input.role {
        Some(raw) => {
            let role = Role::from_str_value(&raw)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(role.as_str().to_string())
        }
        None => None,
    };

    let update = AdminUpdateUser {
        role,
        is_verified: input.is_verified,
        is_active: input.is_active,
    };

    let user = UserRepo::admin_update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(UserResponse::from(&user)))
}
