//! Admin management of affiliate accounts (`/admin/affiliates`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use frontline_core::error::CoreError;
use frontline_core::roles::ROLE_AFFILIATE;
use frontline_core::types::DbId;
use frontline_db::models::user::{CreateUser, UserResponse};
use frontline_db::repositories::{LeadRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/affiliates`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAffiliateRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// GET /api/admin/affiliates
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list_by_role(&state.pool, ROLE_AFFILIATE).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// POST /api/admin/affiliates
///
/// Create an affiliate login. Duplicate emails return 409.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateAffiliateRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password_hash,
            role: ROLE_AFFILIATE.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = admin.user_id, affiliate_id = user.id, "Affiliate created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// DELETE /api/admin/affiliates/{id}
///
/// Only affiliate accounts can be deleted. Their leads become unassigned.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let unassigned = LeadRepo::count_assigned_to(&state.pool, id).await?;
    if !UserRepo::delete_with_role(&state.pool, id, ROLE_AFFILIATE).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Affiliate",
            id,
        }));
    }

    tracing::info!(
        user_id = admin.user_id,
        affiliate_id = id,
        unassigned,
        "Affiliate deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
