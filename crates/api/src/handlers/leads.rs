//! Admin triage handlers for every lead kind (`/admin/{slug}`).
//!
//! The slug selects the [`LeadKind`]; list filtering happens in memory
//! with [`filter_leads`] over the whole collection for that kind.

use axum::extract::{Path, Query, State};
use axum::Json;
use frontline_core::error::CoreError;
use frontline_core::lead::{filter_leads, LeadKind, LeadStatus, StatusFilter};
use frontline_core::roles::ROLE_AFFILIATE;
use frontline_core::types::DbId;
use frontline_db::models::lead::{Lead, UpdateLead};
use frontline_db::repositories::{LeadRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::LeadListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/{slug}?search=&status=
///
/// Every lead of the kind, newest first, narrowed by free-text search and status.
pub async fn list_leads(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LeadListParams>,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let kind = LeadKind::from_slug(&slug)?;
    let status = StatusFilter::parse(params.status.as_deref())?;

    let all = LeadRepo::list_by_kind(&state.pool, kind).await?;
    let leads = filter_leads(all, params.search.as_deref().unwrap_or(""), status);

    Ok(Json(DataResponse { data: leads }))
}

/// GET /api/admin/{slug}/{id}
pub async fn get_lead(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let kind = LeadKind::from_slug(&slug)?;
    let lead = LeadRepo::find_by_id(&state.pool, kind, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: kind.entity_name(),
            id,
        }))?;
    Ok(Json(DataResponse { data: lead }))
}

/// PATCH /api/admin/{slug}/{id}
///
/// Update status, assignee and notes. `null` clears `assignedTo` or `notes`.
pub async fn update_lead(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateLead>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let kind = LeadKind::from_slug(&slug)?;

    if let Some(status) = &input.status {
        LeadStatus::from_str_db(status)?;
    }

    if let Some(Some(assignee_id)) = input.assigned_to {
        let is_affiliate = UserRepo::find_by_id(&state.pool, assignee_id)
            .await?
            .is_some_and(|u| u.role == ROLE_AFFILIATE);
        if !is_affiliate {
            return Err(AppError::BadRequest(format!(
                "User {assignee_id} is not an affiliate"
            )));
        }
    }

    let lead = LeadRepo::update(&state.pool, kind, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: kind.entity_name(),
            id,
        }))?;

    tracing::info!(
        user_id = admin.user_id,
        lead_id = id,
        kind = kind.as_str(),
        status = %lead.status,
        assigned_to = ?lead.assigned_to,
        "Lead updated"
    );

    Ok(Json(DataResponse { data: lead }))
}
