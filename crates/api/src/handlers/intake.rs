//! Public lead intake (`POST /intake/{slug}`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use frontline_core::intake::LeadSubmission;
use frontline_core::lead::LeadKind;
use frontline_core::types::{DbId, Timestamp};
use frontline_db::models::lead::CreateLead;
use frontline_db::repositories::LeadRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// What the public submitter sees. Triage fields stay admin-only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReceipt {
    pub id: DbId,
    pub kind: String,
    pub created_at: Timestamp,
}

/// POST /api/intake/{slug}
///
/// Validate the kind's form payload and store it with status `new`.
pub async fn submit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<DataResponse<IntakeReceipt>>)> {
    let kind = LeadKind::from_slug(&slug)?;
    let parts = LeadSubmission::parse(kind, body)?.into_parts()?;

    let lead = LeadRepo::create(&state.pool, &CreateLead::from(parts)).await?;
    tracing::info!(lead_id = lead.id, kind = kind.as_str(), "Lead received");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IntakeReceipt {
                id: lead.id,
                kind: lead.kind,
                created_at: lead.created_at,
            },
        }),
    ))
}
