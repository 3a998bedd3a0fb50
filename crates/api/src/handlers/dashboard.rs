//! Admin dashboard stat cards.

use axum::extract::State;
use axum::Json;
use frontline_core::dashboard::{summarize_leads, KindStats};
use frontline_core::roles::ROLE_AFFILIATE;
use frontline_db::repositories::{LeadRepo, UserRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// One entry per lead kind, in tab order.
    pub leads: Vec<KindStats>,
    pub total_leads: i64,
    /// Leads still in status `new` across every kind.
    pub new_leads: i64,
    pub affiliates: i64,
}

/// GET /api/admin/dashboard/stats
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let rows: Vec<(String, String, i64)> = LeadRepo::count_by_kind_and_status(&state.pool)
        .await?
        .into_iter()
        .map(|row| (row.kind, row.status, row.count))
        .collect();
    let leads = summarize_leads(&rows);
    let affiliates = UserRepo::count_by_role(&state.pool, ROLE_AFFILIATE).await?;

    Ok(Json(DataResponse {
        data: DashboardStats {
            total_leads: leads.iter().map(|k| k.total).sum(),
            new_leads: leads
                .iter()
                .map(|k| k.by_status.get("new").copied().unwrap_or(0))
                .sum(),
            leads,
            affiliates,
        },
    }))
}
