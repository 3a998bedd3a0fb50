//! Affiliate onboarding paperwork (`/affiliate/...`): W-9 and NDA.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use frontline_core::onboarding::{NdaSubmission, W9Submission};
use frontline_db::models::onboarding::{NdaSignature, W9Filing};
use frontline_db::repositories::OnboardingRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAffiliate;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct W9Status {
    pub submitted: bool,
    pub w9: Option<W9Filing>,
}

#[derive(Debug, Serialize)]
pub struct NdaStatus {
    pub signed: bool,
    pub nda: Option<NdaSignature>,
}

/// GET /api/affiliate/w9-status
pub async fn w9_status(
    RequireAffiliate(user): RequireAffiliate,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<W9Status>>> {
    let w9 = OnboardingRepo::find_w9(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: W9Status {
            submitted: w9.is_some(),
            w9,
        },
    }))
}

/// POST /api/affiliate/submit-w9
///
/// Resubmitting replaces the previous filing.
pub async fn submit_w9(
    RequireAffiliate(user): RequireAffiliate,
    State(state): State<AppState>,
    Json(input): Json<W9Submission>,
) -> AppResult<Json<DataResponse<W9Filing>>> {
    let record = input.into_record(state.config.tin_hash_key.as_bytes())?;
    let w9 = OnboardingRepo::upsert_w9(&state.pool, user.user_id, &record).await?;

    tracing::info!(user_id = user.user_id, w9_id = w9.id, "W-9 submitted");
    Ok(Json(DataResponse { data: w9 }))
}

/// GET /api/affiliate/nda-status
pub async fn nda_status(
    RequireAffiliate(user): RequireAffiliate,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<NdaStatus>>> {
    let nda = OnboardingRepo::find_nda(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: NdaStatus {
            signed: nda.is_some(),
            nda,
        },
    }))
}

/// POST /api/affiliate/sign-nda
///
/// The NDA is signed once; a second signature is a 409.
pub async fn sign_nda(
    RequireAffiliate(user): RequireAffiliate,
    State(state): State<AppState>,
    Json(input): Json<NdaSubmission>,
) -> AppResult<(StatusCode, Json<DataResponse<NdaSignature>>)> {
    let (signer_name, signature_sha256) = input.accept()?;
    let nda =
        OnboardingRepo::create_nda(&state.pool, user.user_id, &signer_name, &signature_sha256)
            .await?;

    tracing::info!(user_id = user.user_id, nda_id = nda.id, "NDA signed");
    Ok((StatusCode::CREATED, Json(DataResponse { data: nda })))
}
