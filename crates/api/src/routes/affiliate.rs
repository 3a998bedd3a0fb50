//! Route definitions for affiliate onboarding.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/affiliate`. All require the `affiliate` role.
///
/// ```text
/// GET  /w9-status    -> w9_status
/// POST /submit-w9    -> submit_w9
/// GET  /nda-status   -> nda_status
/// POST /sign-nda     -> sign_nda
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/w9-status", get(onboarding::w9_status))
        .route("/submit-w9", post(onboarding::submit_w9))
        .route("/nda-status", get(onboarding::nda_status))
        .route("/sign-nda", post(onboarding::sign_nda))
}
