//! Route definitions for affiliate contracts.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contracts;
use crate::state::AppState;

/// Routes mounted at `/contracts`. All require the `affiliate` role.
///
/// ```text
/// GET  /templates   -> list_templates
/// GET  /my-signed   -> my_signed
/// POST /sign        -> sign
/// POST /sign-all    -> sign_all_pending
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/templates", get(contracts::list_templates))
        .route("/my-signed", get(contracts::my_signed))
        .route("/sign", post(contracts::sign))
        .route("/sign-all", post(contracts::sign_all_pending))
}
