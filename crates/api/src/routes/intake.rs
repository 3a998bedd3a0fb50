//! Route definitions for public lead intake.

use axum::routing::post;
use axum::Router;

use crate::handlers::intake;
use crate::state::AppState;

/// Routes mounted at `/intake`.
///
/// ```text
/// POST /{slug}   -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{slug}", post(intake::submit))
}
