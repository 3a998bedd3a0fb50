//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{affiliates, csu, dashboard, leads};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` or `master` role (enforced by handler
/// extractors). Static segments take priority over `{slug}`.
///
/// ```text
/// GET    /dashboard/stats    -> dashboard::stats
/// GET    /affiliates         -> affiliates::list
/// POST   /affiliates         -> affiliates::create
/// DELETE /affiliates/{id}    -> affiliates::delete
/// POST   /csu/contracts      -> csu::create_contract
/// GET    /{slug}             -> leads::list_leads
/// GET    /{slug}/{id}        -> leads::get_lead
/// PATCH  /{slug}/{id}        -> leads::update_lead
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(dashboard::stats))
        .route(
            "/affiliates",
            get(affiliates::list).post(affiliates::create),
        )
        .route("/affiliates/{id}", delete(affiliates::delete))
        .route("/csu/contracts", post(csu::create_contract))
        .route("/{slug}", get(leads::list_leads))
        .route(
            "/{slug}/{id}",
            get(leads::get_lead).patch(leads::update_lead),
        )
}
