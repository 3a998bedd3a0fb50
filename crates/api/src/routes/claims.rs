//! Route definitions for the claims navigator.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::claims;
use crate::state::AppState;

/// Routes mounted at `/claims`.
///
/// ```text
/// GET   /cases                  -> list_cases
/// POST  /cases                  -> create_case
/// GET   /cases/{id}             -> get_case
/// GET   /cases/{id}/tasks       -> list_tasks
/// GET   /cases/{id}/deadlines   -> list_deadlines
/// GET   /cases/{id}/notes       -> list_notes
/// POST  /cases/{id}/notes       -> create_note
/// GET   /cases/{id}/files       -> list_files
/// POST  /cases/{id}/files       -> upload_file (size checked by the handler)
/// PATCH /tasks/{id}             -> update_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cases", get(claims::list_cases).post(claims::create_case))
        .route("/cases/{id}", get(claims::get_case))
        .route("/cases/{id}/tasks", get(claims::list_tasks))
        .route("/cases/{id}/deadlines", get(claims::list_deadlines))
        .route(
            "/cases/{id}/notes",
            get(claims::list_notes).post(claims::create_note),
        )
        .route(
            "/cases/{id}/files",
            get(claims::list_files)
                .post(claims::upload_file)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/tasks/{id}", patch(claims::update_task))
}
