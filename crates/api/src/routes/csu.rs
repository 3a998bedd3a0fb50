//! Route definitions for tokenised client contract signing.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::csu;
use crate::state::AppState;

/// Routes mounted at `/csu`. None require a login; the link token is the credential.
///
/// ```text
/// GET  /contract/{token}                     -> get_contract
/// POST /sign/{token}                         -> sign
/// GET  /signed-agreements/{id}/pdf/public    -> agreement_pdf (?token=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contract/{token}", get(csu::get_contract))
        .route("/sign/{token}", post(csu::sign))
        .route(
            "/signed-agreements/{id}/pdf/public",
            get(csu::agreement_pdf),
        )
}
