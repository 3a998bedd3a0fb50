pub mod admin;
pub mod affiliate;
pub mod auth;
pub mod claims;
pub mod contracts;
pub mod csu;
pub mod health;
pub mod intake;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/me                                         current user
/// /auth/logout                                     logout
///
/// /intake/{slug}                                   public lead submission
///
/// /admin/dashboard/stats                           stat cards (admin)
/// /admin/affiliates                                list, create (admin)
/// /admin/affiliates/{id}                           delete (admin)
/// /admin/csu/contracts                             create client contract (admin)
/// /admin/{slug}                                    list leads of a kind (admin)
/// /admin/{slug}/{id}                               get, update lead (admin)
///
/// /claims/cases                                    list, create (owner)
/// /claims/cases/{id}                               get
/// /claims/cases/{id}/tasks|deadlines               list
/// /claims/cases/{id}/notes|files                   list, create
/// /claims/tasks/{id}                               update status
///
/// /csu/contract/{token}                            view by link (public)
/// /csu/sign/{token}                                sign by link (public)
/// /csu/signed-agreements/{id}/pdf/public           signed PDF (public)
///
/// /contracts/templates                             templates + signed flags (affiliate)
/// /contracts/my-signed                             caller's signatures
/// /contracts/sign                                  sign one template
/// /contracts/sign-all                              sign every pending template
///
/// /affiliate/w9-status|submit-w9                   W-9 (affiliate)
/// /affiliate/nda-status|sign-nda                   NDA (affiliate)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/intake", intake::router())
        .nest("/admin", admin::router())
        .nest("/claims", claims::router())
        .nest("/csu", csu::router())
        .nest("/contracts", contracts::router())
        .nest("/affiliate", affiliate::router())
}
