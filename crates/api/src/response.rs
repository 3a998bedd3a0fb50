//! Shared response envelope types for API handlers.
//!
//! API responses use a `{ "data": ... }` envelope. The one exception is
//! `GET /auth/me`, which answers `{ "user": ... }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
