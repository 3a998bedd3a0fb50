//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Filters for the admin lead panels (`?search=&status=`).
///
/// An absent or empty `status`, or `all`, applies no status filter.
#[derive(Debug, Default, Deserialize)]
pub struct LeadListParams {
    pub search: Option<String>,
    pub status: Option<String>,
}
