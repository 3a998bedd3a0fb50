pub mod affiliates;
pub mod auth;
pub mod claims;
pub mod contracts;
pub mod csu;
pub mod dashboard;
pub mod intake;
pub mod leads;
pub mod onboarding;

use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;

/// Best-effort client address from the proxy's `X-Forwarded-For` header.
pub(crate) fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}

pub(crate) fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
