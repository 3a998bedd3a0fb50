//! Session cookies.
//!
//! Both tokens are issued as `HttpOnly; SameSite=Lax` cookies so the browser
//! never exposes them to scripts. The refresh cookie is only sent to the
//! auth endpoints.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

const ACCESS_COOKIE_PATH: &str = "/";
const REFRESH_COOKIE_PATH: &str = "/api/auth";

/// Find a cookie value in the request's `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

fn build(name: &str, value: &str, path: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={value}; Path={path}; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value carrying the access token.
pub fn access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    build(ACCESS_COOKIE, token, ACCESS_COOKIE_PATH, max_age_secs, secure)
}

/// `Set-Cookie` value carrying the refresh token.
pub fn refresh_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    build(REFRESH_COOKIE, token, REFRESH_COOKIE_PATH, max_age_secs, secure)
}

/// `Set-Cookie` values that expire both session cookies.
pub fn clearing_cookies(secure: bool) -> [String; 2] {
    [
        build(ACCESS_COOKIE, "", ACCESS_COOKIE_PATH, 0, secure),
        build(REFRESH_COOKIE, "", REFRESH_COOKIE_PATH, 0, secure),
    ]
}
