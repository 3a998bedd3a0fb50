//! Handlers for the `/auth` resource (login, refresh, me, logout).

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::AppendHeaders;
use axum::Json;
use chrono::Utc;
use frontline_core::error::CoreError;
use frontline_core::types::DbId;
use frontline_db::models::session::CreateSession;
use frontline_db::models::user::User;
use frontline_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::cookies::{
    access_cookie, clearing_cookies, read_cookie, refresh_cookie, REFRESH_COOKIE,
};
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::handlers::{client_ip, user_agent};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Two `Set-Cookie` headers plus a JSON body.
type WithCookies<T> = (AppendHeaders<[(axum::http::HeaderName, String); 2]>, Json<T>);

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Optional request body for `POST /auth/refresh` (the cookie is preferred).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// The session user as exposed to the client.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

/// Response body for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserInfo,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with email + password. Sets both session cookies and also
/// returns the tokens in the body.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<WithCookies<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failures = UserRepo::increment_failed_login(&state.pool, user.id).await?;
        if failures >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, failures, "Account locked after failed logins");
        }
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    issue_session(&state, &user, &headers).await
}

/// POST /api/auth/refresh
///
/// Rotate the refresh session. The token comes from the `refresh_token`
/// cookie, or from `{ "refreshToken": ... }` when no cookie is present.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<WithCookies<AuthResponse>> {
    let from_body = if body.is_empty() {
        RefreshRequest::default()
    } else {
        serde_json::from_slice::<RefreshRequest>(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?
    };

    let token = read_cookie(&headers, REFRESH_COOKIE)
        .map(str::to_string)
        .or(from_body.refresh_token)
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Missing refresh token".into())))?;

    let session = SessionRepo::find_active_by_hash(&state.pool, &hash_refresh_token(&token))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Losing the revoke race means another request already rotated this token.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    issue_session(&state, &user, &headers).await
}

/// GET /api/auth/me
///
/// The signed-in user, or 401.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<MeResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not signed in".into())))?;

    Ok(Json(MeResponse {
        user: UserInfo::from(&user),
    }))
}

/// POST /api/auth/logout
///
/// Revoke all sessions for the caller and clear both cookies. Returns 204.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<(StatusCode, AppendHeaders<[(axum::http::HeaderName, String); 2]>)> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "User logged out");

    let [access, refresh] = clearing_cookies(state.config.cookie_secure);
    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, access), (SET_COOKIE, refresh)]),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign an access token, persist a new refresh session, and build the
/// cookies and body.
async fn issue_session(
    state: &AppState,
    user: &User,
    headers: &HeaderMap,
) -> AppResult<WithCookies<AuthResponse>> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
            user_agent: user_agent(headers),
            ip_address: client_ip(headers),
        },
    )
    .await?;

    let secure = state.config.cookie_secure;
    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            access_cookie(&access_token, jwt.access_token_ttl_secs(), secure),
        ),
        (
            SET_COOKIE,
            refresh_cookie(&refresh_plaintext, jwt.refresh_token_ttl_secs(), secure),
        ),
    ]);

    Ok((
        cookies,
        Json(AuthResponse {
            access_token,
            refresh_token: refresh_plaintext,
            expires_in: jwt.access_token_ttl_secs(),
            user: UserInfo::from(user),
        }),
    ))
}
