//! Account lifecycle: register, login, logout.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_cookies::Cookies;

use notesync_core::auth::{
    hash_password, validate_login, validate_registration, verify_password, AuthError, SessionUser,
};
use notesync_core::storage::RepositoryError;

use crate::handlers::AppError;
use crate::models::Credentials;
use crate::session;
use crate::state::AppState;

/// POST /register - create an account.
///
/// The duplicate-email check happens twice on purpose: a lookup first for the
/// common case, then the unique constraint catches the race where two
/// registrations for the same email interleave.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let email = credentials.email.trim().to_string();
    validate_registration(&email, &credentials.password)?;

    if state.users.find_user_by_email(&email).await?.is_some() {
        return Err(AuthError::DuplicateEmail.into());
    }

    let password_hash = hash_password(&credentials.password)?;
    let user = state
        .users
        .create_user(&email, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists { .. } => AuthError::DuplicateEmail.into(),
            other => AppError::from(other),
        })?;

    tracing::info!(user_id = user.id, "Registered new account");

    Ok((StatusCode::CREATED, Json(SessionUser::from(&user))))
}

/// POST /login - verify credentials and establish a session.
///
/// Unknown email and wrong password produce the same response, so the
/// endpoint cannot be used to probe which addresses have accounts.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(credentials): Form<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let email = credentials.email.trim().to_string();
    validate_login(&email, &credentials.password)?;

    let Some(user) = state.users.find_user_by_email(&email).await? else {
        return Err(AuthError::InvalidCredentials.into());
    };

    if !verify_password(&credentials.password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let session_user = SessionUser::from(&user);
    session::establish(&cookies, &state.cookie_key, &session_user);

    tracing::info!(user_id = user.id, "Session established");

    Ok((StatusCode::OK, Json(session_user)))
}

/// POST /logout - drop the session cookie. Succeeds even when no session
/// exists.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> impl IntoResponse {
    session::clear(&cookies, &state.cookie_key);
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Logged out" })),
    )
}
