//! Session token endpoints
//!
//! Handles HTTP requests for session lifecycle:
//! - POST /jwt - Mint a token for the asserted email and set the cookie
//! - POST /logout - Clear the token cookie
//!
//! The email in the token request is taken at face value; callers are
//! authenticated by an upstream identity provider before they reach this
//! backend. The token only binds subsequent requests to that email.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState};

/// Request body for minting a session token
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// Response for token issuance and logout
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
}

/// Build the session token router (no auth required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", post(logout))
}

/// POST /jwt - Mint a session token
///
/// Signs a token for the asserted email and returns it in an HttpOnly
/// cookie so browser scripts never see it.
async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.session_service.issue(&body.email).map_err(|e| {
        tracing::error!("Failed to issue session token: {}", e);
        ApiError::internal_error("Internal server error")
    })?;

    let cookie = state.session_service.issue_cookie(&token);
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());

    tracing::debug!("Issued session token for {}", body.email);

    Ok((headers, Json(SessionResponse { success: true })))
}

/// POST /logout - Clear the token cookie
///
/// Expires the cookie unconditionally; a request without a valid token
/// still gets the clearing Set-Cookie back.
async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = state.session_service.clear_cookie();
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());

    (headers, Json(SessionResponse { success: true }))
}
