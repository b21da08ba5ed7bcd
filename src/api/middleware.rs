//! API middleware
//!
//! Contains the authentication gate for protected routes:
//! - Credential extraction (cookie or bearer header)
//! - Token verification and identity attachment
//! - The API error envelope

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::Identity;
use crate::services::{FoodService, SessionService, TOKEN_COOKIE};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub food_service: Arc<FoodService>,
}

/// Authenticated identity extracted from the request
#[derive(Debug, Clone)]
pub struct AuthIdentity(pub Identity);

/// Error response for API errors.
///
/// Serializes as a flat `{"error": "..."}` body; the HTTP status travels
/// out-of-band.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            status,
        }
    }

    /// Missing, malformed, tampered, or expired credential. One message for
    /// all of them; validation detail is not leaked to clients.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized Access")
    }

    /// Authenticated but not entitled to the requested resource
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden Access")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Extract the session token from request headers.
///
/// The `token` cookie is the primary transport; an `Authorization: Bearer`
/// header is accepted as a fallback so the verification path can be driven
/// without a cookie jar. Works on a plain [`HeaderMap`], independent of any
/// HTTP server.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(cookie_header) = headers.get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie
                    .strip_prefix(TOKEN_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    return Some(token.to_string());
                }
            }
        }
    }

    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    None
}

/// Authentication middleware for protected routes.
///
/// Missing credential: 401 without invoking the handler. Present but
/// unverifiable (bad signature, tampered, expired): 401. Verified: the
/// decoded identity is attached to request extensions and the request
/// proceeds.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers()).ok_or_else(ApiError::unauthorized)?;

    let identity = state.session_service.verify(&token).map_err(|e| {
        tracing::warn!("Rejected session credential: {}", e);
        ApiError::unauthorized()
    })?;

    request.extensions_mut().insert(AuthIdentity(identity));
    Ok(next.run(request).await)
}

impl<S> axum::extract::FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthIdentity>()
            .cloned()
            .ok_or_else(ApiError::unauthorized)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// Any cookie-safe token placed in the `token` cookie is extracted
        /// unchanged.
        #[test]
        fn cookie_tokens_extract_round_trip(token in "[A-Za-z0-9_.-]{1,64}") {
            let request = Request::builder()
                .uri("/test")
                .header(header::COOKIE, format!("token={}", token))
                .body(Body::empty())
                .unwrap();

            prop_assert_eq!(extract_token(request.headers()), Some(token));
        }

        /// Bearer headers extract the same way.
        #[test]
        fn bearer_tokens_extract_round_trip(token in "[A-Za-z0-9_.-]{1,64}") {
            let request = Request::builder()
                .uri("/test")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap();

            prop_assert_eq!(extract_token(request.headers()), Some(token));
        }
    }
}
