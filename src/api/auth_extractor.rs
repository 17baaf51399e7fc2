use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::api::handlers::ErrorResponse;
use crate::api::AppContext;
use crate::model::{sha256_hex, AuthUser};
use crate::store::traits::Store;

/// Axum extractor that resolves the bearer token in the Authorization
/// header to an authenticated user. Tokens are matched by hash; the
/// raw token is never stored.
#[async_trait]
impl<S> FromRequestParts<Arc<AppContext<S>>> for AuthUser
where
    S: Store + 'static,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppContext<S>>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers).ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Missing bearer token")),
            )
        })?;

        let token_hash = sha256_hex(&token);
        let session = match state.store.get_session_by_token_hash(&token_hash).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                return Err((
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new("Invalid session token")),
                ))
            }
            Err(e) => {
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(&e.to_string())),
                ))
            }
        };

        if session.is_expired() {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Session expired")),
            ));
        }

        match state.store.get_user(&session.user_id).await {
            Ok(Some(user)) => Ok(AuthUser {
                user_id: user.id,
                email: user.email,
                is_admin: user.is_admin,
            }),
            Ok(None) => Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid session token")),
            )),
            Err(e) => Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(&e.to_string())),
            )),
        }
    }
}

pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_static("Bearer abc123def456"),
        );
        assert_eq!(
            extract_bearer_token(&headers),
            Some("abc123def456".to_string())
        );
    }

    #[test]
    fn missing_or_malformed_header_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic xyz"));
        assert_eq!(extract_bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
