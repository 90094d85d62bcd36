//! Caller identity extractor for axum.
//!
//! Authentication happens upstream. The gateway forwards the authenticated
//! user in the `x-user-id` header and, optionally, a request id in
//! `x-request-id`. Handlers take a [`RequireUser`] to get both.
//!
//! ```ignore
//! async fn my_handler(RequireUser(caller): RequireUser) -> impl IntoResponse {
//!     format!("Hello, {}!", caller.user_id)
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{CommandMetadata, UserId};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the gateway's request id, used as correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The identified caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub request_id: Option<String>,
}

impl Caller {
    /// Command metadata for handlers invoked on behalf of this caller.
    pub fn metadata(&self) -> CommandMetadata {
        let metadata = CommandMetadata::new(self.user_id.clone()).with_source("api");
        match &self.request_id {
            Some(id) => metadata.with_correlation_id(id.clone()),
            None => metadata,
        }
    }
}

/// Extractor that requires a caller identity.
///
/// Missing, blank, or non-UTF-8 `x-user-id` headers are rejected with 401.
#[derive(Debug, Clone)]
pub struct RequireUser(pub Caller);

impl<S> axum::extract::FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = CallerRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get(USER_ID_HEADER)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| UserId::new(h.trim()).ok())
                .ok_or(CallerRejection::Unidentified)?;

            let request_id = parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string);

            Ok(RequireUser(Caller {
                user_id,
                request_id,
            }))
        })
    }
}

/// Rejection type for requests without a caller identity.
#[derive(Debug, Clone)]
pub enum CallerRejection {
    Unidentified,
}

impl IntoResponse for CallerRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CallerRejection::Unidentified => (StatusCode::UNAUTHORIZED, "Authentication required"),
        };

        (
            status,
            Json(serde_json::json!({
                "code": "UNAUTHENTICATED",
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<RequireUser, CallerRejection> {
        let (mut parts, _body) = request.into_parts();
        RequireUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_user_and_request_id() {
        let request = Request::builder()
            .uri("/test")
            .header(USER_ID_HEADER, "user-42")
            .header(REQUEST_ID_HEADER, "req-7")
            .body(())
            .unwrap();

        let RequireUser(caller) = extract(request).await.unwrap();

        assert_eq!(caller.user_id.as_str(), "user-42");
        assert_eq!(caller.metadata().correlation_id(), "req-7");
        assert_eq!(caller.metadata().source(), Some("api"));
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let request = Request::builder().uri("/test").body(()).unwrap();

        assert!(matches!(
            extract(request).await,
            Err(CallerRejection::Unidentified)
        ));
    }

    #[tokio::test]
    async fn blank_header_is_rejected() {
        let request = Request::builder()
            .uri("/test")
            .header(USER_ID_HEADER, "   ")
            .body(())
            .unwrap();

        assert!(extract(request).await.is_err());
    }

    #[test]
    fn rejection_returns_401() {
        let response = CallerRejection::Unidentified.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
