//! Caller identity extractor.
//!
//! Authentication happens upstream; the identity layer forwards the user
//! name in the [`ACTOR_HEADER`] header. Requests without it are anonymous.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the authenticated user name.
pub const ACTOR_HEADER: &str = "x-user-name";

/// The calling user's name, if the identity layer supplied one.
///
/// ```ignore
/// async fn handler(actor: Actor) -> impl IntoResponse {
///     let who = actor.name();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor(pub Option<String>);

impl Actor {
    /// Returns the user name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use rstest::rstest;

    async fn extract(header: Option<&str>) -> Actor {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(ACTOR_HEADER, value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        Actor::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[rstest]
    #[case(Some("alice"), Some("alice"))]
    #[case(Some("  bob "), Some("bob"))]
    #[case(Some(""), None)]
    #[case(None, None)]
    #[tokio::test]
    async fn test_actor_from_header(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(extract(header).await.name(), expected);
    }
}
