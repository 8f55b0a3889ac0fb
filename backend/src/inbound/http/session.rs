//! Bearer-token session extraction.
//!
//! Handlers receive a [`SessionContext`] holding the decoded caller, if any.
//! A missing, malformed or expired token yields an anonymous context rather
//! than a rejection; guarded operations report the missing login.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::SessionUser;

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity decoded from the `Authorization` header.
#[derive(Debug, Clone, Default)]
pub struct SessionContext(Option<SessionUser>);

impl SessionContext {
    pub fn user(&self) -> Option<&SessionUser> {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Option<SessionUser> {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}

fn decode_session(req: &HttpRequest) -> Option<SessionUser> {
    let token = bearer_token(req)?;
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        debug!("bearer token ignored: no token issuer configured");
        return None;
    };
    match state.tokens.decode(token) {
        Ok(user) => Some(user),
        Err(error) => {
            debug!(error = %error, "invalid bearer token; treating request as anonymous");
            None
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(decode_session(req))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockTokenIssuer;
    use crate::domain::{Error, UserId, Username};
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use std::sync::Arc;

    fn alice() -> SessionUser {
        SessionUser::new(UserId::random(), Username::new("alice").expect("username"))
    }

    fn state_decoding_to(user: SessionUser) -> web::Data<HttpState> {
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_decode()
            .returning(move |token| match token {
                "good" => Ok(user.clone()),
                _ => Err(Error::unauthenticated("Invalid or expired token")),
            });
        web::Data::new(HttpState::for_tests(Arc::new(tokens)))
    }

    async fn extract(req: HttpRequest) -> SessionContext {
        SessionContext::from_request(&req, &mut Payload::None)
            .await
            .expect("extraction is infallible")
    }

    #[rstest]
    #[actix_web::test]
    async fn valid_bearer_token_yields_user() {
        let user = alice();
        let req = TestRequest::default()
            .app_data(state_decoding_to(user.clone()))
            .insert_header((AUTHORIZATION, "Bearer good"))
            .to_http_request();
        assert_eq!(extract(req).await.user(), Some(&user));
    }

    #[rstest]
    #[case::bad_token("Bearer forged")]
    #[case::wrong_scheme("Basic Zm9vOmJhcg==")]
    #[case::empty_token("Bearer ")]
    #[actix_web::test]
    async fn unusable_headers_are_anonymous(#[case] header: &str) {
        let req = TestRequest::default()
            .app_data(state_decoding_to(alice()))
            .insert_header((AUTHORIZATION, header))
            .to_http_request();
        assert!(extract(req).await.user().is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_header_is_anonymous() {
        let req = TestRequest::default()
            .app_data(state_decoding_to(alice()))
            .to_http_request();
        assert!(extract(req).await.into_inner().is_none());
    }
}
