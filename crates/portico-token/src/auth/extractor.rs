use axum::extract::Request;
use std::{borrow::Cow, sync::Arc};

use super::error::AuthError;

pub type ExtractedToken<'a> = Cow<'a, str>;

pub trait TokenExtractor: Send + Sync + std::fmt::Debug {
    fn extract<'a>(&self, request: &'a Request) -> Result<ExtractedToken<'a>, AuthError>;
}

#[derive(Debug, Clone, Default)]
pub struct AuthHeaderTokenExtractor;

impl TokenExtractor for AuthHeaderTokenExtractor {
    fn extract<'a>(&self, request: &'a Request) -> Result<ExtractedToken<'a>, AuthError> {
        request
            .headers()
            .get("authorization")
            .ok_or(AuthError::MissingAuthorizationHeader)?
            .to_str()
            .map_err(|err| AuthError::InvalidAuthorizationHeader(err.to_string()))?
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MissingBearerToken)
            .map(Cow::Borrowed)
    }
}

/// Reads the session token from a cookie. This is the inbound transport for
/// server-rendered pages and same-origin API calls, where the browser attaches
/// the identity platform's session cookie on every request.
#[derive(Debug, Clone)]
pub struct SessionCookieTokenExtractor {
    cookie_name: Cow<'static, str>,
}

impl SessionCookieTokenExtractor {
    pub fn new(cookie_name: impl Into<Cow<'static, str>>) -> Self {
        Self { cookie_name: cookie_name.into() }
    }
}

impl TokenExtractor for SessionCookieTokenExtractor {
    fn extract<'a>(&self, request: &'a Request) -> Result<ExtractedToken<'a>, AuthError> {
        for header in request.headers().get_all("cookie") {
            let header = header.to_str().map_err(|err| AuthError::InvalidCookieHeader(err.to_string()))?;

            for pair in header.split(';') {
                let Some((name, value)) = pair.trim().split_once('=') else {
                    continue;
                };

                if name == self.cookie_name {
                    return Ok(Cow::Borrowed(value));
                }
            }
        }

        Err(AuthError::MissingSessionCookie)
    }
}

pub(crate) fn extract_jwt(
    request: &Request<axum::body::Body>,
    extractor: Arc<dyn TokenExtractor>,
) -> Option<ExtractedToken<'_>> {
    match extractor.extract(request) {
        Ok(jwt) => Some(jwt),
        Err(err) => {
            tracing::debug!(?extractor, ?err, "Extractor failed");
            None
        }
    }
}

#[cfg(test)]
mod test {
    use axum::{body::Body, http::Request};

    use super::{AuthHeaderTokenExtractor, SessionCookieTokenExtractor, TokenExtractor};
    use crate::auth::error::AuthError;

    #[test]
    fn when_bearer_token_is_present_then_header_extractor_returns_it() {
        let request =
            Request::builder().header("authorization", "Bearer token_1").body(Body::empty()).expect("request");

        let token = AuthHeaderTokenExtractor.extract(&request).expect("token should be extracted");

        assert_eq!(token, "token_1");
    }

    #[test]
    fn when_authorization_header_is_missing_then_header_extractor_fails() {
        let request = Request::builder().body(Body::empty()).expect("request");

        let result = AuthHeaderTokenExtractor.extract(&request);

        assert!(matches!(result, Err(AuthError::MissingAuthorizationHeader)));
    }

    #[test]
    fn when_session_cookie_is_present_then_cookie_extractor_returns_it() {
        let request = Request::builder()
            .header("cookie", "theme=dark; sessionToken=token_1; sidebarState=expanded")
            .body(Body::empty())
            .expect("request");

        let token =
            SessionCookieTokenExtractor::new("sessionToken").extract(&request).expect("token should be extracted");

        assert_eq!(token, "token_1");
    }

    #[test]
    fn when_session_cookie_is_missing_then_cookie_extractor_fails() {
        let request = Request::builder().header("cookie", "theme=dark").body(Body::empty()).expect("request");

        let result = SessionCookieTokenExtractor::new("sessionToken").extract(&request);

        assert!(matches!(result, Err(AuthError::MissingSessionCookie)));
    }
}
