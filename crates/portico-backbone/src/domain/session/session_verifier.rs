use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use portico_token::{
    auth::{error::AuthError, jwks_discovery::JwksDiscovery, layer::PorticoAuthLayer},
    claim::SessionClaim,
};

use super::Result;

#[cfg_attr(test, automock)]
#[async_trait]
pub(crate) trait SessionVerifier {
    async fn verify<'a>(&self, session_token: Option<&'a str>) -> Result<SessionClaim>;
}

/// Verifies the identity platform's session JWT against its published JWK
/// set. Verification failure is never transient here; callers redirect
/// instead of retrying.
pub(crate) struct TokenSessionVerifier {
    layer: PorticoAuthLayer,
}

impl TokenSessionVerifier {
    pub(crate) fn new(jwk_discovery: Arc<dyn JwksDiscovery + Send + Sync>) -> Self {
        Self { layer: PorticoAuthLayer::builder().jwk_discovery(jwk_discovery).build() }
    }
}

#[async_trait]
impl SessionVerifier for TokenSessionVerifier {
    async fn verify<'a>(&self, session_token: Option<&'a str>) -> Result<SessionClaim> {
        let token = session_token.ok_or(AuthError::MissingToken)?;
        let jwt = self.layer.validate_token(token).await?;
        let claim = SessionClaim::try_from(jwt.payload()).map_err(AuthError::ParseClaim)?;

        Ok(claim)
    }
}

#[cfg(test)]
mod test {
    use std::{
        sync::Arc,
        time::{Duration, SystemTime},
    };

    use base64::engine::general_purpose::URL_SAFE_NO_PAD as base64_engine;
    use base64::Engine;
    use josekit::{jwk::Jwk, jws::JwsHeader, jws::HS256, jwt::JwtPayload, Value};
    use portico_token::{
        auth::{error::AuthError, jwks_discovery::StaticJwksDiscovery},
        claim::SignInProvider,
        jwk::jwk_set::JwkSet,
    };
    use serde_json::json;

    use super::{SessionVerifier, TokenSessionVerifier};
    use crate::domain::session::Error;

    fn oct_jwk(kid: &str) -> Jwk {
        let mut jwk = Jwk::new("oct");
        jwk.set_algorithm("HS256");
        jwk.set_key_id(kid);
        jwk.set_parameter("k", Some(Value::String(base64_engine.encode(b"0123456789abcdef0123456789abcdef"))))
            .expect("k parameter");
        jwk
    }

    fn session_token(jwk: &Jwk) -> String {
        let mut header = JwsHeader::new();
        header.set_token_type("JWT");
        header.set_key_id("kid_1");

        let mut payload = JwtPayload::new();
        payload.set_subject("user_1");
        payload.set_expires_at(&(SystemTime::now() + Duration::from_secs(3600)));
        payload.set_claim("email", Some(json!("one@example.com"))).expect("email claim");
        payload.set_claim("email_verified", Some(json!(false))).expect("email_verified claim");
        payload.set_claim("sip", Some(json!("password"))).expect("sip claim");

        let signer = HS256.signer_from_jwk(jwk).expect("signer");
        josekit::jwt::encode_with_signer(&payload, &header, &signer).expect("signed token")
    }

    fn verifier_with(jwk: Jwk) -> TokenSessionVerifier {
        TokenSessionVerifier::new(Arc::new(StaticJwksDiscovery::new(JwkSet::new(vec![jwk]))))
    }

    #[tokio::test]
    async fn when_session_token_is_valid_then_claims_are_returned() {
        let jwk = oct_jwk("kid_1");
        let token = session_token(&jwk);

        let claim = verifier_with(jwk).verify(Some(&token)).await.expect("verification should be successful");

        assert_eq!(claim.uid, "user_1");
        assert!(!claim.email_verified);
        assert_eq!(claim.sign_in_provider, SignInProvider::Password);
    }

    #[tokio::test]
    async fn when_session_token_is_absent_then_verification_fails() {
        let result = verifier_with(oct_jwk("kid_1")).verify(None).await;

        assert!(matches!(result, Err(Error::Auth(AuthError::MissingToken))));
    }

    #[tokio::test]
    async fn when_session_token_is_garbage_then_verification_fails() {
        let result = verifier_with(oct_jwk("kid_1")).verify(Some("not.a.jwt")).await;

        assert!(matches!(result, Err(Error::Auth(AuthError::DecodeJwt(_)))));
    }
}
