use josekit::{jwt::JwtPayload, Value};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::JWTError;

pub const EMAIL_CLAIM: &str = "email";
pub const EMAIL_VERIFIED_CLAIM: &str = "email_verified";
pub const SIGN_IN_PROVIDER_CLAIM: &str = "sip";

#[derive(Debug, Clone, Serialize)]
pub struct SessionClaim {
    pub uid: String,
    pub email: String,
    pub email_verified: bool,
    pub sign_in_provider: SignInProvider,
}

impl TryFrom<&JwtPayload> for SessionClaim {
    type Error = JWTError;

    fn try_from(payload: &JwtPayload) -> Result<Self, Self::Error> {
        let uid = payload.subject().ok_or(JWTError::MissingClaim("sub"))?.to_string();
        let email = match payload.claim(EMAIL_CLAIM).ok_or(JWTError::MissingClaim(EMAIL_CLAIM))? {
            Value::String(ref s) => s.clone(),
            _ => return Err(JWTError::InvalidJwtFormat("email is not a string".to_string())),
        };
        let email_verified =
            match payload.claim(EMAIL_VERIFIED_CLAIM).ok_or(JWTError::MissingClaim(EMAIL_VERIFIED_CLAIM))? {
                Value::Bool(b) => *b,
                _ => return Err(JWTError::InvalidJwtFormat("email_verified is not a boolean".to_string())),
            };
        let sign_in_provider =
            match payload.claim(SIGN_IN_PROVIDER_CLAIM).ok_or(JWTError::MissingClaim(SIGN_IN_PROVIDER_CLAIM))? {
                Value::String(ref s) => SignInProvider::from(s.clone()),
                _ => return Err(JWTError::InvalidJwtFormat("sip is not a string".to_string())),
            };

        Ok(SessionClaim { uid, email, email_verified, sign_in_provider })
    }
}

/// The identity provider a session was established with. Only `Password`
/// sessions participate in the email-verification gate.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "String")]
pub enum SignInProvider {
    Password,
    Google,
    EmailLink,
    Other(String),
}

impl From<String> for SignInProvider {
    fn from(s: String) -> Self {
        match s.as_str() {
            "password" => SignInProvider::Password,
            "google.com" => SignInProvider::Google,
            "emailLink" => SignInProvider::EmailLink,
            _ => SignInProvider::Other(s),
        }
    }
}

impl From<SignInProvider> for String {
    fn from(provider: SignInProvider) -> Self {
        match provider {
            SignInProvider::Password => "password".to_string(),
            SignInProvider::Google => "google.com".to_string(),
            SignInProvider::EmailLink => "emailLink".to_string(),
            SignInProvider::Other(s) => s,
        }
    }
}

impl Serialize for SignInProvider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&String::from(self.clone()))
    }
}

#[cfg(test)]
mod test {
    use josekit::jwt::JwtPayload;
    use serde_json::json;

    use super::{SessionClaim, SignInProvider};

    fn payload_with(email_verified: bool, provider: &str) -> JwtPayload {
        let mut payload = JwtPayload::new();
        payload.set_subject("user_1");
        payload.set_claim("email", Some(json!("one@example.com"))).unwrap();
        payload.set_claim("email_verified", Some(json!(email_verified))).unwrap();
        payload.set_claim("sip", Some(json!(provider))).unwrap();
        payload
    }

    #[test]
    fn when_payload_carries_all_claims_then_session_claim_is_parsed() {
        let claim = SessionClaim::try_from(&payload_with(true, "password")).expect("claim should parse");

        assert_eq!(claim.uid, "user_1");
        assert_eq!(claim.email, "one@example.com");
        assert!(claim.email_verified);
        assert_eq!(claim.sign_in_provider, SignInProvider::Password);
    }

    #[test]
    fn when_provider_is_unknown_then_it_is_preserved_as_other() {
        let claim = SessionClaim::try_from(&payload_with(true, "github.com")).expect("claim should parse");

        assert_eq!(claim.sign_in_provider, SignInProvider::Other("github.com".to_string()));
    }

    #[test]
    fn when_subject_is_missing_then_parsing_fails() {
        let mut payload = JwtPayload::new();
        payload.set_claim("email", Some(json!("one@example.com"))).unwrap();
        payload.set_claim("email_verified", Some(json!(true))).unwrap();
        payload.set_claim("sip", Some(json!("password"))).unwrap();

        assert!(SessionClaim::try_from(&payload).is_err());
    }
}
