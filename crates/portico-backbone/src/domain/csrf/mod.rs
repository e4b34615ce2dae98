use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_EXPIRATION_SECS: u64 = 3600;

/// Double-submit CSRF tokens: `<hmac>.<timestamp>.<nonce>`, handed to the
/// client in the props bundle and as a cookie, presented back on
/// state-changing requests.
#[derive(Clone)]
pub(crate) struct CsrfSigner {
    secret: String,
}

impl CsrfSigner {
    pub(crate) fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    pub(crate) fn generate(&self) -> String {
        let timestamp = unix_timestamp();
        let nonce = hex::encode(rand::random::<[u8; 16]>());
        let signature = self.sign(&format!("{timestamp}.{nonce}"));

        format!("{signature}.{timestamp}.{nonce}")
    }

    pub(crate) fn verify(&self, token: &str) -> bool {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return false;
        }

        let (signature, timestamp, nonce) = (parts[0], parts[1], parts[2]);

        let Ok(timestamp_secs) = timestamp.parse::<u64>() else {
            return false;
        };

        if timestamp_secs + TOKEN_EXPIRATION_SECS < unix_timestamp() {
            return false;
        }

        let expected = self.sign(&format!("{timestamp}.{nonce}"));

        signature.as_bytes().ct_eq(expected.as_bytes()).into()
    }

    fn sign(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC can take key of any size");
        mac.update(message.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).expect("system clock before unix epoch").as_secs()
}
