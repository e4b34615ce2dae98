use josekit::jwk::Jwk;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Key id assumed when a token carries no `kid` header. Single-key JWK sets
/// published by the identity platform omit it.
pub const JWK_SET_DEFAULT_KEY_ID: &str = "default";

#[derive(Debug, Clone)]
pub struct JwkSet {
    keys: Vec<Jwk>,
}

impl JwkSet {
    pub fn new(keys: Vec<Jwk>) -> Self {
        Self { keys }
    }

    pub fn get(&self, kid: &str) -> Option<&Jwk> {
        let matched = self.keys.iter().find(|key| key.key_id() == Some(kid));

        if matched.is_none() && kid == JWK_SET_DEFAULT_KEY_ID {
            return self.keys.first();
        }

        matched
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<'de> Deserialize<'de> for JwkSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawJwkSet {
            keys: Vec<Map<String, Value>>,
        }

        let raw = RawJwkSet::deserialize(deserializer)?;
        let keys = raw
            .keys
            .into_iter()
            .map(Jwk::from_map)
            .collect::<Result<Vec<_>, _>>()
            .map_err(serde::de::Error::custom)?;

        Ok(JwkSet { keys })
    }
}
