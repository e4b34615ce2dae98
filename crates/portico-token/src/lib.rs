pub use josekit::{jws::JwsHeader, jwt::JwtPayload, Map, Value};
pub mod auth;
pub mod claim;
pub mod error;
pub mod jwk;
pub mod jwt;
