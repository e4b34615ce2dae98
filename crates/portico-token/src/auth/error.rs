use axum::http::StatusCode;
use axum_thiserror::ErrorStatus;
use thiserror::Error;

use crate::error::JWTError;

#[derive(Debug, Error, ErrorStatus)]
pub enum AuthError {
    #[error("Could not retrieve the JWK from the JWK set")]
    #[status(StatusCode::INTERNAL_SERVER_ERROR)]
    NoJwk,

    #[error("Could not fetch the JWK set. Reason: {0}")]
    #[status(StatusCode::INTERNAL_SERVER_ERROR)]
    FetchJwkSet(#[from] reqwest::Error),

    #[error("The 'Authorization' header was not present on a request")]
    #[status(StatusCode::UNAUTHORIZED)]
    MissingAuthorizationHeader,

    #[error("The 'Authorization' header was present on a request but its value could not be parsed. Reason: {0}")]
    #[status(StatusCode::UNAUTHORIZED)]
    InvalidAuthorizationHeader(String),

    #[error("The 'Authorization' header did not contain the expected 'Bearer ...token' format")]
    #[status(StatusCode::UNAUTHORIZED)]
    MissingBearerToken,

    #[error("The session cookie was not present on a request")]
    #[status(StatusCode::UNAUTHORIZED)]
    MissingSessionCookie,

    #[error("The 'Cookie' header was present on a request but its value could not be parsed. Reason: {0}")]
    #[status(StatusCode::UNAUTHORIZED)]
    InvalidCookieHeader(String),

    #[error("A token could not be extracted from the request")]
    #[status(StatusCode::UNAUTHORIZED)]
    MissingToken,

    #[error("The token could not be decoded. Reason: {0}")]
    #[status(StatusCode::UNAUTHORIZED)]
    DecodeJwt(#[source] JWTError),

    #[error("The token could not be verified. Reason: {0}")]
    #[status(StatusCode::UNAUTHORIZED)]
    VerifyJwt(#[source] JWTError),

    #[error("The token has expired")]
    #[status(StatusCode::UNAUTHORIZED)]
    ExpiredJwt,

    #[error("The token claims could not be parsed. Reason: {0}")]
    #[status(StatusCode::UNAUTHORIZED)]
    ParseClaim(#[source] JWTError),
}
