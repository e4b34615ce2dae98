mod session_verifier;

#[cfg(test)]
pub(crate) use session_verifier::MockSessionVerifier;
pub(crate) use session_verifier::{SessionVerifier, TokenSessionVerifier};

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Auth(#[from] portico_token::auth::error::AuthError),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
