mod user_service;

#[cfg(test)]
pub(crate) use user_service::MockUserService;
pub(crate) use user_service::{UserService, UserServiceImpl};

/// Application-level user profile. Keyed by the identity platform's uid;
/// a verified session without a matching profile row is an inconsistent state
/// the pipeline treats as an authentication failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct User {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl User {
    pub fn new(id: String, email: String, display_name: Option<String>, photo_url: Option<String>) -> Self {
        Self { id, email, display_name, photo_url }
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
