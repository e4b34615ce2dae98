use std::collections::HashMap;

mod organization_service;

#[cfg(test)]
pub(crate) use organization_service::MockOrganizationService;
pub(crate) use organization_service::{OrganizationService, OrganizationServiceImpl};

/// A tenant entity with a member-role mapping. A user may only be treated as
/// "current" for an organization whose members map contains their id as a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Organization {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub members: HashMap<String, Member>,
}

impl Organization {
    pub fn new(id: String, name: String, logo_url: Option<String>, members: HashMap<String, Member>) -> Self {
        Self { id, name, logo_url, members }
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.contains_key(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Member {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Role {
    Owner,
    Admin,
    Member,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "owner" => Role::Owner,
            "admin" => Role::Admin,
            _ => Role::Member,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Owner => "owner".to_string(),
            Role::Admin => "admin".to_string(),
            Role::Member => "member".to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
