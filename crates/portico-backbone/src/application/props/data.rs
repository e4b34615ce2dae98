use std::collections::HashMap;

use portico_token::claim::SessionClaim;
use serde_json::{Map, Value};
use url::Url;

use crate::domain::{organization::Organization, user::User};

pub(crate) struct SessionData {
    pub uid: String,
    pub email: String,
    pub email_verified: bool,
    pub sign_in_provider: String,
}

impl From<SessionClaim> for SessionData {
    fn from(value: SessionClaim) -> Self {
        Self {
            uid: value.uid,
            email: value.email,
            email_verified: value.email_verified,
            sign_in_provider: value.sign_in_provider.into(),
        }
    }
}

pub(crate) struct UserData {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl From<User> for UserData {
    fn from(value: User) -> Self {
        Self { id: value.id, email: value.email, display_name: value.display_name, photo_url: value.photo_url }
    }
}

pub(crate) struct OrganizationData {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub members: HashMap<String, MemberData>,
}

pub(crate) struct MemberData {
    pub user_id: String,
    pub role: String,
}

impl From<Organization> for OrganizationData {
    fn from(value: Organization) -> Self {
        Self {
            id: value.id,
            name: value.name,
            logo_url: value.logo_url,
            members: value
                .members
                .into_iter()
                .map(|(user_id, member)| (user_id, MemberData { user_id: member.user_id, role: member.role.into() }))
                .collect(),
        }
    }
}

pub(crate) struct UiStateData {
    pub theme: String,
    pub sidebar_state: String,
}

pub(crate) struct AppPropsData {
    pub session: SessionData,
    pub user: UserData,
    pub organization: OrganizationData,
    pub csrf_token: String,
    pub strings: HashMap<String, Map<String, Value>>,
    pub ui: UiStateData,
}

pub(crate) struct SignOutRedirectData {
    pub destination: String,
}

impl SignOutRedirectData {
    /// Builds the sign-in redirect, carrying the original destination as a
    /// pathname-only `returnUrl` so the user can resume after
    /// re-authenticating. `signOut=true` tells the client to drop its own
    /// session state as well.
    pub(crate) fn new(sign_in_path: &str, return_url: &str, needs_email_verification: bool) -> Self {
        let return_path = path_from_return_url(return_url);

        let mut destination = format!("{sign_in_path}?returnUrl={}", urlencoding::encode(&return_path));
        if needs_email_verification {
            destination.push_str("&needsEmailVerification=true");
        }
        destination.push_str("&signOut=true");

        Self { destination }
    }
}

fn path_from_return_url(return_url: &str) -> String {
    match Url::parse(return_url) {
        Ok(url) => url.path().to_owned(),
        Err(_) => {
            let path = return_url.split('?').next().unwrap_or_default();
            if path.is_empty() {
                "/".to_owned()
            } else {
                path.to_owned()
            }
        }
    }
}

pub(crate) enum PageOutcome {
    Props(Box<AppPropsData>),
    SignOut(SignOutRedirectData),
}

#[cfg(test)]
mod test {
    use super::SignOutRedirectData;

    #[test]
    fn when_return_url_is_a_relative_path_then_its_query_string_is_stripped() {
        let redirect = SignOutRedirectData::new("/auth/sign-in", "/dashboard?tab=settings", false);

        assert_eq!(redirect.destination, "/auth/sign-in?returnUrl=%2Fdashboard&signOut=true");
    }

    #[test]
    fn when_return_url_is_absolute_then_only_its_pathname_is_kept() {
        let redirect = SignOutRedirectData::new("/auth/sign-in", "https://app.example.com/dashboard?tab=a", false);

        assert_eq!(redirect.destination, "/auth/sign-in?returnUrl=%2Fdashboard&signOut=true");
    }

    #[test]
    fn when_return_url_is_empty_then_the_root_path_is_used() {
        let redirect = SignOutRedirectData::new("/auth/sign-in", "", false);

        assert_eq!(redirect.destination, "/auth/sign-in?returnUrl=%2F&signOut=true");
    }

    #[test]
    fn when_email_verification_is_needed_then_the_flag_is_appended() {
        let redirect = SignOutRedirectData::new("/auth/sign-in", "/dashboard", true);

        assert_eq!(
            redirect.destination,
            "/auth/sign-in?returnUrl=%2Fdashboard&needsEmailVerification=true&signOut=true"
        );
    }
}
