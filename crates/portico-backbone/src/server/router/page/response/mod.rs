use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::application::props::data::{AppPropsData, MemberData, OrganizationData, SessionData, UiStateData, UserData};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetDashboardResponse {
    session: SessionResponse,
    user: UserResponse,
    organization: OrganizationResponse,
    csrf_token: String,
    strings: HashMap<String, Map<String, Value>>,
    ui: UiStateResponse,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    uid: String,
    email: String,
    email_verified: bool,
    sign_in_provider: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UserResponse {
    id: String,
    email: String,
    display_name: Option<String>,
    photo_url: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct OrganizationResponse {
    id: String,
    name: String,
    logo_url: Option<String>,
    members: HashMap<String, MemberResponse>,
}

#[derive(Serialize, Debug)]
struct MemberResponse {
    role: String,
    user: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UiStateResponse {
    theme: String,
    sidebar_state: String,
}

impl From<AppPropsData> for GetDashboardResponse {
    fn from(value: AppPropsData) -> Self {
        Self {
            session: value.session.into(),
            user: value.user.into(),
            organization: value.organization.into(),
            csrf_token: value.csrf_token,
            strings: value.strings,
            ui: value.ui.into(),
        }
    }
}

impl From<SessionData> for SessionResponse {
    fn from(value: SessionData) -> Self {
        Self {
            uid: value.uid,
            email: value.email,
            email_verified: value.email_verified,
            sign_in_provider: value.sign_in_provider,
        }
    }
}

impl From<UserData> for UserResponse {
    fn from(value: UserData) -> Self {
        Self { id: value.id, email: value.email, display_name: value.display_name, photo_url: value.photo_url }
    }
}

impl From<OrganizationData> for OrganizationResponse {
    fn from(value: OrganizationData) -> Self {
        Self {
            id: value.id,
            name: value.name,
            logo_url: value.logo_url,
            members: value.members.into_iter().map(|(user_id, member)| (user_id, member.into())).collect(),
        }
    }
}

impl From<MemberData> for MemberResponse {
    fn from(value: MemberData) -> Self {
        Self { role: value.role, user: value.user_id }
    }
}

impl From<UiStateData> for UiStateResponse {
    fn from(value: UiStateData) -> Self {
        Self { theme: value.theme, sidebar_state: value.sidebar_state }
    }
}
