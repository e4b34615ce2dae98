use portico_token::claim::SessionClaim;
use serde::Serialize;

use crate::application::props::data::UserData;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetSessionResponse {
    uid: String,
    email: String,
    email_verified: bool,
    sign_in_provider: String,
    user: SessionUserResponse,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SessionUserResponse {
    id: String,
    email: String,
    display_name: Option<String>,
    photo_url: Option<String>,
}

impl GetSessionResponse {
    pub(crate) fn new(claim: SessionClaim, user: UserData) -> Self {
        Self {
            uid: claim.uid,
            email: claim.email,
            email_verified: claim.email_verified,
            sign_in_provider: claim.sign_in_provider.into(),
            user: SessionUserResponse {
                id: user.id,
                email: user.email,
                display_name: user.display_name,
                photo_url: user.photo_url,
            },
        }
    }
}
