use serde::Serialize;

use crate::application::site::SiteData;

#[derive(Serialize, Debug)]
pub(crate) struct GetSiteResponse {
    name: String,
    description: String,
    locale: String,
}

impl From<&SiteData> for GetSiteResponse {
    fn from(value: &SiteData) -> Self {
        Self { name: value.name.clone(), description: value.description.clone(), locale: value.locale.clone() }
    }
}
