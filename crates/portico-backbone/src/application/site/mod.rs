use crate::config::SiteConfig;

/// Public site metadata served to the landing shell.
#[derive(Debug, Clone)]
pub(crate) struct SiteData {
    pub name: String,
    pub description: String,
    pub locale: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(value: &SiteConfig) -> Self {
        Self { name: value.name.clone(), description: value.description.clone(), locale: value.locale.clone() }
    }
}
