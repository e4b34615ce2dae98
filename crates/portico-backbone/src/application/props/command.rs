/// Request-scoped inputs to the props pipeline, read from the inbound
/// request's cookies and URI by the server layer.
pub(crate) struct PagePropsCommand {
    pub session_token: Option<String>,
    pub organization_hint: Option<String>,
    pub theme: Option<String>,
    pub sidebar_state: Option<String>,
    pub resolved_url: String,
    pub locale: Option<String>,
}
