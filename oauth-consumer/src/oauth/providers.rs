//! Well-known provider endpoints.

use super::AuthRequestParams;

pub const GOOGLE_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_RESOURCE_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v1/userinfo";

/// The three endpoints used by the authorization code flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub resource_endpoint: String,
}

impl ProviderEndpoints {
    /// Google accounts, with the OpenID userinfo endpoint as the protected resource.
    pub fn google() -> Self {
        Self {
            authorization_endpoint: GOOGLE_AUTHORIZATION_ENDPOINT.to_string(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
            resource_endpoint: GOOGLE_RESOURCE_ENDPOINT.to_string(),
        }
    }

    /// Authorization request parameters aimed at this provider.
    pub fn auth_request<S: Into<String>>(
        &self,
        client_id: &str,
        redirect_uri: &str,
        scope: impl IntoIterator<Item = S>,
    ) -> AuthRequestParams {
        AuthRequestParams::new(&self.authorization_endpoint, client_id, redirect_uri, scope)
    }
}
