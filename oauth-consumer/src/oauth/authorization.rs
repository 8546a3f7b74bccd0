//! Authorization URL generation and redirect callback parsing.

use url::Url;

use crate::error::Error;

/// Literal separator placed between scope entries. It is an already-encoded space and
/// is never encoded a second time.
pub const SCOPE_SEPARATOR: &str = "%20";

/// Parameters for the first leg of the authorization code flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequestParams {
    /// Provider authorization endpoint, without a query string.
    pub authorization_endpoint: String,
    /// Your OAuth client ID.
    pub client_id: String,
    /// Where the provider sends the user back.
    pub redirect_uri: String,
    /// Requested scopes, in order.
    pub scope: Vec<String>,
    /// Usually `"code"`.
    pub response_type: String,
}

impl AuthRequestParams {
    /// Create request parameters with `response_type=code`.
    pub fn new<S: Into<String>>(
        authorization_endpoint: &str,
        client_id: &str,
        redirect_uri: &str,
        scope: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            authorization_endpoint: authorization_endpoint.to_string(),
            client_id: client_id.to_string(),
            redirect_uri: redirect_uri.to_string(),
            scope: scope.into_iter().map(Into::into).collect(),
            response_type: "code".to_string(),
        }
    }

    /// Override the response type.
    pub fn with_response_type(mut self, response_type: &str) -> Self {
        self.response_type = response_type.to_string();
        self
    }
}

/// Build the URL to send the end user to.
///
/// Values are concatenated literally, so `redirect_uri` and `client_id` must already be
/// URL-safe. Use [`build_authorization_url_encoded`] when they may not be. An empty
/// scope list is not rejected and yields `scope=` with no value.
///
/// ```
/// use oauth_consumer::oauth::{build_authorization_url, AuthRequestParams};
///
/// let params = AuthRequestParams::new(
///     "https://accounts.example.com/o/oauth2/auth",
///     "my-client",
///     "https://app.example.com/callback",
///     ["email", "profile"],
/// );
/// assert_eq!(
///     build_authorization_url(&params),
///     "https://accounts.example.com/o/oauth2/auth?response_type=code\
///      &redirect_uri=https://app.example.com/callback&client_id=my-client\
///      &scope=email%20profile"
/// );
/// ```
pub fn build_authorization_url(params: &AuthRequestParams) -> String {
    format!(
        "{}?response_type={}&redirect_uri={}&client_id={}&scope={}",
        params.authorization_endpoint,
        params.response_type,
        params.redirect_uri,
        params.client_id,
        params.scope.join(SCOPE_SEPARATOR)
    )
}

/// Same layout as [`build_authorization_url`], with every value percent-encoded.
///
/// Each scope entry is encoded on its own and the entries are still joined with
/// [`SCOPE_SEPARATOR`].
pub fn build_authorization_url_encoded(params: &AuthRequestParams) -> String {
    let scope = params
        .scope
        .iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join(SCOPE_SEPARATOR);

    format!(
        "{}?response_type={}&redirect_uri={}&client_id={}&scope={}",
        params.authorization_endpoint,
        urlencoding::encode(&params.response_type),
        urlencoding::encode(&params.redirect_uri),
        urlencoding::encode(&params.client_id),
        scope
    )
}

/// What the provider appended to the redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationCallback {
    /// The user consented; exchange this code for a token.
    Code(String),
    /// The provider reported an error (e.g. `access_denied`).
    Denied {
        error: String,
        description: Option<String>,
    },
    /// Neither `code` nor `error` was present.
    Missing,
}

/// Parse the URL the provider redirected back to.
///
/// Only `code`, `error` and `error_description` are read. Any `state` parameter is left
/// to the caller.
pub fn parse_authorization_callback(redirected_url: &str) -> Result<AuthorizationCallback, Error> {
    let url = Url::parse(redirected_url)?;

    let mut code = None;
    let mut error = None;
    let mut description = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => description = Some(value.into_owned()),
            _ => {}
        }
    }

    Ok(match (error, code) {
        (Some(error), _) => AuthorizationCallback::Denied { error, description },
        (None, Some(code)) => AuthorizationCallback::Code(code),
        (None, None) => AuthorizationCallback::Missing,
    })
}
