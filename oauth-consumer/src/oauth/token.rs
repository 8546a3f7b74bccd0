//! Authorization code exchange.

use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};

use super::{notify_on_failure, Client};
use crate::error::Error;
use crate::http::{read_json, JsonResponse};

/// Whatever JSON object the token endpoint returned, with its HTTP status.
pub type TokenResponse = JsonResponse;

/// Parameters for exchanging an authorization code.
///
/// Consumed by [`Client::exchange_code_for_token`]; the secret is dropped with it.
#[derive(Debug, Clone)]
pub struct TokenExchangeParams {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_uri: String,
    pub token_endpoint: String,
    pub code: String,
    /// Usually `"authorization_code"`.
    pub grant_type: String,
}

impl TokenExchangeParams {
    /// Create exchange parameters with `grant_type=authorization_code`.
    pub fn new(
        token_endpoint: &str,
        client_id: &str,
        client_secret: SecretString,
        redirect_uri: &str,
        code: &str,
    ) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret,
            redirect_uri: redirect_uri.to_string(),
            token_endpoint: token_endpoint.to_string(),
            code: code.to_string(),
            grant_type: "authorization_code".to_string(),
        }
    }

    /// Override the grant type.
    pub fn with_grant_type(mut self, grant_type: &str) -> Self {
        self.grant_type = grant_type.to_string();
        self
    }
}

impl Client {
    /// Exchange an authorization code for a token.
    ///
    /// Sends one form-encoded POST carrying `code`, `redirect_uri`, `client_id`,
    /// `client_secret` and `grant_type`, then parses the body as a JSON object. The
    /// mapping is returned untouched, whatever the status; check
    /// [`JsonResponse::is_success`] or [`JsonResponse::provider_error`] before reading
    /// a token out of it.
    ///
    /// On any failure `on_fail` runs once before the error is returned.
    pub fn exchange_code_for_token<F: FnOnce()>(
        &self,
        params: TokenExchangeParams,
        on_fail: F,
    ) -> Result<TokenResponse, Error> {
        debug!("Exchanging authorization code at {}", params.token_endpoint);

        let form = [
            ("code", params.code.as_str()),
            ("redirect_uri", params.redirect_uri.as_str()),
            ("client_id", params.client_id.as_str()),
            ("client_secret", params.client_secret.expose_secret().as_str()),
            ("grant_type", params.grant_type.as_str()),
        ];

        let result = self
            .http_client
            .post(&params.token_endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&form)
            .send()
            .map_err(Error::from)
            .and_then(read_json);

        let response = notify_on_failure(result, on_fail, "Token exchange")?;
        info!(
            "Token endpoint answered with status {} ({} keys)",
            response.status,
            response.len()
        );
        Ok(response)
    }
}

/// Exchange a code using a client with default settings.
///
/// Prefer building one [`Client`] and reusing it when making several calls.
pub fn exchange_code_for_token<F: FnOnce()>(
    params: TokenExchangeParams,
    on_fail: F,
) -> Result<TokenResponse, Error> {
    match Client::new() {
        Ok(client) => client.exchange_code_for_token(params, on_fail),
        Err(err) => notify_on_failure(Err(err), on_fail, "Token exchange"),
    }
}
