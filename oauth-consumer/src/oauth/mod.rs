//! OAuth 2.0 authorization code flow.
//!
//! The three legs of the flow:
//! 1. [`build_authorization_url`] produces the URL the end user's browser visits.
//! 2. [`Client::exchange_code_for_token`] trades the returned code for a token.
//! 3. [`Client::fetch_authorized_resource`] calls a protected endpoint with that token.

mod authorization;
mod client;
mod providers;
mod resource;
mod token;

pub use authorization::{
    build_authorization_url, build_authorization_url_encoded, parse_authorization_callback,
    AuthRequestParams, AuthorizationCallback, SCOPE_SEPARATOR,
};
pub use client::Client;
pub use providers::{
    ProviderEndpoints, GOOGLE_AUTHORIZATION_ENDPOINT, GOOGLE_RESOURCE_ENDPOINT,
    GOOGLE_TOKEN_ENDPOINT,
};
pub use resource::{fetch_authorized_resource, ResourceResponse, TokenTransport};
pub use token::{exchange_code_for_token, TokenExchangeParams, TokenResponse};

use log::warn;

use crate::error::Error;

/// Run the caller's failure hook for an `Err`, then hand the error back unchanged.
pub(crate) fn notify_on_failure<T, F: FnOnce()>(
    result: Result<T, Error>,
    on_fail: F,
    operation: &str,
) -> Result<T, Error> {
    result.map_err(|err| {
        warn!("{} failed: {}", operation, err);
        on_fail();
        err
    })
}
