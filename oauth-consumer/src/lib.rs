//! # oauth-consumer
//!
//! Helpers for the consumer side of the OAuth 2.0 authorization code flow:
//! - Authorization URL generation for the end user's browser
//! - Authorization code exchange for a token
//! - Protected resource retrieval with the token
//! - An authorization gate that guards arbitrary operations
//!
//! All network calls are blocking and make exactly one request. Responses are returned
//! as open JSON mappings; no key such as `access_token` is assumed to exist.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oauth_consumer::oauth::{build_authorization_url, Client, ProviderEndpoints, TokenExchangeParams};
//!
//! let endpoints = ProviderEndpoints::google();
//! let url = build_authorization_url(&endpoints.auth_request(client_id, redirect_uri, ["email"]));
//! // ... user consents, provider redirects back with `code` ...
//! let client = Client::new()?;
//! let token = client.exchange_code_for_token(params, || eprintln!("exchange failed"))?;
//! let access_token = token.token("access_token");
//! ```

pub mod error;
pub mod gate;
pub mod http;
pub mod oauth;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
pub use gate::{authorization_gate, AuthorizationGate};
pub use oauth::{
    build_authorization_url, fetch_authorized_resource, exchange_code_for_token, Client,
};
