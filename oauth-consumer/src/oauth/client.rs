//! OAuth consumer client holding the shared HTTP transport.

use crate::error::{client_builder_error, Error};
use crate::http::{HttpClient, HttpClientBuilder, HttpClientConfig};

/// Performs the network legs of the authorization code flow.
///
/// The client is stateless apart from the HTTP transport and may be cloned and shared
/// between threads.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) http_client: HttpClient,
}

impl Client {
    /// Create a client with the default HTTP configuration.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a client from an explicit HTTP configuration.
    pub fn with_config(config: HttpClientConfig) -> Result<Self, Error> {
        let http_client = HttpClientBuilder::from_config(config)
            .build()
            .map_err(client_builder_error)?;
        Ok(Self { http_client })
    }

    /// Wrap an already configured HTTP client.
    pub fn with_http_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }
}
