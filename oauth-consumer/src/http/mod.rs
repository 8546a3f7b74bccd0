//! HTTP client building and JSON response handling.

mod client;
mod json;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use json::{JsonObject, JsonResponse, ProviderError};

pub(crate) use json::read_json;
