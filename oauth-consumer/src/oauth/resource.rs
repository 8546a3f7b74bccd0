//! Protected resource retrieval.

use log::{debug, info};

use super::{notify_on_failure, Client};
use crate::error::Error;
use crate::http::{read_json, JsonResponse};

/// Whatever JSON object the resource endpoint returned, with its HTTP status.
pub type ResourceResponse = JsonResponse;

/// How the access token travels with a resource request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenTransport {
    /// `GET <endpoint>?access_token=<token>`, appended literally.
    ///
    /// The token ends up in the request line, where intermediate proxies may log it.
    #[default]
    QueryParameter,
    /// `Authorization: Bearer <token>`, the endpoint is used unchanged.
    AuthorizationHeader,
}

impl Client {
    /// Fetch a protected resource, passing the token as the `access_token` query
    /// parameter.
    ///
    /// The URL is `resource_endpoint + "?access_token=" + access_token`, so the endpoint
    /// must not already carry a query string.
    ///
    /// On any failure `on_fail` runs once before the error is returned.
    pub fn fetch_authorized_resource<F: FnOnce()>(
        &self,
        resource_endpoint: &str,
        access_token: &str,
        on_fail: F,
    ) -> Result<ResourceResponse, Error> {
        self.fetch_authorized_resource_with(
            resource_endpoint,
            access_token,
            TokenTransport::QueryParameter,
            on_fail,
        )
    }

    /// Fetch a protected resource with an explicit token transport.
    pub fn fetch_authorized_resource_with<F: FnOnce()>(
        &self,
        resource_endpoint: &str,
        access_token: &str,
        transport: TokenTransport,
        on_fail: F,
    ) -> Result<ResourceResponse, Error> {
        debug!("Fetching protected resource at {} ({:?})", resource_endpoint, transport);

        let request = match transport {
            TokenTransport::QueryParameter => self
                .http_client
                .get(format!("{}?access_token={}", resource_endpoint, access_token)),
            TokenTransport::AuthorizationHeader => self
                .http_client
                .get(resource_endpoint)
                .bearer_auth(access_token),
        };

        // Errors carry the request URL, which may hold the token.
        let result = request
            .send()
            .map_err(|err| Error::from(err.without_url()))
            .and_then(read_json);

        let response = notify_on_failure(result, on_fail, "Resource fetch")?;
        info!(
            "Resource endpoint answered with status {} ({} keys)",
            response.status,
            response.len()
        );
        Ok(response)
    }
}

/// Fetch a resource using a client with default settings.
pub fn fetch_authorized_resource<F: FnOnce()>(
    resource_endpoint: &str,
    access_token: &str,
    on_fail: F,
) -> Result<ResourceResponse, Error> {
    match Client::new() {
        Ok(client) => client.fetch_authorized_resource(resource_endpoint, access_token, on_fail),
        Err(err) => notify_on_failure(Err(err), on_fail, "Resource fetch"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, NetworkErrorKind, ParseErrorKind};
    use mockito::{Matcher, Server};
    use serde_json::{json, Value};
    use std::cell::Cell;
    use std::net::TcpListener;

    #[test]
    fn test_token_sent_as_query_parameter() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/userinfo")
            .match_query(Matcher::UrlEncoded("access_token".into(), "tok-1".into()))
            .match_header("authorization", Matcher::Missing)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "42", "email": "user@example.com", "verified": true}"#)
            .create();

        let failures = Cell::new(0);
        let response = Client::new()
            .unwrap()
            .fetch_authorized_resource(&format!("{}/userinfo", server.url()), "tok-1", || {
                failures.set(failures.get() + 1)
            })
            .unwrap();

        mock.assert();
        assert_eq!(failures.get(), 0);
        assert_eq!(
            Value::Object(response.into_body()),
            json!({"id": "42", "email": "user@example.com", "verified": true})
        );
    }

    #[test]
    fn test_token_sent_as_bearer_header() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/userinfo")
            .match_header("authorization", "Bearer tok-2")
            .with_body(r#"{"id": "42"}"#)
            .create();

        let response = Client::new()
            .unwrap()
            .fetch_authorized_resource_with(
                &format!("{}/userinfo", server.url()),
                "tok-2",
                TokenTransport::AuthorizationHeader,
                || {},
            )
            .unwrap();

        mock.assert();
        assert_eq!(response.get("id"), Some(&json!("42")));
    }

    #[test]
    fn test_non_json_resource_is_parse_error() {
        let mut server = Server::new();
        server
            .mock("GET", "/data")
            .match_query(Matcher::Any)
            .with_body("<html>Sign in</html>")
            .create();

        let failures = Cell::new(0);
        let err = Client::new()
            .unwrap()
            .fetch_authorized_resource(&format!("{}/data", server.url()), "tok", || {
                failures.set(failures.get() + 1)
            })
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Parse(ParseErrorKind::InvalidJson));
        assert_eq!(failures.get(), 1);
    }

    #[test]
    fn test_rejected_token_body_is_returned_with_status() {
        let mut server = Server::new();
        server
            .mock("GET", "/data")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error": "invalid_token"}"#)
            .create();

        let response = Client::new()
            .unwrap()
            .fetch_authorized_resource(&format!("{}/data", server.url()), "expired", || {})
            .unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(response.provider_error().unwrap().error, "invalid_token");
    }

    #[test]
    fn test_unreachable_resource_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/data", listener.local_addr().unwrap());
        drop(listener);

        let failures = Cell::new(0);
        let err = fetch_authorized_resource(&endpoint, "secret-token", || {
            failures.set(failures.get() + 1)
        })
        .unwrap_err();

        assert!(err.is_network());
        assert_eq!(failures.get(), 1);
        assert!(!err.to_string().contains("secret-token"));
    }

    #[test]
    fn test_malformed_resource_endpoint_is_network_error() {
        for transport in [TokenTransport::QueryParameter, TokenTransport::AuthorizationHeader] {
            let failures = Cell::new(0);
            let err = Client::new()
                .unwrap()
                .fetch_authorized_resource_with("not a url", "secret-token", transport, || {
                    failures.set(failures.get() + 1)
                })
                .unwrap_err();

            assert!(err.is_network());
            assert_eq!(
                err.error_kind,
                ErrorKind::Network(NetworkErrorKind::InvalidRequest)
            );
            assert_eq!(failures.get(), 1);
            assert!(!err.to_string().contains("secret-token"));
        }
    }

    #[test]
    fn test_default_transport_is_query_parameter() {
        assert_eq!(TokenTransport::default(), TokenTransport::QueryParameter);
    }
}
