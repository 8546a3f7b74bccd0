use std::convert::Infallible;
use std::time::Duration;

use clap::builder::TypedValueParser as _;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::LevelFilter;
use oauth_consumer::http::HttpClientConfig;
use oauth_consumer::oauth::{
    AuthRequestParams, ProviderEndpoints, TokenExchangeParams, GOOGLE_AUTHORIZATION_ENDPOINT,
    GOOGLE_RESOURCE_ENDPOINT, GOOGLE_TOKEN_ENDPOINT,
};
use secrecy::SecretString;

/// Wraps secret arguments as soon as clap hands them over.
fn parse_secret(value: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::new(value.to_string()))
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The OAuth client ID registered with the provider.
    #[arg(long, env = "OAUTH_CLIENT_ID")]
    pub client_id: String,

    /// The OAuth client secret. Only needed to exchange a code.
    #[arg(long, env = "OAUTH_CLIENT_SECRET", hide_env_values = true, value_parser = parse_secret)]
    client_secret: Option<SecretString>,

    /// The URI the provider redirects the user back to.
    #[arg(long, env = "OAUTH_REDIRECT_URI")]
    pub redirect_uri: String,

    /// The provider's authorization endpoint.
    #[arg(long, env = "OAUTH_AUTHORIZATION_ENDPOINT", default_value = GOOGLE_AUTHORIZATION_ENDPOINT)]
    pub authorization_endpoint: String,

    /// The provider's token endpoint.
    #[arg(long, env = "OAUTH_TOKEN_ENDPOINT", default_value = GOOGLE_TOKEN_ENDPOINT)]
    pub token_endpoint: String,

    /// The protected resource to fetch with the access token.
    #[arg(long, env = "OAUTH_RESOURCE_ENDPOINT", default_value = GOOGLE_RESOURCE_ENDPOINT)]
    pub resource_endpoint: String,

    /// A comma separated list of scopes to request, in order.
    #[arg(
        long,
        env = "OAUTH_SCOPES",
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "email"
    )]
    pub scopes: Vec<String>,

    /// The key of the token response that holds the bearer token.
    #[arg(long, env = "OAUTH_TOKEN_KEY", default_value = "access_token")]
    pub token_key: String,

    /// Timeout in seconds for each HTTP request. 0 disables the timeout.
    #[arg(long, env = "OAUTH_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap_or(LevelFilter::Info)),
        )]
    pub log_level_filter: LevelFilter,

    /// The step of the authorization code flow to run.
    #[command(subcommand)]
    pub step: Step,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Step {
    /// Print the URL the end user should open to grant access.
    AuthorizeUrl {
        /// Percent-encode every query value.
        #[arg(long)]
        encoded: bool,
    },
    /// Exchange an authorization code for a token and print the response.
    Exchange {
        /// The authorization code returned by the provider.
        #[arg(long, required_unless_present = "callback_url")]
        code: Option<String>,
        /// The full URL the provider redirected to; the code is read from it.
        #[arg(long, conflicts_with = "code")]
        callback_url: Option<String>,
    },
    /// Fetch the protected resource and print the response.
    Fetch {
        /// The access token obtained from the exchange step.
        #[arg(long, env = "OAUTH_ACCESS_TOKEN", hide_env_values = true, value_parser = parse_secret)]
        access_token: SecretString,
        /// Send the token in an `Authorization: Bearer` header instead of the query string.
        #[arg(long)]
        bearer_header: bool,
    },
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Returns the client secret, if configured.
    pub fn client_secret(&self) -> Option<SecretString> {
        self.client_secret.clone()
    }

    /// The configured endpoints as a provider description.
    pub fn endpoints(&self) -> ProviderEndpoints {
        ProviderEndpoints {
            authorization_endpoint: self.authorization_endpoint.clone(),
            token_endpoint: self.token_endpoint.clone(),
            resource_endpoint: self.resource_endpoint.clone(),
        }
    }

    pub fn auth_request_params(&self) -> AuthRequestParams {
        self.endpoints()
            .auth_request(&self.client_id, &self.redirect_uri, self.scopes.iter().cloned())
    }

    /// Exchange parameters for `code`, or `None` when no client secret is configured.
    pub fn token_exchange_params(&self, code: &str) -> Option<TokenExchangeParams> {
        self.client_secret().map(|secret| {
            TokenExchangeParams::new(
                &self.token_endpoint,
                &self.client_id,
                secret,
                &self.redirect_uri,
                code,
            )
        })
    }

    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: (self.http_timeout_secs > 0)
                .then(|| Duration::from_secs(self.http_timeout_secs)),
            ..HttpClientConfig::default()
        }
    }
}
