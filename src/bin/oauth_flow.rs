use log::{error, info, warn};
use oauth_consumer::http::JsonResponse;
use oauth_consumer::oauth::{
    build_authorization_url, build_authorization_url_encoded, parse_authorization_callback,
    AuthorizationCallback, Client, TokenTransport,
};
use secrecy::{ExposeSecret, SecretString};
use service::{
    config::{Config, Step},
    logging::Logger,
};
use std::error::Error;
use std::process;

type FlowResult = Result<(), Box<dyn Error>>;

fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
    }

    let result = match &config.step {
        Step::AuthorizeUrl { encoded } => authorize_url(&config, *encoded),
        Step::Exchange { code, callback_url } => {
            exchange(&config, code.as_deref(), callback_url.as_deref())
        }
        Step::Fetch {
            access_token,
            bearer_header,
        } => fetch(&config, access_token, *bearer_header),
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}

fn authorize_url(config: &Config, encoded: bool) -> FlowResult {
    let params = config.auth_request_params();
    let url = if encoded {
        build_authorization_url_encoded(&params)
    } else {
        build_authorization_url(&params)
    };

    info!("Open the following URL to grant access:");
    println!("{url}");
    Ok(())
}

fn exchange(config: &Config, code: Option<&str>, callback_url: Option<&str>) -> FlowResult {
    let code = match (code, callback_url) {
        (Some(code), _) => code.to_string(),
        (None, Some(url)) => match parse_authorization_callback(url)? {
            AuthorizationCallback::Code(code) => code,
            AuthorizationCallback::Denied { error, description } => {
                return Err(format!(
                    "Provider denied authorization: {} {}",
                    error,
                    description.unwrap_or_default()
                )
                .into())
            }
            AuthorizationCallback::Missing => {
                return Err("Callback URL carries no authorization code".into())
            }
        },
        (None, None) => return Err("An authorization code is required".into()),
    };

    let params = config
        .token_exchange_params(&code)
        .ok_or("OAUTH_CLIENT_SECRET is required to exchange a code")?;

    let client = Client::with_config(config.http_client_config())?;
    let response = client.exchange_code_for_token(params, || {
        warn!("Could not obtain a token from {}", config.token_endpoint)
    })?;

    print_response(&response)?;
    if response.token(&config.token_key).is_none() {
        warn!("Token response has no \"{}\" string value", config.token_key);
    }
    check_status(&response)
}

fn fetch(config: &Config, access_token: &SecretString, bearer_header: bool) -> FlowResult {
    let transport = if bearer_header {
        TokenTransport::AuthorizationHeader
    } else {
        TokenTransport::QueryParameter
    };

    let client = Client::with_config(config.http_client_config())?;
    let response = client.fetch_authorized_resource_with(
        &config.resource_endpoint,
        access_token.expose_secret(),
        transport,
        || warn!("Could not fetch {}", config.resource_endpoint),
    )?;

    print_response(&response)?;
    check_status(&response)
}

fn print_response(response: &JsonResponse) -> FlowResult {
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    Ok(())
}

fn check_status(response: &JsonResponse) -> FlowResult {
    if response.is_success() {
        return Ok(());
    }

    match response.provider_error() {
        Some(provider_error) => Err(format!(
            "Provider answered {} with error \"{}\"{}",
            response.status,
            provider_error.error,
            provider_error
                .description
                .map(|d| format!(": {d}"))
                .unwrap_or_default()
        )
        .into()),
        None => Err(format!("Provider answered with status {}", response.status).into()),
    }
}
