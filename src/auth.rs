//! The OAuth2 authorization-code flow used to get an access token.
//!
//! 1. Send the user to [`authorize_url()`] with a fresh [`random_state()`]
//! 2. Canvas redirects back to your `redirect_uri` with a `code`
//! 3. Trade the code for a [`Token`] using [`exchange_code()`]
//! 4. When the token expires, use [`refresh()`]

use crate::endpoints;
use rand::{distributions::Alphanumeric, Rng};
use reqwest::StatusCode;
use serde_derive::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};
use url::Url;

/// Where the OAuth2 flow happens for a particular Canvas instance.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthEndpoint {
    pub auth_url: String,
    pub token_url: String,
}

impl OAuthEndpoint {
    pub fn for_host(addr: &str) -> Self {
        let addr = addr.trim_end_matches('/');

        OAuthEndpoint {
            auth_url: format!("{}/{}", addr, endpoints::auth_path()),
            token_url: format!("{}/{}", addr, endpoints::token_path()),
        }
    }
}

/// The developer key registered with Canvas.
#[derive(Clone, PartialEq)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Debug for OAuthConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// The URL a user should visit to grant us access.
pub fn authorize_url(
    endpoint: &OAuthEndpoint,
    config: &OAuthConfig,
    state: &str,
    scopes: &[&str],
) -> Result<Url, OAuthError> {
    let mut url = Url::parse_with_params(
        &endpoint.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("state", state),
        ],
    )?;

    if !scopes.is_empty() {
        url.query_pairs_mut().append_pair("scope", &scopes.join(" "));
    }

    Ok(url)
}

/// A random value for the `state` parameter, used to tie the redirect back to
/// the request that started it.
pub fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Trade the `code` Canvas gave the redirect URI for an access token.
pub async fn exchange_code(
    client: &reqwest::Client,
    endpoint: &OAuthEndpoint,
    config: &OAuthConfig,
    code: &str,
) -> Result<Token, OAuthError> {
    let data = TokenRequest {
        grant_type: "authorization_code",
        client_id: &config.client_id,
        client_secret: &config.client_secret,
        redirect_uri: Some(config.redirect_uri.as_str()),
        code: Some(code),
        refresh_token: None,
    };

    request_token(client, endpoint, &data).await
}

/// Use a refresh token to get a new access token. Canvas doesn't hand out a
/// new refresh token when doing this, so keep the old one around.
pub async fn refresh(
    client: &reqwest::Client,
    endpoint: &OAuthEndpoint,
    config: &OAuthConfig,
    refresh_token: &str,
) -> Result<Token, OAuthError> {
    let data = TokenRequest {
        grant_type: "refresh_token",
        client_id: &config.client_id,
        client_secret: &config.client_secret,
        redirect_uri: None,
        code: None,
        refresh_token: Some(refresh_token),
    };

    request_token(client, endpoint, &data).await
}

async fn request_token(
    client: &reqwest::Client,
    endpoint: &OAuthEndpoint,
    data: &TokenRequest<'_>,
) -> Result<Token, OAuthError> {
    log::debug!(
        "Requesting a {} token from {}",
        data.grant_type,
        endpoint.token_url
    );

    let response = client.post(&endpoint.token_url).form(data).send().await?;
    let status = response.status();
    log::trace!("Headers: {:#?}", response.headers());

    let body = response.bytes().await?;

    interpret_response(status, &body)
}

fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> Result<Token, OAuthError> {
    if status.is_success() {
        let token: Token = serde_json::from_slice(body)?;

        match token.user {
            Some(ref user) => log::info!("Authorized as {}", user.name),
            None => log::info!("Received a new access token"),
        }

        return Ok(token);
    }

    match serde_json::from_slice::<OAuthErrorResponse>(body) {
        Ok(rejection) => {
            log::error!(
                "Token request rejected with {}: {}",
                rejection.error,
                rejection.error_description
            );

            Err(OAuthError::Rejected {
                error: rejection.error,
                description: rejection.error_description,
            })
        },
        Err(_) => Err(OAuthError::Status {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }),
    }
}

/// The form sent to the token endpoint.
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_uri: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<&'a str>,
}

/// An OAuth2 access token issued by Canvas.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// How many seconds until `access_token` expires.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub user: Option<TokenUser>,
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let refresh_token = self.refresh_token.as_ref().map(|_| "<redacted>");

        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("refresh_token", &refresh_token)
            .field("expires_in", &self.expires_in)
            .field("user", &self.user)
            .finish()
    }
}

/// The user a [`Token`] was issued to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUser {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Possible errors that may be returned while getting an access token.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// The HTTP client encountered an error.
    #[error("Unable to send the token request")]
    HttpClient(#[from] reqwest::Error),
    #[error("Unable to construct the authorization URL")]
    Url(#[from] url::ParseError),
    #[error("Unable to parse the token response")]
    Decode(#[from] serde_json::Error),
    /// The server understood the request and said no.
    #[error("The token request was rejected because {}: {}", error, description)]
    Rejected { error: String, description: String },
    #[error("The token endpoint responded with {}", status)]
    Status { status: StatusCode, body: String },
}
