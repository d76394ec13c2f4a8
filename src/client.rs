use crate::{auth::Token, ApiError, ErrorEnvelope};
use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::{self, Debug, Formatter};

/// An authenticated connection to a Canvas instance.
///
/// Cloning is cheap, the underlying [`reqwest::Client`] pools its
/// connections.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    addr: String,
    token: String,
}

impl Client {
    /// Create a client for the Canvas instance at `addr` (e.g.
    /// `https://canvas.instructure.com`) which authenticates with an OAuth2
    /// access token.
    pub fn new(addr: &str, token: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(crate::DEFAULT_USER_AGENT)
            .build()?;

        Ok(Client::with_http_client(http, addr, token))
    }

    /// Create a client from a token freshly minted by the OAuth2 flow.
    pub fn from_token(addr: &str, token: &Token) -> Result<Self, ApiError> {
        Client::new(addr, &token.access_token)
    }

    /// Reuse an existing [`reqwest::Client`] (e.g. one with custom timeouts
    /// or a proxy).
    pub fn with_http_client(
        http: reqwest::Client,
        addr: &str,
        token: &str,
    ) -> Self {
        Client {
            http,
            addr: addr.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// The address of the Canvas instance.
    pub fn addr(&self) -> &str { &self.addr }

    fn url(&self, path: &str) -> String { format!("{}/{}", self.addr, path) }

    pub(crate) async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("Sending a GET request to {}", url);

        self.send(self.http.get(&url)).await
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Debug + Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("Sending a JSON POST request to {}", url);
        log::trace!("Payload: {:#?}", body);

        self.send(self.http.post(&url).json(body)).await
    }

    pub(crate) async fn post_form<F, T>(
        &self,
        path: &str,
        form: &F,
    ) -> Result<T, ApiError>
    where
        F: Debug + Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("Sending a form POST request to {}", url);
        log::trace!("Payload: {:#?}", form);

        self.send(self.http.post(&url).form(form)).await
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();

        log::trace!("Status: {}", status);
        log::trace!("Headers: {:#?}", response.headers());

        let body = response.bytes().await?;
        log::trace!("Response: {}", String::from_utf8_lossy(&body));

        process_response(status, &body)
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("addr", &self.addr)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Turn a response into either the value we asked for or an [`ApiError`].
pub(crate) fn process_response<T>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    match status {
        StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => {
            serde_json::from_slice(body).map_err(ApiError::from)
        },
        StatusCode::UNAUTHORIZED => {
            let envelope: ErrorEnvelope = serde_json::from_slice(body)?;
            log::error!("Request was unauthorized: {}", envelope);

            Err(ApiError::Unauthorized(envelope))
        },
        other => {
            log::warn!("The server responded with {}", other);

            Err(ApiError::Status {
                status: other,
                body: String::from_utf8_lossy(body).into_owned(),
            })
        },
    }
}
