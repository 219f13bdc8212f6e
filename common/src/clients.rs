//! A module containing utility functions to build an authenticated `reqwest` session
//! and to handle HTTP responses coming back from it.

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};

use crate::clap::{CliSecret, PlainRedactor};
use crate::Error;

/// Credentials sent with every request using HTTP basic authentication.
#[derive(Clone, Debug)]
pub struct BasicAuthCredentials {
    pub username: String,
    pub password: CliSecret<String, PlainRedactor>,
}

impl BasicAuthCredentials {
    pub fn new(username: impl Into<String>, password: CliSecret<String, PlainRedactor>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Builds the underlying client. Certificate validation is switched off when
/// `accept_invalid_certs` is set since internal servers commonly run with self signed certificates.
pub fn new_reqwest_client(accept_invalid_certs: bool) -> Result<Client, Error> {
    // We set the max number of allowed idle connections to 0 to avoid
    // a race condition where a connection is selected from the pool and
    // written to at the same time the server is closing it.
    // More details here:
    // https://github.com/hyperium/hyper/issues/2136#issuecomment-589345238
    let client = Client::builder()
        .pool_max_idle_per_host(0)
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()?;

    Ok(client)
}

/// A `reqwest` client bound to a base URL with a fixed set of credentials.
///
/// The session holds no request scoped state so it can be shared freely between
/// the requests of a single run.
#[derive(Clone, Debug)]
pub struct AuthenticatedSession {
    client: Client,
    base_url: String,
    credentials: BasicAuthCredentials,
}

impl AuthenticatedSession {
    pub fn new(
        base_url: &str,
        credentials: BasicAuthCredentials,
        accept_invalid_certs: bool,
    ) -> Result<Self, Error> {
        // Validate early so that a typo in the base URL is reported before anything is sent
        Url::parse(base_url).map_err(|e| Error::InvalidUrl(base_url.to_owned(), e.to_string()))?;

        let client = new_reqwest_client(accept_invalid_certs)?;

        Ok(Self {
            client,
            base_url: base_url.to_owned(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a path against the base URL.
    ///
    /// Absolute URLs are used as is. Anything else is appended to the base URL, keeping
    /// any path prefix the base URL has, so `https://host/tower` and `/api/v2/jobs/1/`
    /// give `https://host/tower/api/v2/jobs/1/`.
    pub fn resolve(&self, path: &str) -> Result<Url, Error> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path).map_err(|e| Error::InvalidUrl(path.to_owned(), e.to_string()));
        }

        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        Url::parse(&joined).map_err(|e| Error::InvalidUrl(joined.clone(), e.to_string()))
    }

    pub fn get(&self, path: &str) -> Result<RequestBuilder, Error> {
        let url = self.resolve(path)?;
        Ok(self.authenticate(self.client.get(url)))
    }

    pub fn post(&self, path: &str) -> Result<RequestBuilder, Error> {
        let url = self.resolve(path)?;
        Ok(self.authenticate(self.client.post(url)))
    }

    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(
            &self.credentials.username,
            Some(self.credentials.password.as_str()),
        )
    }
}

/// A response body captured together with its status code.
///
/// Some APIs describe a rejected request in the body of a 4xx response, so callers
/// that need to inspect those bodies use this rather than [`handle_response_text`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parses the body as JSON, returning `None` if the body is not JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

async fn handle_error<T>(resp: Response) -> Result<T, Error> {
    let status = resp.status();
    let error_text = resp.text().await?;
    tracing::error!("Error {}: {}", status, error_text);
    Err(Error::Api(status, error_text))
}

/// Captures the status and body of a response without treating non-2xx statuses as errors
pub async fn capture_response(resp: Response) -> Result<RawResponse, Error> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        tracing::debug!("Non-success status {} returned", status);
    }

    Ok(RawResponse { status, body })
}

/// Turns the response to text and captures errors
pub async fn handle_response_text(resp: Response) -> Result<String, Error> {
    if resp.status().is_success() {
        let text = resp.text().await?;
        Ok(text)
    } else {
        handle_error(resp).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::{AuthenticatedSession, BasicAuthCredentials, RawResponse};
    use crate::clap::CliSecret;

    fn session(base_url: &str) -> AuthenticatedSession {
        let credentials = BasicAuthCredentials::new("admin", CliSecret::new("hunter2".to_owned()));
        AuthenticatedSession::new(base_url, credentials, true).unwrap()
    }

    #[test]
    fn resolve_keeps_base_path_prefix() {
        let session = session("https://tower.internal/awx/");

        let url = session.resolve("/api/v2/jobs/5/").unwrap();

        assert_eq!(url.as_str(), "https://tower.internal/awx/api/v2/jobs/5/");
    }

    #[test]
    fn resolve_relative_path_without_slashes() {
        let session = session("https://tower.internal");

        let url = session
            .resolve("api/v2/job_templates/12/launch/")
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://tower.internal/api/v2/job_templates/12/launch/"
        );
    }

    #[test]
    fn resolve_absolute_url_is_untouched() {
        let session = session("https://tower.internal/awx");

        let url = session
            .resolve("https://other.internal/api/v2/jobs/5/stdout/")
            .unwrap();

        assert_eq!(url.as_str(), "https://other.internal/api/v2/jobs/5/stdout/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let credentials = BasicAuthCredentials::new("admin", CliSecret::new("hunter2".to_owned()));

        let result = AuthenticatedSession::new("not a url", credentials, true);

        assert!(result.is_err());
    }

    #[test]
    fn credentials_are_redacted_in_debug_output() {
        let session = session("https://tower.internal");

        let debug = format!("{session:?}");

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<REDACTED>"));
    }

    #[test]
    fn raw_response_json_parsing() {
        let json = RawResponse::new(StatusCode::NOT_FOUND, r#"{"detail": "Not found."}"#);
        let text = RawResponse::new(StatusCode::BAD_GATEWAY, "<html>Bad gateway</html>");

        assert_eq!(json.json().unwrap()["detail"], "Not found.");
        assert!(text.json().is_none());
    }
}
