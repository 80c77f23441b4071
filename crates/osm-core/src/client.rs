//! HTTP transport and client tuning.
//!
//! [`ServiceClient`] is the single request-and-classify routine every NBI
//! operation goes through, whatever the verb.

use crate::config::OsmConfig;
use crate::error::{Error, Result};
use crate::response::{classify, Payload, JSON_MEDIA_TYPE};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default timeout for NBI requests
pub const NBI_DEFAULT_TIMEOUT: u64 = 30;

/// Default connect timeout
pub const NBI_DEFAULT_CONNECT_TIMEOUT: u64 = 10;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP client configuration.
///
/// Configures timeouts and connection pooling of the underlying `reqwest` client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connect timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable request/response logging
    pub enable_logging: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(NBI_DEFAULT_TIMEOUT),
            connect_timeout: Duration::from_secs(NBI_DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_logging: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    base_url: Url,
    http_config: ClientConfig,
    user_agent: Option<String>,
    tls_verify: bool,
    tls_ca_cert: Option<PathBuf>,
}

impl ServiceClientBuilder {
    /// Create a builder for the specified base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            http_config: ClientConfig::new().with_timeout(timeout),
            user_agent: None,
            tls_verify: true,
            tls_ca_cert: None,
        })
    }

    /// Create a builder from an [`OsmConfig`], carrying over its URL, timeouts and TLS settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(config: &OsmConfig) -> Result<Self> {
        let mut builder = Self::new(config.parse_base_url()?, config.timeout())?
            .with_tls_verify(config.tls_verify);
        builder.http_config = builder
            .http_config
            .with_connect_timeout(config.connect_timeout());
        if let Some(ca_cert) = &config.tls_ca_cert {
            builder = builder.with_ca_cert(ca_cert.clone());
        }
        Ok(builder)
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Trust an additional PEM-encoded CA certificate.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the CA certificate cannot be loaded or the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<ServiceClient> {
        let mut builder = ClientBuilder::new()
            .timeout(self.http_config.timeout)
            .connect_timeout(self.http_config.connect_timeout)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host);

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        if !self.tls_verify {
            warn!(base_url = %self.base_url, "TLS verification disabled for OSM client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = &self.tls_ca_cert {
            debug!("loading OSM CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::ConfigError(format!(
                    "Failed to read OSM CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&bytes)
                .map_err(|err| Error::ConfigError(format!("Invalid OSM CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build OSM HTTP client: {err}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));

        Ok(ServiceClient {
            http,
            base_url: self.base_url,
            headers,
            enable_logging: self.http_config.enable_logging,
        })
    }
}

/// Shared HTTP transport.
///
/// The header set is fixed once the client is built; [`ServiceClient::with_bearer_token`]
/// returns a new client instead of mutating this one.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: Url,
    headers: HeaderMap,
    enable_logging: bool,
}

impl ServiceClient {
    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return the headers sent with every request.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Return a client that sends `Authorization: Bearer <token>` on every request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] if the token is not a valid header value.
    pub fn with_bearer_token(&self, token: &str) -> Result<Self> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|err| Error::DecodeError(format!("Invalid bearer token: {err}")))?;
        value.set_sensitive(true);

        let mut client = self.clone();
        client.headers.insert(AUTHORIZATION, value);
        Ok(client)
    }

    /// Resolve a path relative to the base URL, then append each of `segments`
    /// as a single percent-encoded path segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the path cannot be joined, or if a
    /// segment is empty, `.` or `..`, none of which can name a resource.
    pub fn build_url(&self, path: &str, segments: &[&str]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid NBI path `{path}`: {err}")))?;
        if segments.is_empty() {
            return Ok(url);
        }

        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(Error::InvalidEndpoint(format!(
                "`{segment}` is not a usable identifier in NBI path `{path}`"
            )));
        }

        url.path_segments_mut()
            .map_err(|()| {
                Error::InvalidEndpoint(format!("Base URL `{}` cannot hold a path", self.base_url))
            })?
            .extend(segments);
        Ok(url)
    }

    /// Perform a request and classify the response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`], [`Error::Unauthorized`] or
    /// [`Error::ResourceNotFound`] for 400/401/404, [`Error::ServerError`] for any
    /// other non-success status or a network failure, and [`Error::DecodeError`]
    /// for a success body that does not match its content type.
    pub async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        segments: &[&str],
        params: &[(String, String)],
        body: Option<&B>,
    ) -> Result<Payload>
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(path, segments)?;
        if self.enable_logging {
            debug!(%method, %url, ?params, "Sending OSM request");
        }

        let mut request = self
            .http
            .request(method.clone(), url)
            .headers(self.headers.clone());
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let text = response
            .text()
            .await
            .map_err(|err| Error::transport(format!("Failed to read OSM response: {err}")))?;

        let outcome = classify(status, content_type.as_deref(), &text)?;
        if self.enable_logging && !outcome.is_success() {
            debug!(%method, path, %status, "OSM request failed");
        }

        outcome.into_result()
    }
}
