//! Configuration structures for OSM clients.
//!
//! This module provides the connection settings for an OSM northbound interface:
//! where it lives, how to authenticate, and how strictly to verify TLS.

use crate::Error;
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default NBI port.
pub const DEFAULT_NBI_PORT: u16 = 9999;

/// Default user, password and project.
pub const DEFAULT_ADMIN: &str = "admin";

/// Host alias used by stub mode when none is configured.
pub const DEFAULT_STUB_ALIAS: &str = "prism-osm";

/// Path prefix of every NBI resource.
pub const NBI_PATH_PREFIX: &str = "osm";

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

/// Credentials exchanged for a bearer token.
#[derive(Debug)]
pub struct OsmCredentials {
    /// Login name
    pub user: String,
    /// Password (redacted from debug output)
    pub password: SecretString,
    /// Project the token is scoped to
    pub project: String,
}

impl OsmCredentials {
    /// Create credentials.
    #[must_use]
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: SecretString::from(password.into()),
            project: project.into(),
        }
    }
}

impl Default for OsmCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN, DEFAULT_ADMIN, DEFAULT_ADMIN)
    }
}

/// Configuration for an OSM client instance.
#[derive(Debug, Validate)]
pub struct OsmConfig {
    /// NBI host name or address
    #[validate(length(min = 1))]
    pub host: String,

    /// NBI port
    pub port: u16,

    /// Token credentials
    pub credentials: OsmCredentials,

    /// Whether to verify TLS certificates
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    pub tls_ca_cert: Option<PathBuf>,

    /// Replaces the `https://{host}:{port}/osm/` base URL when set
    #[validate(url)]
    pub base_url: Option<String>,

    /// Skip the token exchange at construction time
    pub skip_auth: bool,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    #[validate(range(min = 1, max = 60))]
    pub connect_timeout_secs: u64,
}

impl OsmConfig {
    /// Create a configuration for an authenticated HTTPS connection.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, Error> {
        let config = Self {
            host: host.into(),
            port,
            credentials: OsmCredentials::default(),
            tls_verify: true,
            tls_ca_cert: None,
            base_url: None,
            skip_auth: false,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Create a configuration for an unauthenticated stub server at
    /// `http://{alias}:{port}/osm/`.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn stub(alias: impl Into<String>, port: u16) -> Result<Self, Error> {
        let alias = alias.into();
        let base_url = format!("http://{alias}:{port}/{NBI_PATH_PREFIX}/");
        Self::new(alias, port)?.with_base_url(base_url).map(Self::without_auth)
    }

    /// Build a configuration from environment variables.
    ///
    /// Reads `OSM_HOST`, `OSM_PORT`, `OSM_USER`, `OSM_PASSWORD`, `OSM_PROJECT` and
    /// `OSM_TLS_VERIFY`. When `TESTING` is truthy the stub host named by
    /// `PRISM_ALIAS` (default `prism-osm`) is used instead and authentication is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or validation fails.
    pub fn from_env() -> Result<Self, Error> {
        let port = match std::env::var("OSM_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|e| Error::ConfigError(format!("Invalid OSM_PORT `{port}`: {e}")))?,
            Err(_) => DEFAULT_NBI_PORT,
        };

        if env_flag("TESTING").unwrap_or(false) {
            let alias =
                std::env::var("PRISM_ALIAS").unwrap_or_else(|_| DEFAULT_STUB_ALIAS.to_string());
            return Self::stub(alias, port);
        }

        let host = std::env::var("OSM_HOST")
            .map_err(|_| Error::ConfigError("OSM_HOST is not set".to_string()))?;
        let var_or_admin = |name: &str| std::env::var(name).unwrap_or_else(|_| DEFAULT_ADMIN.to_string());

        let config = Self::new(host, port)?.with_credentials(OsmCredentials::new(
            var_or_admin("OSM_USER"),
            var_or_admin("OSM_PASSWORD"),
            var_or_admin("OSM_PROJECT"),
        ));

        Ok(match env_flag("OSM_TLS_VERIFY") {
            Some(verify) => config.with_tls_verify(verify),
            None => config,
        })
    }

    /// Set the token credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: OsmCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Override the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, Error> {
        self.base_url = Some(base_url.into());
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;
        Ok(self)
    }

    /// Skip authentication at construction time.
    #[must_use]
    pub const fn without_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set connect timeout in seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Resolve the base URL all NBI paths are joined onto.
    ///
    /// The result always ends with `/` so relative joins keep the `osm` prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let raw = match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}:{}/{NBI_PATH_PREFIX}/", self.host, self.port),
        };

        let mut url =
            Url::parse(&raw).map_err(|e| Error::ConfigError(format!("Invalid NBI URL: {e}")))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}
