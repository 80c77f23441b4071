//! Asynchronous OSM NBI client implementation.

use crate::models::{Token, TokenRequest};
use crate::Result;
use async_trait::async_trait;
use osm_core::client::{ClientConfig, ServiceClient, ServiceClientBuilder};
use osm_core::config::{OsmConfig, OsmCredentials};
use osm_core::driver::NfvoDriver;
use osm_core::ids::{NsId, NsOpId, VnfId, VnfPkgId};
use osm_core::query::QueryParams;
use osm_core::types::RequestArgs;
use osm_core::{Error, Payload};
use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::info;
use url::Url;

const USER_AGENT: &str = concat!("osm-nbi/", env!("CARGO_PKG_VERSION"));

const TOKENS: &str = "admin/v1/tokens";
const NS_INSTANCES: &str = "nslcm/v1/ns_instances";
const NS_LCM_OP_OCCS: &str = "nslcm/v1/ns_lcm_op_occs";
const VNFRS: &str = "nslcm/v1/vnfrs";
const VNF_PACKAGES: &str = "vnfpkgm/v1/vnf_packages";

/// Builder for [`OsmClient`].
#[derive(Debug)]
pub struct OsmClientBuilder {
    config: OsmConfig,
    http_config: Option<ClientConfig>,
}

impl OsmClientBuilder {
    /// Create a builder from a connection configuration.
    #[must_use]
    pub fn new(config: OsmConfig) -> Self {
        Self {
            config,
            http_config: None,
        }
    }

    /// Override the HTTP client configuration.
    ///
    /// Pooling and logging come from `config`; the request and connect timeouts
    /// always come from the [`OsmConfig`].
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = Some(config);
        self
    }

    /// Build the client, exchanging the configured credentials for a bearer
    /// token unless authentication is skipped.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unusable configuration, or whatever
    /// the token request fails with.
    pub async fn connect(self) -> Result<OsmClient> {
        let mut builder =
            ServiceClientBuilder::from_config(&self.config)?.with_user_agent(USER_AGENT);
        if let Some(http_config) = self.http_config {
            builder = builder.with_http_config(
                http_config
                    .with_timeout(self.config.timeout())
                    .with_connect_timeout(self.config.connect_timeout()),
            );
        }
        let inner = builder.build()?;

        if self.config.skip_auth {
            info!(base_url = %inner.base_url(), "Using OSM NBI without authentication");
            return Ok(OsmClient {
                inner,
                authenticated: false,
            });
        }

        let token = authenticate(&inner, &self.config.credentials).await?;
        let inner = inner.with_bearer_token(&token.id)?;
        info!(
            base_url = %inner.base_url(),
            user = %self.config.credentials.user,
            project = %self.config.credentials.project,
            "Authenticated against OSM NBI"
        );

        Ok(OsmClient {
            inner,
            authenticated: true,
        })
    }
}

async fn authenticate(inner: &ServiceClient, credentials: &OsmCredentials) -> Result<Token> {
    let request = TokenRequest {
        username: &credentials.user,
        password: credentials.password.expose_secret(),
        project_id: &credentials.project,
    };

    inner
        .execute(Method::POST, TOKENS, &[], &[], Some(&request))
        .await?
        .deserialize::<Token>()
        .map_err(|err| Error::DecodeError(format!("Unusable OSM token response: {err}")))
}

/// Asynchronous OSM NBI client.
///
/// Cheap to clone; clones share the connection pool and the bearer token.
#[derive(Debug, Clone)]
pub struct OsmClient {
    inner: ServiceClient,
    authenticated: bool,
}

impl OsmClient {
    /// Construct and authenticate a client from the configuration.
    ///
    /// # Errors
    ///
    /// See [`OsmClientBuilder::connect`].
    pub async fn connect(config: OsmConfig) -> Result<Self> {
        OsmClientBuilder::new(config).connect().await
    }

    /// Start a builder from the configuration.
    #[must_use]
    pub fn builder(config: OsmConfig) -> OsmClientBuilder {
        OsmClientBuilder::new(config)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Whether a bearer token is attached to requests.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// List NS instances.
    pub async fn ns_list(&self, args: &RequestArgs) -> Result<Payload> {
        self.get(NS_INSTANCES, &[], &args.query).await
    }

    /// Create an NS instance.
    pub async fn ns_create(&self, args: &RequestArgs) -> Result<Payload> {
        self.post(NS_INSTANCES, &[], args).await
    }

    /// Fetch a single NS instance.
    pub async fn ns_get(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        self.get(NS_INSTANCES, &[ns_id.as_str()], &args.query)
            .await
            .map_err(|err| err.or_not_found(|| ns_not_found(ns_id)))
    }

    /// Delete an NS instance.
    pub async fn ns_delete(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        self.inner
            .execute::<Value>(
                Method::DELETE,
                NS_INSTANCES,
                &[ns_id.as_str()],
                args.query.as_pairs(),
                None,
            )
            .await
            .map_err(|err| err.or_not_found(|| ns_not_found(ns_id)))
    }

    /// Instantiate an NS instance.
    pub async fn ns_instantiate(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        self.ns_post(ns_id, "instantiate", args).await
    }

    /// Run a primitive action on an NS instance.
    pub async fn ns_action(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        self.ns_post(ns_id, "action", args).await
    }

    /// Scale an NS instance.
    pub async fn ns_scale(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        self.ns_post(ns_id, "scale", args).await
    }

    /// Terminate an NS instance.
    pub async fn ns_terminate(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        self.ns_post(ns_id, "terminate", args).await
    }

    /// List LCM operation occurrences, filtered by NS instance when one is given.
    pub async fn ns_op_list(&self, ns_id: Option<&NsId>, args: &RequestArgs) -> Result<Payload> {
        // An empty id filters nothing.
        let ns_id = ns_id.filter(|ns_id| !ns_id.as_str().is_empty());
        let mut query = QueryParams::new();
        query.push_opt("nsInstanceId", ns_id);
        query.extend(&args.query);

        let result = self.get(NS_LCM_OP_OCCS, &[], &query).await;
        match ns_id {
            Some(ns_id) => result.map_err(|err| err.or_not_found(|| ns_not_found(ns_id))),
            None => result,
        }
    }

    /// Fetch a single LCM operation occurrence.
    pub async fn ns_op(&self, ns_op_id: &NsOpId, args: &RequestArgs) -> Result<Payload> {
        self.get(NS_LCM_OP_OCCS, &[ns_op_id.as_str()], &args.query)
            .await.map_err(|err| {
            err.or_not_found(|| Error::NsOpNotFound {
                ns_op_id: ns_op_id.to_string(),
            })
        })
    }

    /// List VNF instance records.
    pub async fn vnf_list(&self, args: &RequestArgs) -> Result<Payload> {
        self.get(VNFRS, &[], &args.query).await
    }

    /// Fetch a single VNF instance record.
    pub async fn vnf_get(&self, vnf_id: &VnfId, args: &RequestArgs) -> Result<Payload> {
        self.get(VNFRS, &[vnf_id.as_str()], &args.query)
            .await.map_err(|err| {
            err.or_not_found(|| Error::VnfNotFound {
                vnf_id: vnf_id.to_string(),
            })
        })
    }

    /// List VNF packages.
    pub async fn vnfpkg_list(&self, args: &RequestArgs) -> Result<Payload> {
        self.get(VNF_PACKAGES, &[], &args.query).await
    }

    /// Fetch a single VNF package.
    pub async fn vnfpkg_get(&self, vnfpkg_id: &VnfPkgId, args: &RequestArgs) -> Result<Payload> {
        self.get(VNF_PACKAGES, &[vnfpkg_id.as_str()], &args.query)
            .await.map_err(|err| {
            err.or_not_found(|| Error::VnfPkgNotFound {
                vnfpkg_id: vnfpkg_id.to_string(),
            })
        })
    }

    async fn ns_post(&self, ns_id: &NsId, operation: &str, args: &RequestArgs) -> Result<Payload> {
        self.post(NS_INSTANCES, &[ns_id.as_str(), operation], args)
            .await
            .map_err(|err| err.or_not_found(|| ns_not_found(ns_id)))
    }

    async fn get(&self, path: &str, segments: &[&str], query: &QueryParams) -> Result<Payload> {
        self.inner
            .execute::<Value>(Method::GET, path, segments, query.as_pairs(), None)
            .await
    }

    async fn post(&self, path: &str, segments: &[&str], args: &RequestArgs) -> Result<Payload> {
        self.inner
            .execute(
                Method::POST,
                path,
                segments,
                args.query.as_pairs(),
                args.payload.as_ref(),
            )
            .await
    }
}

fn ns_not_found(ns_id: &NsId) -> Error {
    Error::NsNotFound {
        ns_id: ns_id.to_string(),
    }
}

#[async_trait]
impl NfvoDriver for OsmClient {
    async fn ns_list(&self, args: &RequestArgs) -> Result<Payload> {
        OsmClient::ns_list(self, args).await
    }

    async fn ns_create(&self, args: &RequestArgs) -> Result<Payload> {
        OsmClient::ns_create(self, args).await
    }

    async fn ns_get(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        OsmClient::ns_get(self, ns_id, args).await
    }

    async fn ns_delete(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        OsmClient::ns_delete(self, ns_id, args).await
    }

    async fn ns_instantiate(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        OsmClient::ns_instantiate(self, ns_id, args).await
    }

    async fn ns_action(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        OsmClient::ns_action(self, ns_id, args).await
    }

    async fn ns_scale(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        OsmClient::ns_scale(self, ns_id, args).await
    }

    async fn ns_terminate(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload> {
        OsmClient::ns_terminate(self, ns_id, args).await
    }

    async fn ns_op_list(&self, ns_id: Option<&NsId>, args: &RequestArgs) -> Result<Payload> {
        OsmClient::ns_op_list(self, ns_id, args).await
    }

    async fn ns_op(&self, ns_op_id: &NsOpId, args: &RequestArgs) -> Result<Payload> {
        OsmClient::ns_op(self, ns_op_id, args).await
    }

    async fn vnf_list(&self, args: &RequestArgs) -> Result<Payload> {
        OsmClient::vnf_list(self, args).await
    }

    async fn vnf_get(&self, vnf_id: &VnfId, args: &RequestArgs) -> Result<Payload> {
        OsmClient::vnf_get(self, vnf_id, args).await
    }

    async fn vnfpkg_list(&self, args: &RequestArgs) -> Result<Payload> {
        OsmClient::vnfpkg_list(self, args).await
    }

    async fn vnfpkg_get(&self, vnfpkg_id: &VnfPkgId, args: &RequestArgs) -> Result<Payload> {
        OsmClient::vnfpkg_get(self, vnfpkg_id, args).await
    }
}
