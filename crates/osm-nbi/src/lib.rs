//! OSM northbound interface client.
//!
//! Maps network service lifecycle operations onto the OSM NBI REST endpoints and
//! classifies the responses into [`osm_core::Error`] variants.
//!
//! ```no_run
//! use osm_core::config::OsmConfig;
//! use osm_core::ids::NsId;
//! use osm_core::types::RequestArgs;
//! use osm_nbi::OsmClient;
//!
//! # async fn run() -> osm_nbi::Result<()> {
//! let client = OsmClient::connect(OsmConfig::new("osm.example.com", 9999)?).await?;
//! let ns = client.ns_get(&NsId::from("abc123"), &RequestArgs::new()).await?;
//! println!("{ns}");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{OsmClient, OsmClientBuilder};
pub use models::{NsInstance, NsLcmOpOcc, Token, TokenRequest, VnfPackage, VnfRecord};

/// Convenient result alias that reuses the shared OSM error type.
pub type Result<T> = osm_core::Result<T>;
