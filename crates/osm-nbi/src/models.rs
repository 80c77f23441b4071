//! Data models for the OSM northbound interface.
//!
//! Read views keep every field they do not name in `extra`, so converting a
//! payload into a model never loses data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Body of `POST admin/v1/tokens`.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    /// Login name
    pub username: &'a str,
    /// Password
    pub password: &'a str,
    /// Project the token is scoped to
    pub project_id: &'a str,
}

/// Token returned by the NBI.
#[derive(Clone, Deserialize)]
pub struct Token {
    /// Bearer token value
    pub id: String,
    /// Project the token is scoped to
    #[serde(default)]
    pub project_id: Option<String>,
    /// Expiry as a Unix timestamp
    #[serde(default)]
    pub expires: Option<f64>,
    /// Remaining token attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("id", &"[REDACTED]")
            .field("project_id", &self.project_id)
            .field("expires", &self.expires)
            .finish_non_exhaustive()
    }
}

/// Network service instance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NsInstance {
    /// Instance identifier
    pub id: String,
    /// Instance name
    #[serde(default)]
    pub name: Option<String>,
    /// SOL005 state (`NOT_INSTANTIATED`, `INSTANTIATED`, ...)
    #[serde(default, rename = "nsState")]
    pub ns_state: Option<String>,
    /// Operational status
    #[serde(default, rename = "operational-status")]
    pub operational_status: Option<String>,
    /// Configuration status
    #[serde(default, rename = "config-status")]
    pub config_status: Option<String>,
    /// NS descriptor identifier
    #[serde(default, rename = "nsd-id")]
    pub nsd_id: Option<String>,
    /// VNF records belonging to this instance
    #[serde(default, rename = "constituent-vnfr-ref")]
    pub constituent_vnfr_ref: Vec<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// VNF instance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VnfRecord {
    /// Record identifier
    pub id: String,
    /// Member index inside the owning NS
    #[serde(default, rename = "member-vnf-index-ref")]
    pub member_vnf_index_ref: Option<String>,
    /// Owning NS instance
    #[serde(default, rename = "nsr-id-ref")]
    pub nsr_id_ref: Option<String>,
    /// VNF descriptor reference
    #[serde(default, rename = "vnfd-ref")]
    pub vnfd_ref: Option<String>,
    /// Management IP address
    #[serde(default, rename = "ip-address")]
    pub ip_address: Option<String>,
    /// VIM account the VNF is deployed on
    #[serde(default, rename = "vim-account-id")]
    pub vim_account_id: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// VNF package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VnfPackage {
    /// Package identifier
    #[serde(rename = "_id")]
    pub package_id: String,
    /// Descriptor identifier declared inside the package
    #[serde(default)]
    pub id: Option<String>,
    /// Product name
    #[serde(default, rename = "product-name")]
    pub product_name: Option<String>,
    /// Provider
    #[serde(default)]
    pub provider: Option<String>,
    /// Descriptor version
    #[serde(default)]
    pub version: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// NS lifecycle operation occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NsLcmOpOcc {
    /// Occurrence identifier
    pub id: String,
    /// `PROCESSING`, `COMPLETED`, `FAILED`, ...
    #[serde(default)]
    pub operation_state: Option<String>,
    /// `instantiate`, `scale`, `action`, `terminate`, ...
    #[serde(default)]
    pub lcm_operation_type: Option<String>,
    /// NS instance the operation applies to
    #[serde(default)]
    pub ns_instance_id: Option<String>,
    /// Start time as a Unix timestamp
    #[serde(default)]
    pub start_time: Option<f64>,
    /// Last state change as a Unix timestamp
    #[serde(default)]
    pub status_entered_time: Option<f64>,
    /// Human-readable progress or failure description
    #[serde(default, rename = "detailed-status")]
    pub detailed_status: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
