//! Orchestrator-agnostic driver trait.
//!
//! An adaptation layer holds an `Arc<dyn NfvoDriver>` and dispatches NS lifecycle
//! requests without knowing which orchestrator sits behind it.

use crate::ids::{NsId, NsOpId, VnfId, VnfPkgId};
use crate::response::Payload;
use crate::types::RequestArgs;
use crate::Result;

/// Network service lifecycle operations exposed by an NFV orchestrator.
///
/// Resource-scoped operations report a missing resource with the matching
/// resource-specific not-found error carrying the identifier that was requested.
#[async_trait::async_trait]
pub trait NfvoDriver: Send + Sync {
    /// List NS instances.
    async fn ns_list(&self, args: &RequestArgs) -> Result<Payload>;

    /// Create an NS instance from `args.payload`.
    async fn ns_create(&self, args: &RequestArgs) -> Result<Payload>;

    /// Fetch one NS instance.
    async fn ns_get(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload>;

    /// Delete an NS instance.
    async fn ns_delete(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload>;

    /// Instantiate an NS instance.
    async fn ns_instantiate(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload>;

    /// Run a primitive action on an NS instance.
    async fn ns_action(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload>;

    /// Scale an NS instance.
    async fn ns_scale(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload>;

    /// Terminate an NS instance.
    async fn ns_terminate(&self, ns_id: &NsId, args: &RequestArgs) -> Result<Payload>;

    /// List LCM operation occurrences, optionally for one NS instance.
    async fn ns_op_list(&self, ns_id: Option<&NsId>, args: &RequestArgs) -> Result<Payload>;

    /// Fetch one LCM operation occurrence.
    async fn ns_op(&self, ns_op_id: &NsOpId, args: &RequestArgs) -> Result<Payload>;

    /// List VNF instance records.
    async fn vnf_list(&self, args: &RequestArgs) -> Result<Payload>;

    /// Fetch one VNF instance record.
    async fn vnf_get(&self, vnf_id: &VnfId, args: &RequestArgs) -> Result<Payload>;

    /// List VNF packages.
    async fn vnfpkg_list(&self, args: &RequestArgs) -> Result<Payload>;

    /// Fetch one VNF package.
    async fn vnfpkg_get(&self, vnfpkg_id: &VnfPkgId, args: &RequestArgs) -> Result<Payload>;
}
