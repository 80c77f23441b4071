//! Integration tests for parsing OSM NBI data.
//!
//! These tests validate that the osm-nbi models deserialize representative NBI
//! records, and that YAML and JSON renderings of the same record decode alike.

use osm_core::response::decode_body;
use osm_core::Payload;
use osm_nbi::models::{NsInstance, NsLcmOpOcc, VnfPackage, VnfRecord};
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

fn decode_json(name: &str) -> Payload {
    decode_body(Some("application/json"), &load_fixture(name))
        .unwrap_or_else(|e| panic!("Failed to decode {name}: {e}"))
}

#[test]
fn test_ns_instance_yaml_and_json_agree() {
    let from_json = decode_json("ns_instance.json");
    let from_yaml = decode_body(Some("application/yaml"), &load_fixture("ns_instance.yaml"))
        .expect("YAML fixture should decode");

    assert_eq!(from_json, from_yaml);
}

#[test]
fn test_deserialize_ns_instance() {
    let ns: NsInstance = decode_json("ns_instance.json").deserialize().unwrap();

    assert_eq!(ns.id, "f48163a6-c807-47bc-9682-f72caef5af85");
    assert_eq!(ns.name.as_deref(), Some("vepc-edge-01"));
    assert_eq!(ns.ns_state.as_deref(), Some("INSTANTIATED"));
    assert_eq!(ns.operational_status.as_deref(), Some("running"));
    assert_eq!(ns.config_status.as_deref(), Some("configured"));
    assert_eq!(
        ns.nsd_id.as_deref(),
        Some("b9e7c4e0-3e5f-4a63-8a2c-8b2f0c9f9d11")
    );
    assert_eq!(ns.constituent_vnfr_ref.len(), 2);

    // Unmodelled attributes are preserved
    assert!(ns.extra.contains_key("_admin"));
    assert!(ns.extra.contains_key("vld"));
    assert_eq!(
        ns.extra.get("nsd-name-ref").and_then(|v| v.as_str()),
        Some("vepc_nsd")
    );
}

#[test]
fn test_deserialize_vnfr_list() {
    let vnfrs: Vec<VnfRecord> = decode_json("vnfr_list.json").deserialize().unwrap();
    assert_eq!(vnfrs.len(), 2, "Expected 2 VNF records in test data");

    let mme = vnfrs
        .iter()
        .find(|vnfr| vnfr.vnfd_ref.as_deref() == Some("mme_vnfd"))
        .expect("Should have an MME record");
    assert_eq!(mme.member_vnf_index_ref.as_deref(), Some("1"));
    assert_eq!(mme.ip_address.as_deref(), Some("10.0.10.21"));
    assert!(mme.extra.contains_key("vdur"));

    // The second record has no management address yet
    let spgw = &vnfrs[1];
    assert!(spgw.ip_address.is_none());
    assert_eq!(spgw.nsr_id_ref, mme.nsr_id_ref);
}

#[test]
fn test_deserialize_vnf_package() {
    let package: VnfPackage = decode_json("vnf_package.json").deserialize().unwrap();

    assert_eq!(package.package_id, "3d2e1f0a-9b8c-4d7e-a6f5-e4d3c2b1a090");
    assert_eq!(package.id.as_deref(), Some("mme_vnfd"));
    assert_eq!(package.provider.as_deref(), Some("ACME Networks"));
    assert_eq!(package.version.as_deref(), Some("2.1"));
    assert_eq!(
        package
            .extra
            .get("_admin")
            .and_then(|admin| admin.get("onboardingState"))
            .and_then(|state| state.as_str()),
        Some("ONBOARDED")
    );
}

#[test]
fn test_deserialize_ns_lcm_op_occs() {
    let ops: Vec<NsLcmOpOcc> = decode_json("ns_lcm_op_occs.json").deserialize().unwrap();
    assert_eq!(ops.len(), 2);

    let failed = ops
        .iter()
        .find(|op| op.operation_state.as_deref() == Some("FAILED"))
        .expect("Should have a failed operation");
    assert_eq!(failed.lcm_operation_type.as_deref(), Some("scale"));
    assert!(failed
        .detailed_status
        .as_deref()
        .is_some_and(|status| status.contains("max-instance-count")));
    assert!(failed.start_time.is_some());
    assert!(failed.status_entered_time.is_some());

    assert!(ops
        .iter()
        .all(|op| op.ns_instance_id.as_deref() == Some("f48163a6-c807-47bc-9682-f72caef5af85")));
}
