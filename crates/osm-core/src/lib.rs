//! # osm-core
//!
//! Core types and utilities for talking to an OSM (Open Source MANO) orchestrator.
//!
//! This crate provides the error taxonomy, configuration, identifiers, response
//! decoding and the shared HTTP transport used by the northbound-interface client.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`ids`] - Strongly-typed identifier wrappers for OSM resources
//! - [`types`] - Request arguments shared by every operation
//! - [`response`] - Response decoding and status classification
//! - [`config`] - Connection configuration for OSM clients
//! - [`client`] - HTTP transport and client tuning
//! - [`query`] - Query parameter builder
//! - [`driver`] - Orchestrator-agnostic driver trait

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod ids;
pub mod query;
pub mod response;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use response::Payload;
