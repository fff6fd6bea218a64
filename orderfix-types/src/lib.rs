//! Shared DTOs (schemas-as-code) for the orderfix workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk.
//! - Ingestion is tolerant: unknown fields are ignored and optional fields
//!   may be absent, so blocks "as found" still load.
//! - Prefer adding optional fields over changing semantics.

pub mod block;
pub mod order;
pub mod report;
pub mod snapshot;

/// Schema identifiers.
pub mod schema {
    pub const ORDERFIX_SNAPSHOT_V1: &str = "orderfix.snapshot.v1";
    pub const ORDERFIX_SCAN_V1: &str = "orderfix.scan.v1";
    pub const ORDERFIX_REPAIR_V1: &str = "orderfix.repair.v1";
}
