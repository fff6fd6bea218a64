//! Embeddable core library for orderfix.
//!
//! Provides a clap-free, I/O-abstracted scan and repair pipeline suitable
//! for linking into a host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`BlockStore`](ports::BlockStore) — read and patch stored blocks
//! - [`WritePort`](ports::WritePort) — write files and create directories
//!
//! The [`adapters`] module provides in-memory and snapshot-file-backed
//! implementations.
//!
//! # Entry points
//!
//! - [`run_scan`](pipeline::run_scan) — audit card orderings, no writes
//! - [`run_repair`](pipeline::run_repair) — rewrite inconsistent orderings
//! - [`repair_card_order`](pipeline::repair_card_order) — repair one card

pub mod adapters;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod render;
pub mod settings;

pub use error::{RepairError, StoreError};
