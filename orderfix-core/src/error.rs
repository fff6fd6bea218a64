//! Error types for orderfix storage and repair.
//!
//! Store failures and repair failures are separate enums so that a batch
//! repair can record per-card failures and keep going, while the pipeline
//! entry points stay free to fail fast on store-level breakage.

use orderfix_types::block::BlockType;
use thiserror::Error;

/// Errors surfaced by [`BlockStore`](crate::ports::BlockStore) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No block exists under the requested identifier.
    #[error("block {0} not found")]
    NotFound(String),

    /// The block changed between read and write.
    #[error(
        "block {block_id} was modified concurrently \
         (expected update_at {expected_update_at}, found {actual_update_at})"
    )]
    Conflict {
        block_id: String,
        expected_update_at: i64,
        actual_update_at: i64,
    },

    /// The snapshot file could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The snapshot file held something other than a block snapshot.
    #[error("decode {path}: {message}")]
    Decode {
        /// Path of the offending snapshot file.
        path: String,
        message: String,
    },
}

/// Errors surfaced by the repair pipeline.
#[derive(Debug, Error)]
pub enum RepairError {
    /// Content orderings only exist on cards.
    #[error("block {block_id} is not a card (type {block_type})")]
    NotACard {
        block_id: String,
        block_type: BlockType,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
