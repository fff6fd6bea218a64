//! Port traits abstracting block storage and artifact output away from the
//! pipelines.

use camino::Utf8Path;
use orderfix_types::block::{Block, BlockPatch};

use crate::error::StoreError;

/// Store of blocks keyed by identifier.
///
/// `get_children` and `get_cards` return blocks ordered by `create_at`,
/// then by identifier. Repair treats that ordering as the ground truth when
/// appending unlisted children, so implementations must keep it stable.
pub trait BlockStore {
    fn get_block(&self, block_id: &str) -> Result<Block, StoreError>;

    /// All blocks whose `parent_id` is the given identifier.
    fn get_children(&self, parent_id: &str) -> Result<Vec<Block>, StoreError>;

    /// All blocks of type card.
    fn get_cards(&self) -> Result<Vec<Block>, StoreError>;

    /// Merges `patch` into the stored block, stamping `modified_by` and a
    /// fresh `update_at`. Fails with [`StoreError::Conflict`] when the patch
    /// carries `expected_update_at` and the stored block has moved on.
    fn patch_block(
        &self,
        block_id: &str,
        patch: &BlockPatch,
        modified_by: &str,
    ) -> Result<Block, StoreError>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
