//! Default block-store and write-port implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use fs_err as fs;
use tracing::debug;

use orderfix_types::block::{Block, BlockPatch};
use orderfix_types::snapshot::BlockSnapshot;

use crate::error::StoreError;
use crate::ports::{BlockStore, WritePort};

fn sort_blocks(blocks: &mut [Block]) {
    blocks.sort_by(|a, b| a.create_at.cmp(&b.create_at).then_with(|| a.id.cmp(&b.id)));
}

/// In-memory block store for embedding and testing.
#[derive(Debug, Default)]
pub struct MemoryBlockStore {
    blocks: Mutex<HashMap<String, Block>>,
}

impl MemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        let blocks = blocks
            .into_iter()
            .map(|block| (block.id.clone(), block))
            .collect();
        Self {
            blocks: Mutex::new(blocks),
        }
    }

    pub fn insert(&self, block: Block) {
        self.blocks
            .lock()
            .expect("lock blocks")
            .insert(block.id.clone(), block);
    }

    /// Every stored block, ordered by `create_at`, then by identifier.
    pub fn blocks(&self) -> Vec<Block> {
        let mut all: Vec<Block> = self
            .blocks
            .lock()
            .expect("lock blocks")
            .values()
            .cloned()
            .collect();
        sort_blocks(&mut all);
        all
    }
}

impl BlockStore for MemoryBlockStore {
    fn get_block(&self, block_id: &str) -> Result<Block, StoreError> {
        self.blocks
            .lock()
            .expect("lock blocks")
            .get(block_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(block_id.to_string()))
    }

    fn get_children(&self, parent_id: &str) -> Result<Vec<Block>, StoreError> {
        let mut children: Vec<Block> = self
            .blocks
            .lock()
            .expect("lock blocks")
            .values()
            .filter(|block| block.parent_id == parent_id)
            .cloned()
            .collect();
        sort_blocks(&mut children);
        Ok(children)
    }

    fn get_cards(&self) -> Result<Vec<Block>, StoreError> {
        let mut cards: Vec<Block> = self
            .blocks
            .lock()
            .expect("lock blocks")
            .values()
            .filter(|block| block.is_card())
            .cloned()
            .collect();
        sort_blocks(&mut cards);
        Ok(cards)
    }

    fn patch_block(
        &self,
        block_id: &str,
        patch: &BlockPatch,
        modified_by: &str,
    ) -> Result<Block, StoreError> {
        let mut blocks = self.blocks.lock().expect("lock blocks");
        let block = blocks
            .get_mut(block_id)
            .ok_or_else(|| StoreError::NotFound(block_id.to_string()))?;

        if let Some(expected) = patch.expected_update_at
            && block.update_at != expected
        {
            return Err(StoreError::Conflict {
                block_id: block_id.to_string(),
                expected_update_at: expected,
                actual_update_at: block.update_at,
            });
        }

        for (key, value) in &patch.updated_fields {
            block.fields.insert(key.clone(), value.clone());
        }
        block.modified_by = modified_by.to_string();
        block.update_at = Utc::now().timestamp_millis();
        Ok(block.clone())
    }
}

/// Snapshot-file-backed store.
///
/// Loads every block into memory on construction; nothing touches the file
/// again until [`save`](Self::save) writes the full set back.
#[derive(Debug)]
pub struct SnapshotStore {
    path: Utf8PathBuf,
    inner: MemoryBlockStore,
}

impl SnapshotStore {
    pub fn load(path: impl Into<Utf8PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        let snapshot = BlockSnapshot::parse(&text).map_err(|err| StoreError::Decode {
            path: path.to_string(),
            message: err.to_string(),
        })?;
        debug!(path = %path, blocks = snapshot.blocks.len(), "loaded snapshot");
        Ok(Self {
            inner: MemoryBlockStore::with_blocks(snapshot.blocks),
            path,
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Writes the current block set back to the snapshot file.
    pub fn save(&self) -> Result<(), StoreError> {
        let snapshot = BlockSnapshot::new(self.inner.blocks());
        let json = serde_json::to_string_pretty(&snapshot).map_err(std::io::Error::from)?;
        fs::write(&self.path, format!("{json}\n"))?;
        debug!(path = %self.path, blocks = snapshot.blocks.len(), "saved snapshot");
        Ok(())
    }
}

impl BlockStore for SnapshotStore {
    fn get_block(&self, block_id: &str) -> Result<Block, StoreError> {
        self.inner.get_block(block_id)
    }

    fn get_children(&self, parent_id: &str) -> Result<Vec<Block>, StoreError> {
        self.inner.get_children(parent_id)
    }

    fn get_cards(&self) -> Result<Vec<Block>, StoreError> {
        self.inner.get_cards()
    }

    fn patch_block(
        &self,
        block_id: &str,
        patch: &BlockPatch,
        modified_by: &str,
    ) -> Result<Block, StoreError> {
        self.inner.patch_block(block_id, patch, modified_by)
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }
}
