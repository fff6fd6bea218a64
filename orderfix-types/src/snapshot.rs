use crate::block::Block;
use serde::{Deserialize, Serialize};

/// On-disk bundle of blocks, the unit the CLI scans and repairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSnapshot {
    pub schema: String,

    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl BlockSnapshot {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            schema: crate::schema::ORDERFIX_SNAPSHOT_V1.to_string(),
            blocks,
        }
    }

    /// Parses a snapshot document.
    ///
    /// A bare top-level array of blocks is accepted alongside the envelope
    /// form, so exports from other tools load without rewrapping. On failure
    /// the envelope error is reported; it carries the more useful message.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<Self>(text) {
            Ok(snapshot) => Ok(snapshot),
            Err(envelope_err) => match serde_json::from_str::<Vec<Block>>(text) {
                Ok(blocks) => Ok(Self::new(blocks)),
                Err(_) => Err(envelope_err),
            },
        }
    }
}
