use crate::order::ContentOrder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field key on a card holding the declared ordering of its content blocks.
pub const CONTENT_ORDER_FIELD: &str = "contentOrder";

/// A stored block: board, card, or a piece of card content.
///
/// Ingestion is tolerant. Everything except `id` defaults when absent, and
/// an empty `parent_id` means the block has no parent (boards). Timestamps
/// are epoch milliseconds, matching the stored representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_id: String,

    #[serde(rename = "type", default)]
    pub block_type: BlockType,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub board_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Opaque per-type payload. Cards keep their declared ordering here
    /// under [`CONTENT_ORDER_FIELD`].
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub modified_by: String,

    #[serde(default)]
    pub create_at: i64,

    #[serde(default)]
    pub update_at: i64,
}

impl Block {
    /// Decodes the block's declared content ordering from its field map.
    /// Missing key, null, or a malformed value all decode to an empty order.
    pub fn content_order(&self) -> ContentOrder {
        ContentOrder::from_value(self.fields.get(CONTENT_ORDER_FIELD))
    }

    pub fn is_card(&self) -> bool {
        self.block_type == BlockType::Card
    }
}

/// Kind of a stored block.
///
/// Unrecognized kinds deserialize as `Unknown` so foreign snapshots load
/// instead of failing ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Board,
    Card,
    Text,
    Image,
    Divider,
    Checkbox,
    Comment,
    View,
    Video,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockType::Board => "board",
            BlockType::Card => "card",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Divider => "divider",
            BlockType::Checkbox => "checkbox",
            BlockType::Comment => "comment",
            BlockType::View => "view",
            BlockType::Video => "video",
            BlockType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Partial update applied to a stored block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    /// Field entries merged into the block's field map.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub updated_fields: Map<String, Value>,

    /// Optimistic-concurrency guard: when set, the store rejects the patch
    /// if the block's `update_at` no longer matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_update_at: Option<i64>,
}

impl BlockPatch {
    /// Patch that rewrites the declared content ordering.
    pub fn content_order(order: &ContentOrder) -> Self {
        let mut updated_fields = Map::new();
        updated_fields.insert(CONTENT_ORDER_FIELD.to_string(), order.to_value());
        Self {
            updated_fields,
            expected_update_at: None,
        }
    }

    pub fn with_expected_update_at(mut self, update_at: i64) -> Self {
        self.expected_update_at = Some(update_at);
        self
    }
}
