use orderfix_types::block::Block;
use orderfix_types::order::{ContentOrder, OrderEntry};

use crate::validate::{OrderValidation, validate_order};

impl OrderValidation {
    /// Builds the corrected ordering: surviving declared entries first, then
    /// every missing identifier appended flat, in child order. Missing
    /// entries are never folded into existing groups.
    pub fn into_repaired(self) -> ContentOrder {
        let mut repaired = self.valid_order;
        repaired.extend(self.missing_ids.into_iter().map(OrderEntry::Single));
        repaired
    }
}

/// Corrects a declared ordering against the actual child set.
///
/// Identity on consistent input: when validation finds nothing wrong the
/// declared ordering is handed back untouched, so callers can compare
/// against the stored value and skip a write.
pub fn repair_declared(declared: ContentOrder, blocks: &[Block]) -> ContentOrder {
    let validation = validate_order(&declared, blocks);
    if !validation.has_issues {
        return declared;
    }
    validation.into_repaired()
}

/// Repairs the content ordering of a card that may not exist.
///
/// An absent card yields an empty ordering rather than an error. A card
/// whose order field is missing, null, or malformed is treated as declaring
/// nothing, which puts every child in the repaired ordering.
pub fn repair_order(card: Option<&Block>, blocks: &[Block]) -> ContentOrder {
    match card {
        Some(card) => repair_declared(card.content_order(), blocks),
        None => ContentOrder::default(),
    }
}

#[cfg(test)]
mod tests {
    use orderfix_types::block::{Block, BlockType, CONTENT_ORDER_FIELD};
    use pretty_assertions::assert_eq;
    use serde_json::{Map, Value, json};

    use super::*;

    fn block(id: &str) -> Block {
        Block {
            id: id.to_string(),
            block_type: BlockType::Text,
            ..Block::default()
        }
    }

    fn card_with_order(value: Value) -> Block {
        let mut fields = Map::new();
        fields.insert(CONTENT_ORDER_FIELD.to_string(), value);
        Block {
            id: "card1".to_string(),
            block_type: BlockType::Card,
            fields,
            ..Block::default()
        }
    }

    fn single(id: &str) -> OrderEntry {
        OrderEntry::Single(id.to_string())
    }

    fn group(ids: &[&str]) -> OrderEntry {
        OrderEntry::Group(ids.iter().map(|id| id.to_string()).collect())
    }

    #[test]
    fn valid_order_remains_unchanged() {
        let declared = ContentOrder(vec![single("block1"), single("block2")]);
        let blocks = vec![block("block1"), block("block2")];

        assert_eq!(repair_declared(declared.clone(), &blocks), declared);
    }

    #[test]
    fn consistent_order_is_returned_verbatim() {
        // The decoder keeps empty groups; a consistent ordering must come
        // back structurally identical so no write is triggered for it.
        let declared = ContentOrder(vec![single("block1"), group(&[])]);
        let blocks = vec![block("block1")];

        assert_eq!(repair_declared(declared.clone(), &blocks), declared);
    }

    #[test]
    fn removes_orphaned_identifiers() {
        let declared = ContentOrder(vec![single("block1"), single("ghost"), single("block2")]);
        let blocks = vec![block("block1"), block("block2")];

        assert_eq!(
            repair_declared(declared, &blocks),
            ContentOrder(vec![single("block1"), single("block2")])
        );
    }

    #[test]
    fn appends_missing_blocks() {
        let declared = ContentOrder(vec![single("block1")]);
        let blocks = vec![block("block1"), block("block2"), block("block3")];

        assert_eq!(
            repair_declared(declared, &blocks),
            ContentOrder(vec![single("block1"), single("block2"), single("block3")])
        );
    }

    #[test]
    fn handles_orphaned_and_missing_together() {
        let declared = ContentOrder(vec![single("block1"), single("ghost")]);
        let blocks = vec![block("block1"), block("block2")];

        assert_eq!(
            repair_declared(declared, &blocks),
            ContentOrder(vec![single("block1"), single("block2")])
        );
    }

    #[test]
    fn filters_groups_and_appends_missing_after_them() {
        let declared = ContentOrder(vec![
            single("block1"),
            group(&["block2", "ghost", "block3"]),
        ]);
        let blocks = vec![
            block("block1"),
            block("block2"),
            block("block3"),
            block("block4"),
        ];

        assert_eq!(
            repair_declared(declared, &blocks),
            ContentOrder(vec![
                single("block1"),
                group(&["block2", "block3"]),
                single("block4"),
            ])
        );
    }

    #[test]
    fn group_with_missing_sibling_keeps_its_shape() {
        let declared = ContentOrder(vec![single("block1"), group(&["block2"])]);
        let blocks = vec![block("block1"), block("block2"), block("block3")];

        assert_eq!(
            repair_declared(declared, &blocks),
            ContentOrder(vec![single("block1"), group(&["block2"]), single("block3")])
        );
    }

    #[test]
    fn repairs_a_heavily_damaged_order() {
        let declared = ContentOrder(vec![
            single("block1"),
            single("ghost-1"),
            group(&["block2", "ghost-2", "block3"]),
            single("ghost-3"),
        ]);
        let blocks = vec![
            block("block1"),
            block("block2"),
            block("block3"),
            block("block4"),
            block("block5"),
        ];

        assert_eq!(
            repair_declared(declared, &blocks),
            ContentOrder(vec![
                single("block1"),
                group(&["block2", "block3"]),
                single("block4"),
                single("block5"),
            ])
        );
    }

    #[test]
    fn maintains_declared_position_of_valid_blocks() {
        let declared = ContentOrder(vec![single("block1"), single("block2"), single("block4")]);
        let blocks = vec![
            block("block1"),
            block("block2"),
            block("block3"),
            block("block4"),
        ];

        assert_eq!(
            repair_declared(declared, &blocks),
            ContentOrder(vec![
                single("block1"),
                single("block2"),
                single("block4"),
                single("block3"),
            ])
        );
    }

    #[test]
    fn absent_card_yields_an_empty_order() {
        let blocks = vec![block("block1")];

        assert_eq!(repair_order(None, &blocks), ContentOrder::default());
    }

    #[test]
    fn card_without_field_map_declares_nothing() {
        let card = Block {
            id: "card1".to_string(),
            block_type: BlockType::Card,
            ..Block::default()
        };
        let blocks = vec![block("block1")];

        assert_eq!(
            repair_order(Some(&card), &blocks),
            ContentOrder(vec![single("block1")])
        );
    }

    #[test]
    fn null_order_field_declares_nothing() {
        let card = card_with_order(Value::Null);
        let blocks = vec![block("block1"), block("block2")];

        assert_eq!(
            repair_order(Some(&card), &blocks),
            ContentOrder(vec![single("block1"), single("block2")])
        );
    }

    #[test]
    fn non_array_order_field_declares_nothing() {
        let card = card_with_order(json!("invalid"));
        let blocks = vec![block("block1")];

        assert_eq!(
            repair_order(Some(&card), &blocks),
            ContentOrder(vec![single("block1")])
        );
    }

    #[test]
    fn empty_order_and_no_blocks_stay_empty() {
        let card = card_with_order(json!([]));

        assert_eq!(repair_order(Some(&card), &[]), ContentOrder::default());
    }
}
