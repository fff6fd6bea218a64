use std::collections::HashSet;

use orderfix_types::block::Block;
use orderfix_types::order::{ContentOrder, OrderEntry};

/// Classification of a declared ordering against a card's stored children.
///
/// Produced by [`validate_order`]; consumed by the repair functions in this
/// crate. `has_issues` is true exactly when `orphaned_ids` or `missing_ids`
/// is non-empty. Entries the decoder already discarded (nulls, non-string
/// junk) never count as issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderValidation {
    /// Declared entries that survived filtering, grouping intact.
    pub valid_order: ContentOrder,
    /// Identifiers declared in the ordering but absent from the child set.
    pub orphaned_ids: Vec<String>,
    /// Child identifiers the declared ordering never mentions.
    pub missing_ids: Vec<String>,
    /// Whether the ordering needs repair.
    pub has_issues: bool,
}

/// Checks a declared ordering against the actual child blocks.
///
/// Walks the declared entries in order. An identifier backed by a child is
/// kept; an unknown identifier is recorded as orphaned. Groups keep their
/// surviving members and stay groups; a group whose members all vanish is
/// dropped from the valid ordering without being flagged. Children the
/// ordering never mentions are recorded as missing, in `blocks` order.
///
/// Duplicate identifiers in the declared ordering are preserved as declared.
/// The first occurrence marks the child as seen, so duplicates do not cause
/// it to also be reported missing.
pub fn validate_order(declared: &ContentOrder, blocks: &[Block]) -> OrderValidation {
    let mut result = OrderValidation::default();

    let known: HashSet<&str> = blocks.iter().map(|block| block.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for entry in declared {
        match entry {
            OrderEntry::Single(id) => {
                if known.contains(id.as_str()) {
                    seen.insert(id.as_str());
                    result.valid_order.push(OrderEntry::Single(id.clone()));
                } else {
                    result.orphaned_ids.push(id.clone());
                    result.has_issues = true;
                }
            }
            OrderEntry::Group(ids) => {
                let mut kept = Vec::with_capacity(ids.len());
                for id in ids {
                    if known.contains(id.as_str()) {
                        seen.insert(id.as_str());
                        kept.push(id.clone());
                    } else {
                        result.orphaned_ids.push(id.clone());
                        result.has_issues = true;
                    }
                }
                // A group never collapses to a single entry; one with no
                // survivors simply disappears.
                if !kept.is_empty() {
                    result.valid_order.push(OrderEntry::Group(kept));
                }
            }
        }
    }

    for block in blocks {
        if !seen.contains(block.id.as_str()) {
            result.missing_ids.push(block.id.clone());
            result.has_issues = true;
        }
    }

    result
}
