#![no_main]

//! Fuzz target for the validate/repair cycle.
//!
//! Builds a child set and a declared ordering from structured arbitrary
//! input, repairs the ordering, and checks that the result validates clean
//! and is a fixed point of repair.

use libfuzzer_sys::fuzz_target;
use orderfix_domain::{repair_declared, validate_order};
use orderfix_types::block::{Block, BlockType};
use orderfix_types::order::{ContentOrder, OrderEntry};

#[derive(Debug, arbitrary::Arbitrary)]
struct RepairInput {
    child_ids: Vec<String>,
    declared: Vec<DeclaredEntry>,
}

#[derive(Debug, arbitrary::Arbitrary)]
enum DeclaredEntry {
    Single(String),
    Group(Vec<String>),
}

fuzz_target!(|input: RepairInput| {
    let blocks: Vec<Block> = input
        .child_ids
        .iter()
        .enumerate()
        .map(|(i, id)| Block {
            id: id.clone(),
            parent_id: "card1".to_string(),
            block_type: BlockType::Text,
            create_at: i as i64,
            ..Block::default()
        })
        .collect();

    let declared = ContentOrder(
        input
            .declared
            .into_iter()
            .map(|entry| match entry {
                DeclaredEntry::Single(id) => OrderEntry::Single(id),
                DeclaredEntry::Group(ids) => OrderEntry::Group(ids),
            })
            .collect(),
    );

    let repaired = repair_declared(declared, &blocks);

    // A repaired ordering validates clean against the same child set.
    let check = validate_order(&repaired, &blocks);
    assert!(check.orphaned_ids.is_empty());
    assert!(check.missing_ids.is_empty());

    // And repairing it again changes nothing.
    let again = repair_declared(repaired.clone(), &blocks);
    assert_eq!(again, repaired);
});
