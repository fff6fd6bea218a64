//! Scan and repair pipelines, independent of any storage backend.
//!
//! These entry points are I/O-agnostic: blocks are read and written through
//! [`BlockStore`] and artifacts land wherever the caller's [`WritePort`]
//! points.

use anyhow::Context;
use camino::Utf8Path;
use diffy::PatchFormatter;
use tracing::{debug, info, warn};

use orderfix_domain::validate_order;
use orderfix_types::block::{Block, BlockPatch};
use orderfix_types::order::ContentOrder;
use orderfix_types::report::{
    CardFinding, CardRepair, RepairReport, RepairStatus, ScanReport, ToolInfo,
};

use crate::error::RepairError;
use crate::ports::{BlockStore, WritePort};
use crate::render::{render_repair_md, render_scan_md};
use crate::settings::RepairSettings;

/// Outcome of `run_scan`.
pub struct ScanOutcome {
    pub report: ScanReport,
    /// Unified diff of every rewrite a repair would perform; empty when the
    /// store is consistent.
    pub patch: String,
}

/// Audits every card's declared ordering against its stored children.
///
/// Read-only: findings and the diff of what a repair run would rewrite are
/// returned, nothing is written back to the store.
pub fn run_scan(store: &dyn BlockStore, tool: ToolInfo) -> Result<ScanOutcome, RepairError> {
    let cards = store.get_cards()?;
    let mut report = ScanReport::new(tool);
    let mut patch = String::new();

    for card in &cards {
        let children = store.get_children(&card.id)?;
        let declared = card.content_order();
        let validation = validate_order(&declared, &children);

        report.cards_scanned += 1;
        if !validation.has_issues {
            continue;
        }

        debug!(
            card_id = %card.id,
            orphaned = validation.orphaned_ids.len(),
            missing = validation.missing_ids.len(),
            "inconsistent content order"
        );
        report.cards_with_issues += 1;
        report.findings.push(CardFinding {
            card_id: card.id.clone(),
            title: card.title.clone(),
            orphaned_ids: validation.orphaned_ids.clone(),
            missing_ids: validation.missing_ids.clone(),
        });
        patch.push_str(&render_order_diff(
            &card.id,
            &declared,
            &validation.into_repaired(),
        ));
    }

    Ok(ScanOutcome { report, patch })
}

/// Write all scan artifacts to the output directory.
pub fn write_scan_artifacts(
    outcome: &ScanOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let report_json =
        serde_json::to_string_pretty(&outcome.report).context("serialize scan report")?;
    writer.write_file(&out_dir.join("scan.json"), report_json.as_bytes())?;

    let scan_md = render_scan_md(&outcome.report);
    writer.write_file(&out_dir.join("scan.md"), scan_md.as_bytes())?;

    writer.write_file(&out_dir.join("orders.diff"), outcome.patch.as_bytes())?;

    Ok(())
}

/// Outcome of `run_repair`.
#[derive(Debug)]
pub struct RepairOutcome {
    pub report: RepairReport,
    /// Unified diff of every rewrite performed (or previewed on a dry run).
    pub patch: String,
}

/// Repairs the declared content ordering of one card.
///
/// Fails when the block does not exist or is not a card. A consistent card
/// is left entirely untouched, `update_at` included.
pub fn repair_card_order(
    store: &dyn BlockStore,
    card_id: &str,
    settings: &RepairSettings,
) -> Result<CardRepair, RepairError> {
    let card = fetch_card(store, card_id)?;
    let (repair, _) = repair_fetched_card(store, &card, settings)?;
    Ok(repair)
}

/// Repairs every card in the store, or just `settings.card_id` when set.
///
/// Per-card failures are recorded in the report and the run keeps going.
/// Only a failure to enumerate cards, or to resolve an explicitly requested
/// one, aborts the run.
pub fn run_repair(
    store: &dyn BlockStore,
    settings: &RepairSettings,
    tool: ToolInfo,
) -> Result<RepairOutcome, RepairError> {
    let cards = match &settings.card_id {
        Some(card_id) => vec![fetch_card(store, card_id)?],
        None => store.get_cards()?,
    };

    let mut report = RepairReport::new(tool, settings.actor_id.clone(), settings.dry_run);
    let mut patch = String::new();

    for card in &cards {
        let repair = match repair_fetched_card(store, card, settings) {
            Ok((repair, diff)) => {
                patch.push_str(&diff);
                repair
            }
            Err(err) => {
                warn!(card_id = %card.id, error = %err, "card repair failed");
                CardRepair {
                    card_id: card.id.clone(),
                    status: RepairStatus::Failed,
                    orphaned_ids: Vec::new(),
                    missing_ids: Vec::new(),
                    message: Some(err.to_string()),
                }
            }
        };
        report.summary.record(repair.status);
        report.cards.push(repair);
    }

    Ok(RepairOutcome { report, patch })
}

/// Write all repair artifacts to the output directory.
pub fn write_repair_artifacts(
    outcome: &RepairOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let report_json =
        serde_json::to_string_pretty(&outcome.report).context("serialize repair report")?;
    writer.write_file(&out_dir.join("repair.json"), report_json.as_bytes())?;

    let repair_md = render_repair_md(&outcome.report);
    writer.write_file(&out_dir.join("repair.md"), repair_md.as_bytes())?;

    writer.write_file(&out_dir.join("orders.diff"), outcome.patch.as_bytes())?;

    Ok(())
}

fn fetch_card(store: &dyn BlockStore, card_id: &str) -> Result<Block, RepairError> {
    let card = store.get_block(card_id)?;
    if !card.is_card() {
        return Err(RepairError::NotACard {
            block_id: card.id,
            block_type: card.block_type,
        });
    }
    Ok(card)
}

fn repair_fetched_card(
    store: &dyn BlockStore,
    card: &Block,
    settings: &RepairSettings,
) -> Result<(CardRepair, String), RepairError> {
    let children = store.get_children(&card.id)?;
    let declared = card.content_order();
    let validation = validate_order(&declared, &children);

    if !validation.has_issues {
        debug!(card_id = %card.id, "content order consistent");
        return Ok((
            CardRepair {
                card_id: card.id.clone(),
                status: RepairStatus::Unchanged,
                orphaned_ids: Vec::new(),
                missing_ids: Vec::new(),
                message: None,
            },
            String::new(),
        ));
    }

    let orphaned_ids = validation.orphaned_ids.clone();
    let missing_ids = validation.missing_ids.clone();
    let repaired = validation.into_repaired();
    let diff = render_order_diff(&card.id, &declared, &repaired);

    let status = if settings.dry_run {
        debug!(card_id = %card.id, "dry run, skipping write");
        RepairStatus::Skipped
    } else {
        let patch = BlockPatch::content_order(&repaired).with_expected_update_at(card.update_at);
        store.patch_block(&card.id, &patch, &settings.actor_id)?;
        info!(
            card_id = %card.id,
            orphaned = orphaned_ids.len(),
            missing = missing_ids.len(),
            "repaired content order"
        );
        RepairStatus::Repaired
    };

    Ok((
        CardRepair {
            card_id: card.id.clone(),
            status,
            orphaned_ids,
            missing_ids,
            message: None,
        },
        diff,
    ))
}

fn render_order_diff(card_id: &str, declared: &ContentOrder, repaired: &ContentOrder) -> String {
    let old = format!("{:#}\n", declared.to_value());
    let new = format!("{:#}\n", repaired.to_value());

    let mut out = String::new();
    out.push_str(&format!(
        "diff --git a/cards/{0}/contentOrder.json b/cards/{0}/contentOrder.json\n",
        card_id
    ));
    out.push_str(&format!(
        "--- a/cards/{0}/contentOrder.json\n+++ b/cards/{0}/contentOrder.json\n",
        card_id
    ));

    let patch = diffy::create_patch(&old, &new);
    out.push_str(&PatchFormatter::new().fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
