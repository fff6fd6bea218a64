//! Rendering helpers (markdown) for human-readable artifacts.

use orderfix_types::report::{RepairReport, RepairStatus, ScanReport};

pub fn render_scan_md(report: &ScanReport) -> String {
    let mut out = String::new();
    out.push_str("# orderfix scan\n\n");
    out.push_str(&format!("- Cards scanned: {}\n", report.cards_scanned));
    out.push_str(&format!(
        "- Cards with issues: {}\n\n",
        report.cards_with_issues
    ));

    out.push_str("## Findings\n\n");
    if report.findings.is_empty() {
        out.push_str("_No findings._\n");
        return out;
    }

    for (i, finding) in report.findings.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, finding.card_id));
        if !finding.title.is_empty() {
            out.push_str(&format!("- Title: {}\n", finding.title));
        }
        if !finding.orphaned_ids.is_empty() {
            out.push_str(&format!(
                "- Orphaned: `{}`\n",
                finding.orphaned_ids.join("`, `")
            ));
        }
        if !finding.missing_ids.is_empty() {
            out.push_str(&format!(
                "- Missing: `{}`\n",
                finding.missing_ids.join("`, `")
            ));
        }
        out.push('\n');
    }

    out
}

pub fn render_repair_md(report: &RepairReport) -> String {
    let mut out = String::new();
    out.push_str("# orderfix repair\n\n");
    if report.dry_run {
        out.push_str("_Dry run: nothing was written._\n\n");
    }
    out.push_str(&format!("- Actor: `{}`\n", report.actor_id));
    out.push_str(&format!(
        "- Attempted: {}\n- Repaired: {}\n- Unchanged: {}\n- Skipped: {}\n- Failed: {}\n\n",
        report.summary.attempted,
        report.summary.repaired,
        report.summary.unchanged,
        report.summary.skipped,
        report.summary.failed
    ));

    out.push_str("## Cards\n\n");
    if report.cards.is_empty() {
        out.push_str("_No cards attempted._\n");
        return out;
    }

    for (i, card) in report.cards.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, card.card_id));
        out.push_str(&format!("- Status: `{}`\n", status_label(card.status)));
        if !card.orphaned_ids.is_empty() {
            out.push_str(&format!("- Orphaned: `{}`\n", card.orphaned_ids.join("`, `")));
        }
        if !card.missing_ids.is_empty() {
            out.push_str(&format!("- Missing: `{}`\n", card.missing_ids.join("`, `")));
        }
        if let Some(message) = &card.message {
            out.push_str(&format!("- Message: {}\n", message));
        }
        out.push('\n');
    }

    out
}

fn status_label(status: RepairStatus) -> &'static str {
    match status {
        RepairStatus::Repaired => "repaired",
        RepairStatus::Unchanged => "unchanged",
        RepairStatus::Skipped => "skipped",
        RepairStatus::Failed => "failed",
    }
}
