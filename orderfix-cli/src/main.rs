//! Command line entry point for orderfix.
//!
//! `orderfix scan` audits every card in a snapshot and reports ordering
//! issues without touching it. `orderfix repair` rewrites inconsistent
//! orderings and saves the snapshot in place. Both write their reports
//! under an artifact directory.

use std::process::ExitCode;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use orderfix_core::adapters::{FsWritePort, SnapshotStore};
use orderfix_core::pipeline::{run_repair, run_scan, write_repair_artifacts, write_scan_artifacts};
use orderfix_core::settings::{DEFAULT_ACTOR, RepairSettings};
use orderfix_types::report::ToolInfo;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "orderfix",
    version,
    about = "Validate and repair the content ordering of card blocks"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report ordering issues without changing anything. Exits with code 2
    /// when any card has issues.
    Scan(ScanArgs),

    /// Rewrite inconsistent orderings and save the snapshot in place. Exits
    /// with code 1 when any card could not be repaired.
    Repair(RepairArgs),
}

#[derive(Debug, Parser)]
struct ScanArgs {
    /// Snapshot file holding the blocks to audit.
    #[arg(long)]
    snapshot: Utf8PathBuf,

    /// Directory for scan artifacts (scan.json, scan.md, orders.diff).
    #[arg(long, default_value = "artifacts/orderfix")]
    out_dir: Utf8PathBuf,
}

#[derive(Debug, Parser)]
struct RepairArgs {
    /// Snapshot file holding the blocks to repair.
    #[arg(long)]
    snapshot: Utf8PathBuf,

    /// Repair one card instead of every card in the snapshot.
    #[arg(long)]
    card: Option<String>,

    /// Actor recorded as `modified_by` on rewritten cards.
    #[arg(long, default_value = DEFAULT_ACTOR)]
    actor: String,

    /// Compute and report repairs without writing anything back.
    #[arg(long)]
    dry_run: bool,

    /// Directory for repair artifacts (repair.json, repair.md, orders.diff).
    #[arg(long, default_value = "artifacts/orderfix")]
    out_dir: Utf8PathBuf,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Scan(args) => cmd_scan(args),
        Command::Repair(args) => cmd_repair(args),
    }
}

fn cmd_scan(args: ScanArgs) -> anyhow::Result<ExitCode> {
    let store = SnapshotStore::load(&args.snapshot)
        .with_context(|| format!("load snapshot {}", args.snapshot))?;

    let outcome = run_scan(&store, tool_info())?;
    write_scan_artifacts(&outcome, &args.out_dir, &FsWritePort)?;

    info!(
        cards = outcome.report.cards_scanned,
        issues = outcome.report.cards_with_issues,
        "wrote scan artifacts to {}",
        args.out_dir
    );

    if outcome.report.cards_with_issues > 0 {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_repair(args: RepairArgs) -> anyhow::Result<ExitCode> {
    let store = SnapshotStore::load(&args.snapshot)
        .with_context(|| format!("load snapshot {}", args.snapshot))?;

    let settings = RepairSettings {
        actor_id: args.actor,
        card_id: args.card,
        dry_run: args.dry_run,
    };

    let outcome = run_repair(&store, &settings, tool_info())?;
    write_repair_artifacts(&outcome, &args.out_dir, &FsWritePort)?;

    // The snapshot is only rewritten when a repair actually landed.
    if outcome.report.summary.repaired > 0 && !settings.dry_run {
        store
            .save()
            .with_context(|| format!("save snapshot {}", store.path()))?;
    }

    info!(
        repaired = outcome.report.summary.repaired,
        unchanged = outcome.report.summary.unchanged,
        failed = outcome.report.summary.failed,
        "wrote repair artifacts to {}",
        args.out_dir
    );

    if outcome.report.summary.failed > 0 {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "orderfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
