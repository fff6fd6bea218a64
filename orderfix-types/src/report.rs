use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the tool that produced an artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Read-only audit of card orderings against their stored children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub schema: String,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub tool: ToolInfo,

    pub cards_scanned: u64,
    pub cards_with_issues: u64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<CardFinding>,
}

impl ScanReport {
    pub fn new(tool: ToolInfo) -> Self {
        Self {
            schema: crate::schema::ORDERFIX_SCAN_V1.to_string(),
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            tool,
            cards_scanned: 0,
            cards_with_issues: 0,
            findings: vec![],
        }
    }
}

/// One card whose declared ordering disagrees with its stored children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFinding {
    pub card_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphaned_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_ids: Vec<String>,
}

/// Outcome of a repair run over one or more cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairReport {
    pub schema: String,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub tool: ToolInfo,

    pub actor_id: String,
    pub dry_run: bool,
    pub summary: RepairSummary,

    #[serde(default)]
    pub cards: Vec<CardRepair>,
}

impl RepairReport {
    pub fn new(tool: ToolInfo, actor_id: impl Into<String>, dry_run: bool) -> Self {
        Self {
            schema: crate::schema::ORDERFIX_REPAIR_V1.to_string(),
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            tool,
            actor_id: actor_id.into(),
            dry_run,
            summary: RepairSummary::default(),
            cards: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairSummary {
    pub attempted: u64,
    pub repaired: u64,
    pub unchanged: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl RepairSummary {
    pub fn record(&mut self, status: RepairStatus) {
        self.attempted += 1;
        match status {
            RepairStatus::Repaired => self.repaired += 1,
            RepairStatus::Unchanged => self.unchanged += 1,
            RepairStatus::Skipped => self.skipped += 1,
            RepairStatus::Failed => self.failed += 1,
        }
    }
}

/// Per-card record of a repair attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRepair {
    pub card_id: String,
    pub status: RepairStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphaned_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStatus {
    /// The declared ordering was rewritten.
    Repaired,
    /// Already consistent, nothing written.
    Unchanged,
    /// A rewrite is pending but the run was a dry-run.
    Skipped,
    Failed,
}
