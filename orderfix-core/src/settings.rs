//! Clap-free settings for the repair pipeline.

/// Actor recorded as `modified_by` on repaired blocks when none is given.
pub const DEFAULT_ACTOR: &str = "orderfix";

/// Settings for the repair pipeline.
#[derive(Debug, Clone)]
pub struct RepairSettings {
    /// Recorded as `modified_by` on every block the run rewrites.
    pub actor_id: String,

    /// Restrict the run to a single card instead of every card in the store.
    pub card_id: Option<String>,

    /// Validate and report without writing anything back.
    pub dry_run: bool,
}

impl Default for RepairSettings {
    fn default() -> Self {
        Self {
            actor_id: DEFAULT_ACTOR.to_string(),
            card_id: None,
            dry_run: false,
        }
    }
}
