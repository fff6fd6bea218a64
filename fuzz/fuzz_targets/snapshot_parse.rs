#![no_main]

//! Fuzz target for snapshot parsing.
//!
//! Feeds arbitrary bytes to `BlockSnapshot::parse` to check that malformed
//! documents are rejected without panicking, and that anything accepted
//! serializes back to JSON.

use libfuzzer_sys::fuzz_target;
use orderfix_types::snapshot::BlockSnapshot;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(snapshot) = BlockSnapshot::parse(s) {
        let _ = serde_json::to_string(&snapshot);
        let _ = serde_json::to_string_pretty(&snapshot);
    }

    // Individual documents must parse or fail cleanly too.
    let _ = serde_json::from_str::<orderfix_types::block::Block>(s);
    let _ = serde_json::from_str::<orderfix_types::block::BlockPatch>(s);
});
