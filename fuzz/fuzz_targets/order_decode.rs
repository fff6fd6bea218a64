#![no_main]

//! Fuzz target for content-order decoding.
//!
//! Any JSON value must decode to some ordering without panicking, and a
//! decoded ordering must survive an encode/decode cycle unchanged.

use libfuzzer_sys::fuzz_target;
use orderfix_types::order::ContentOrder;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(s) else {
        return;
    };

    let order = ContentOrder::from_value(Some(&value));
    let encoded = order.to_value();
    let redecoded = ContentOrder::from_value(Some(&encoded));
    assert_eq!(order, redecoded);
});
