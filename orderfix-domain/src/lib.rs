//! Pure validation and repair of card content orderings.
//!
//! Nothing in this crate touches storage. [`validate_order`] classifies a
//! declared ordering against the actual child set, and the repair functions
//! derive a corrected ordering from that classification. Callers that need
//! persistence live in `orderfix-core`.

mod repair;
mod validate;

pub use repair::{repair_declared, repair_order};
pub use validate::{OrderValidation, validate_order};
