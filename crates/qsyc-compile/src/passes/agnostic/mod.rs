//! Target-agnostic optimization passes.
//!
//! These passes rewrite the operation list without consulting the device.
//! Merging reads the native gate set when one is configured so that lone
//! native gates are left as they are.

pub mod cancel;
pub mod merge;

pub use cancel::{CancelAdjacentCz, DropNegligibleGates};
pub use merge::MergeSingleQubitGates;

use crate::optimizer::OptimizationStats;
use crate::property::PropertySet;

/// Update the running [`OptimizationStats`] stored in `properties`.
fn record_stats(properties: &mut PropertySet, update: impl FnOnce(&mut OptimizationStats)) {
    let mut stats = properties
        .remove::<OptimizationStats>()
        .unwrap_or_default();
    update(&mut stats);
    properties.insert(stats);
}
