//! Built-in compilation passes.
//!
//! Passes are organized into two categories:
//! - [`agnostic`]: Optimization passes that only rewrite the operation list
//! - [`target`]: Verification passes that require hardware properties

pub mod agnostic;
pub mod target;

pub use agnostic::{CancelAdjacentCz, DropNegligibleGates, MergeSingleQubitGates};
pub use target::{DeviceConnectivity, NativeGateVerification};
