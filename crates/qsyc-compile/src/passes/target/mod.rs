//! Target-specific passes.
//!
//! These passes read the native gate set and device from the
//! `PropertySet` and are skipped when the corresponding property is unset.

pub mod verification;

pub use verification::{DeviceConnectivity, NativeGateVerification};
