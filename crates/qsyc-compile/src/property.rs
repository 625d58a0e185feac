//! `PropertySet` and related types for pass communication.
//!
//! Passes share the target description (native gate set, device) and any
//! typed data they want to hand to later passes or to the caller.
//!
//! # Examples
//!
//! ```
//! use qsyc_compile::{Device, NativeGateSet, PropertySet};
//! use qsyc_ir::GridQubit;
//!
//! let props = PropertySet::new()
//!     .with_gate_set(NativeGateSet::xmon())
//!     .with_device(Device::grid(2, 3));
//!
//! assert!(props.gate_set.as_ref().unwrap().contains("cz"));
//! let device = props.device.as_ref().unwrap();
//! assert!(device.is_coupled(GridQubit::new(0, 0), GridQubit::new(1, 0)));
//! ```

use std::any::{Any, TypeId};

use petgraph::graphmap::UnGraphMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use qsyc_ir::GridQubit;

/// Native gate names of the target hardware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeGateSet {
    /// List of gate names in the set.
    gates: Vec<String>,
}

impl NativeGateSet {
    /// Create a new native gate set.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a gate is in the set.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Get the gate names.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// CZ-based xmon gate set: PhasedX and Z-family rotations plus CZ.
    pub fn xmon() -> Self {
        Self::new(["phased_x", "rz", "x", "y", "z", "s", "t", "cz"])
    }
}

impl Default for NativeGateSet {
    fn default() -> Self {
        Self::xmon()
    }
}

/// Qubit connectivity of a grid device.
///
/// Two qubits are coupled when both are on the device and they are lattice
/// neighbours.
#[derive(Debug, Clone, Default)]
pub struct Device {
    graph: UnGraphMap<GridQubit, ()>,
}

impl Device {
    /// Build a device from a set of qubits, coupling every pair of neighbours.
    pub fn from_qubits(qubits: impl IntoIterator<Item = GridQubit>) -> Self {
        let mut graph = UnGraphMap::new();
        for q in qubits {
            graph.add_node(q);
        }
        let nodes: Vec<GridQubit> = graph.nodes().collect();
        for q in &nodes {
            for n in q.neighbors() {
                if *q < n && graph.contains_node(n) {
                    graph.add_edge(*q, n, ());
                }
            }
        }
        Self { graph }
    }

    /// A full `rows` x `cols` rectangle anchored at (0, 0).
    pub fn grid(rows: i32, cols: i32) -> Self {
        Self::from_qubits(GridQubit::rect(rows, cols))
    }

    /// Check if `qubit` is on the device.
    pub fn contains(&self, qubit: GridQubit) -> bool {
        self.graph.contains_node(qubit)
    }

    /// Check if two qubits can share a two-qubit gate.
    pub fn is_coupled(&self, a: GridQubit, b: GridQubit) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Device qubits, sorted.
    pub fn qubits(&self) -> Vec<GridQubit> {
        let mut qubits: Vec<GridQubit> = self.graph.nodes().collect();
        qubits.sort();
        qubits
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of couplers.
    pub fn num_couplers(&self) -> usize {
        self.graph.edge_count()
    }

    /// Coupled neighbours of `qubit`.
    pub fn neighbors(&self, qubit: GridQubit) -> impl Iterator<Item = GridQubit> + '_ {
        self.graph.neighbors(qubit)
    }
}

/// Properties shared between compilation passes.
///
/// Standard properties have dedicated fields. Passes can store arbitrary
/// data using the type-safe [`insert`](Self::insert) and [`get`](Self::get)
/// methods; each type can have at most one value stored.
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Native gate set every output operation must belong to.
    pub gate_set: Option<NativeGateSet>,

    /// Device connectivity. `None` means unconstrained.
    pub device: Option<Device>,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the native gate set.
    #[must_use]
    pub fn with_gate_set(mut self, gate_set: NativeGateSet) -> Self {
        self.gate_set = Some(gate_set);
        self
    }

    /// Set the device.
    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(row: i32, col: i32) -> GridQubit {
        GridQubit::new(row, col)
    }

    #[test]
    fn test_native_gate_set() {
        let set = NativeGateSet::xmon();
        assert!(set.contains("phased_x"));
        assert!(set.contains("cz"));
        assert!(!set.contains("cx"));
        assert!(!set.contains("h"));
        // CZ is the only entangler.
        assert!(!set.contains("syc"));
        assert_eq!(NativeGateSet::default(), set);
    }

    #[test]
    fn test_grid_device() {
        let device = Device::grid(2, 3);
        assert_eq!(device.num_qubits(), 6);
        // 2 rows x 2 horizontal + 3 vertical
        assert_eq!(device.num_couplers(), 7);
        assert!(device.is_coupled(q(0, 0), q(0, 1)));
        assert!(device.is_coupled(q(1, 2), q(0, 2)));
        assert!(!device.is_coupled(q(0, 0), q(1, 1)));
        assert!(!device.contains(q(2, 0)));
        assert_eq!(device.neighbors(q(0, 1)).count(), 3);
    }

    #[test]
    fn test_sparse_device() {
        let device = Device::from_qubits([q(0, 0), q(0, 1), q(5, 5)]);
        assert_eq!(device.num_couplers(), 1);
        assert!(device.contains(q(5, 5)));
        assert_eq!(device.neighbors(q(5, 5)).count(), 0);
        assert_eq!(device.qubits(), vec![q(0, 0), q(0, 1), q(5, 5)]);
    }

    #[test]
    #[allow(clippy::items_after_statements)]
    fn test_property_set_custom() {
        let mut props = PropertySet::new();

        #[derive(Debug, PartialEq)]
        struct Counter(i32);

        props.insert(Counter(42));
        assert_eq!(props.get::<Counter>(), Some(&Counter(42)));

        if let Some(counter) = props.get_mut::<Counter>() {
            counter.0 += 1;
        }
        assert_eq!(props.remove::<Counter>(), Some(Counter(43)));
        assert_eq!(props.get::<Counter>(), None);
        assert!(props.get_mut::<Counter>().is_none());
    }
}
