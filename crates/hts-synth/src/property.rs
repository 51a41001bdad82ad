//! Shared state for synthesis passes.

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

use crate::passes::TwoQubitBasis;
use crate::topology::Topology;

/// Properties shared between passes.
///
/// The target fields are read by passes that depend on the device; passes
/// publish their results with the typed [`insert`](Self::insert) and
/// [`get`](Self::get) methods. Each type can have at most one value stored.
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Connectivity every two-qubit instruction must respect.
    pub topology: Option<Topology>,

    /// Two-qubit gate the output should use.
    pub basis: Option<TwoQubitBasis>,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connectivity and two-qubit basis.
    #[must_use]
    pub fn with_target(mut self, topology: Topology, basis: TwoQubitBasis) -> Self {
        self.topology = Some(topology);
        self.basis = Some(basis);
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

    #[test]
    #[allow(clippy::items_after_statements)]
    fn test_property_set_custom() {
        let mut props = PropertySet::new();

        #[derive(Debug, PartialEq)]
        struct CustomData(i32);

        props.insert(CustomData(42));
        assert_eq!(props.get::<CustomData>(), Some(&CustomData(42)));

        let removed = props.remove::<CustomData>();
        assert_eq!(removed, Some(CustomData(42)));
        assert_eq!(props.get::<CustomData>(), None);
    }

    #[test]
    fn test_with_target() {
        let props = PropertySet::new().with_target(Topology::linear(3), TwoQubitBasis::Cz);
        assert_eq!(props.topology.as_ref().map(Topology::num_qubits), Some(3));
        assert_eq!(props.basis, Some(TwoQubitBasis::Cz));
    }
}
