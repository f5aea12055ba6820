//! Compartment state shared by every worker of a run.
//!
//! RULE: any task may read any compartment; a compartment's value is stored
//! only by the worker that owns its update rule, and only in the commit phase.

use crate::types::{CompartmentId, Population};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Static description of one compartment in a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompartmentDef {
    /// Stable configuration key, e.g. `"susceptible"`.
    pub name:    &'static str,
    /// Label used in reports, e.g. `"Susceptible"`.
    pub label:   &'static str,
    pub default: Population,
}

impl CompartmentDef {
    pub const fn new(name: &'static str, label: &'static str, default: Population) -> Self {
        Self { name, label, default }
    }
}

/// Read access to the values of the current round.
pub trait PopulationView {
    fn population(&self, id: CompartmentId) -> Population;

    /// Sum of every compartment. Wide enough that it never overflows.
    fn total(&self) -> u128;
}

impl PopulationView for [Population] {
    fn population(&self, id: CompartmentId) -> Population {
        self[id]
    }

    fn total(&self) -> u128 {
        self.iter().map(|&v| u128::from(v)).sum()
    }
}

#[derive(Debug)]
pub struct CompartmentSet {
    labels: Vec<&'static str>,
    values: Vec<AtomicU64>,
}

impl CompartmentSet {
    pub fn new(defs: &[CompartmentDef], initial: &[Population]) -> Self {
        debug_assert_eq!(defs.len(), initial.len());
        Self {
            labels: defs.iter().map(|d| d.label).collect(),
            values: initial.iter().map(|&v| AtomicU64::new(v)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn label(&self, id: CompartmentId) -> &'static str {
        self.labels[id]
    }

    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    /// Copy of every value, in declared order.
    pub fn snapshot(&self) -> Vec<Population> {
        self.values.iter().map(|v| v.load(Ordering::Acquire)).collect()
    }

    /// Publish the next-round value of `id`. Called only by its owner.
    pub(crate) fn commit(&self, id: CompartmentId, value: Population) {
        self.values[id].store(value, Ordering::Release);
    }
}

impl PopulationView for CompartmentSet {
    fn population(&self, id: CompartmentId) -> Population {
        self.values[id].load(Ordering::Acquire)
    }

    fn total(&self) -> u128 {
        self.values
            .iter()
            .map(|v| u128::from(v.load(Ordering::Acquire)))
            .sum()
    }
}
