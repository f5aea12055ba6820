//! Shared primitive types used across every model.

/// A population count. Compartments never hold negative values.
pub type Population = u64;

/// A calendar year on the simulation clock.
pub type Year = u32;

/// Zero-based month within a year, in `[0, 11]`.
pub type Month = u32;

/// Position of a compartment in its model's declared order.
pub type CompartmentId = usize;

/// Position of a rate in its model's rate table.
pub type RateId = usize;

/// One simulated month. Round 0 is the optional initial-state report.
pub type Round = u64;

pub const MONTHS_PER_YEAR: Month = 12;
