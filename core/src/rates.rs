//! Transition rates. Fixed once a run is configured.

use crate::{error::ConfigError, types::RateId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateDef {
    pub name:    &'static str,
    pub default: f64,
}

impl RateDef {
    pub const fn new(name: &'static str, default: f64) -> Self {
        Self { name, default }
    }
}

/// Named, non-negative, finite rates in a model's declared order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    names:  Vec<&'static str>,
    values: Vec<f64>,
}

impl RateTable {
    pub fn from_defaults(defs: &[RateDef]) -> Result<Self, ConfigError> {
        let table = Self {
            names:  defs.iter().map(|d| d.name).collect(),
            values: defs.iter().map(|d| d.default).collect(),
        };
        for (name, &value) in table.names.iter().zip(&table.values) {
            check_rate(name, value)?;
        }
        Ok(table)
    }

    pub fn get(&self, id: RateId) -> f64 {
        self.values[id]
    }

    pub fn id_of(&self, name: &str) -> Option<RateId> {
        self.names.iter().position(|n| *n == name)
    }

    pub fn by_name(&self, name: &str) -> Option<f64> {
        self.id_of(name).map(|id| self.values[id])
    }

    /// Override one rate. Rejects negative and non-finite values.
    pub fn set(&mut self, model: &'static str, name: &str, value: f64) -> Result<(), ConfigError> {
        let id = self.id_of(name).ok_or_else(|| ConfigError::UnknownRate {
            model,
            name: name.to_string(),
        })?;
        check_rate(name, value)?;
        self.values[id] = value;
        Ok(())
    }

    /// Sum of the given rates.
    pub fn sum(&self, ids: &[RateId]) -> f64 {
        ids.iter().map(|&id| self.values[id]).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.names.iter().copied().zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn check_rate(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name: name.to_string(), value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFS: [RateDef; 2] = [
        RateDef::new("infection_rate", 0.4),
        RateDef::new("recovery_rate", 0.04),
    ];

    #[test]
    fn overrides_by_name() {
        let mut table = RateTable::from_defaults(&DEFS).unwrap();
        table.set("sir", "recovery_rate", 0.1).unwrap();
        assert_eq!(table.by_name("recovery_rate"), Some(0.1));
        assert!((table.sum(&[0, 1]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_negative_and_nan() {
        let mut table = RateTable::from_defaults(&DEFS).unwrap();
        assert!(matches!(
            table.set("sir", "infection_rate", -0.1),
            Err(ConfigError::InvalidRate { .. })
        ));
        assert!(table.set("sir", "infection_rate", f64::NAN).is_err());
        assert!(matches!(
            table.set("sir", "death_rate", 0.1),
            Err(ConfigError::UnknownRate { .. })
        ));
        assert_eq!(table.by_name("infection_rate"), Some(0.4));
    }
}
