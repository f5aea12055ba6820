//! A model is data: its compartments, its rates, and one update rule per
//! compartment. The engine never knows which model it is running.

use crate::{
    compartment::CompartmentDef,
    error::ConfigError,
    rates::RateDef,
    rule::UpdateRule,
    types::{CompartmentId, RateId, Year},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    pub name:          &'static str,
    pub compartments:  Vec<CompartmentDef>,
    pub rates:         Vec<RateDef>,
    /// Indexed by compartment: `rules[i].target == i`.
    pub rules:         Vec<UpdateRule>,
    pub start_year:    Year,
    pub default_years: Year,
}

impl ModelSpec {
    /// Build a model, checking that every compartment has exactly one rule
    /// and that every term refers to a declared compartment and rate.
    pub fn new(
        name: &'static str,
        compartments: Vec<CompartmentDef>,
        rates: Vec<RateDef>,
        mut rules: Vec<UpdateRule>,
        start_year: Year,
        default_years: Year,
    ) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidModel { model: name, reason };

        if compartments.is_empty() {
            return Err(invalid("a model needs at least one compartment".into()));
        }
        rules.sort_by_key(|r| r.target);
        if rules.len() != compartments.len()
            || rules.iter().enumerate().any(|(i, r)| r.target != i)
        {
            return Err(invalid(format!(
                "expected exactly one rule for each of {} compartments",
                compartments.len()
            )));
        }
        for rule in &rules {
            for term in &rule.terms {
                if let Some(bad) = term.sources().into_iter().find(|&s| s >= compartments.len()) {
                    return Err(invalid(format!(
                        "rule for '{}' reads undeclared compartment #{bad}",
                        compartments[rule.target].name
                    )));
                }
                if let Some(bad) = term.rates.iter().find(|&&r| r >= rates.len()) {
                    return Err(invalid(format!(
                        "rule for '{}' uses undeclared rate #{bad}",
                        compartments[rule.target].name
                    )));
                }
                if !term.scale.is_finite() || term.scale < 0.0 {
                    return Err(invalid(format!(
                        "rule for '{}' has invalid scale {}",
                        compartments[rule.target].name, term.scale
                    )));
                }
            }
        }

        Ok(Self { name, compartments, rates, rules, start_year, default_years })
    }

    pub fn compartment_id(&self, name: &str) -> Option<CompartmentId> {
        self.compartments.iter().position(|c| c.name == name)
    }

    pub fn rate_id(&self, name: &str) -> Option<RateId> {
        self.rates.iter().position(|r| r.name == name)
    }

    /// One worker per compartment plus the reporter.
    pub fn task_count(&self) -> usize {
        self.compartments.len() + 1
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.compartments.iter().map(|c| c.label).collect()
    }
}
