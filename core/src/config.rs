//! Run configuration.
//!
//! Defaults come from the model catalog. Overrides are applied by name
//! through [`SimConfigBuilder`], and `build()` validates everything before
//! an engine can exist. Nothing is validated inside the round loop.

use crate::{
    error::ConfigError,
    model::ModelSpec,
    models::ModelKind,
    rates::RateTable,
    types::{Population, Year},
};
use serde::{Deserialize, Serialize};

/// How the K tasks of a run are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    /// One OS thread per compartment plus a reporter, in barrier lockstep.
    Lockstep,
    /// The same three phases, round-robin on the calling thread.
    Sequential,
}

/// A validated, immutable run configuration.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub model:              ModelSpec,
    pub initial:            Vec<Population>,
    pub rates:              RateTable,
    pub years:              Year,
    pub execution:          Execution,
    /// Report the initial values as round 0 and start computing one month later.
    pub emit_initial_state: bool,
}

impl SimConfig {
    pub fn builder(model: ModelSpec) -> SimConfigBuilder {
        SimConfigBuilder::new(model)
    }

    /// The built-in model with all of its defaults.
    pub fn for_model(kind: ModelKind) -> Result<Self, ConfigError> {
        Self::builder(kind.spec()?).build()
    }

    pub fn horizon_year(&self) -> Year {
        self.model.start_year + self.years
    }

    pub fn population(&self, name: &str) -> Option<Population> {
        self.model.compartment_id(name).map(|id| self.initial[id])
    }
}

#[derive(Debug, Clone)]
pub struct SimConfigBuilder {
    model:              ModelSpec,
    populations:        Vec<(String, Population)>,
    rates:              Vec<(String, f64)>,
    years:              Option<Year>,
    threads:            Option<usize>,
    emit_initial_state: bool,
}

impl SimConfigBuilder {
    pub fn new(model: ModelSpec) -> Self {
        Self {
            model,
            populations: Vec::new(),
            rates: Vec::new(),
            years: None,
            threads: None,
            emit_initial_state: false,
        }
    }

    pub fn population(mut self, name: impl Into<String>, value: Population) -> Self {
        self.populations.push((name.into(), value));
        self
    }

    pub fn rate(mut self, name: impl Into<String>, value: f64) -> Self {
        self.rates.push((name.into(), value));
        self
    }

    pub fn years(mut self, years: Year) -> Self {
        self.years = Some(years);
        self
    }

    /// `1` runs sequentially; the model's task count runs in lockstep.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn emit_initial_state(mut self, emit: bool) -> Self {
        self.emit_initial_state = emit;
        self
    }

    pub fn build(self) -> Result<SimConfig, ConfigError> {
        let model = self.model;

        let mut initial: Vec<Population> = model.compartments.iter().map(|c| c.default).collect();
        for (name, value) in self.populations {
            let id = model.compartment_id(&name).ok_or_else(|| ConfigError::UnknownCompartment {
                model: model.name,
                name: name.clone(),
            })?;
            initial[id] = value;
        }

        let mut rates = RateTable::from_defaults(&model.rates)?;
        for (name, value) in self.rates {
            rates.set(model.name, &name, value)?;
        }

        let years = self.years.unwrap_or(model.default_years);
        if model.start_year.checked_add(years).is_none() {
            return Err(ConfigError::HorizonOverflow { start_year: model.start_year, years });
        }

        let tasks = model.task_count();
        let execution = match self.threads.unwrap_or(tasks) {
            1 => Execution::Sequential,
            n if n == tasks => Execution::Lockstep,
            n => {
                return Err(ConfigError::ThreadCount {
                    model: model.name,
                    expected: tasks,
                    actual: n,
                })
            }
        };

        Ok(SimConfig {
            model,
            initial,
            rates,
            years,
            execution,
            emit_initial_state: self.emit_initial_state,
        })
    }
}

/// Parse an initial population: a whole, non-negative number.
pub fn parse_population(text: &str) -> Result<Population, ConfigError> {
    let trimmed = text.trim();
    let value: i128 = trimmed.parse().map_err(|_| ConfigError::Malformed {
        text: text.to_string(),
        expected: "a whole number",
    })?;
    if value < 0 {
        return Err(ConfigError::NegativePopulation { value });
    }
    Population::try_from(value).map_err(|_| ConfigError::Malformed {
        text: text.to_string(),
        expected: "a population that fits in 64 bits",
    })
}

/// Parse a transition rate: a finite, non-negative real number.
pub fn parse_rate(text: &str) -> Result<f64, ConfigError> {
    let value: f64 = text.trim().parse().map_err(|_| ConfigError::Malformed {
        text: text.to_string(),
        expected: "a real number",
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::NegativeRate { value });
    }
    Ok(value)
}

/// Parse a horizon length in years.
pub fn parse_years(text: &str) -> Result<Year, ConfigError> {
    text.trim().parse().map_err(|_| ConfigError::Malformed {
        text: text.to_string(),
        expected: "a non-negative whole number of years",
    })
}

/// Parse a task count.
pub fn parse_threads(text: &str) -> Result<usize, ConfigError> {
    match text.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Malformed {
            text: text.to_string(),
            expected: "a positive thread count",
        }),
    }
}
