//! SQEIR: Susceptible, Quarantined, Exposed, Infected, Recovered.
//!
//! Quarantined and Exposed only decay at the infection rate; their outflow
//! is not credited to any other compartment.

use crate::{
    compartment::CompartmentDef,
    error::ConfigError,
    model::ModelSpec,
    rates::RateDef,
    rule::{Term, UpdateRule},
    types::{CompartmentId, RateId},
};

pub const SUSCEPTIBLE: CompartmentId = 0;
pub const QUARANTINED: CompartmentId = 1;
pub const EXPOSED:     CompartmentId = 2;
pub const INFECTED:    CompartmentId = 3;
pub const RECOVERED:   CompartmentId = 4;

pub const INFECTION_RATE: RateId = 0;
pub const RECOVERY_RATE:  RateId = 1;

pub fn spec() -> Result<ModelSpec, ConfigError> {
    let compartments = vec![
        CompartmentDef::new("susceptible", "Susceptible", 175_000),
        CompartmentDef::new("quarantined", "Quarantined", 0),
        CompartmentDef::new("exposed",     "Exposed",     100),
        CompartmentDef::new("infected",    "Infected",    10),
        CompartmentDef::new("recovered",   "Recovered",   0),
    ];
    let rates = vec![
        RateDef::new("infection_rate", 0.4),
        RateDef::new("recovery_rate",  0.04),
    ];
    let rules = vec![
        UpdateRule::new(SUSCEPTIBLE, vec![
            Term::outflow(SUSCEPTIBLE, &[INFECTION_RATE]),
        ]),
        UpdateRule::new(QUARANTINED, vec![
            Term::outflow(QUARANTINED, &[INFECTION_RATE]),
        ]),
        UpdateRule::new(EXPOSED, vec![
            Term::outflow(EXPOSED, &[INFECTION_RATE]),
        ]),
        UpdateRule::new(INFECTED, vec![
            Term::inflow(SUSCEPTIBLE, &[INFECTION_RATE]),
            Term::outflow(INFECTED, &[RECOVERY_RATE]),
        ]),
        UpdateRule::new(RECOVERED, vec![
            Term::inflow(INFECTED, &[RECOVERY_RATE]),
        ]),
    ];
    ModelSpec::new("sqeir", compartments, rates, rules, 0, 2)
}
