//! SIR influenza outbreak: Susceptible, Infected, Recovered.

use crate::{
    compartment::CompartmentDef,
    error::ConfigError,
    model::ModelSpec,
    rates::RateDef,
    rule::{Term, UpdateRule},
    types::{CompartmentId, RateId},
};

pub const SUSCEPTIBLE: CompartmentId = 0;
pub const INFECTED:    CompartmentId = 1;
pub const RECOVERED:   CompartmentId = 2;

pub const INFECTION_RATE: RateId = 0;
pub const RECOVERY_RATE:  RateId = 1;

fn compartments() -> Vec<CompartmentDef> {
    vec![
        CompartmentDef::new("susceptible", "Susceptible", 175_000),
        CompartmentDef::new("infected",    "Infected",    10),
        CompartmentDef::new("recovered",   "Recovered",   0),
    ]
}

fn rates() -> Vec<RateDef> {
    vec![
        RateDef::new("infection_rate", 0.4),
        RateDef::new("recovery_rate",  0.04),
    ]
}

/// Proportional form: infections scale with the infected count on the
/// susceptible side and with the susceptible count on the infected side.
pub fn spec() -> Result<ModelSpec, ConfigError> {
    let rules = vec![
        UpdateRule::new(SUSCEPTIBLE, vec![
            Term::outflow(INFECTED, &[INFECTION_RATE]),
        ]),
        UpdateRule::new(INFECTED, vec![
            Term::inflow(SUSCEPTIBLE, &[INFECTION_RATE]),
            Term::outflow(INFECTED, &[RECOVERY_RATE]),
        ]),
        UpdateRule::new(RECOVERED, vec![
            Term::inflow(INFECTED, &[RECOVERY_RATE]),
        ]),
    ];
    ModelSpec::new("sir", compartments(), rates(), rules, 0, 2)
}

/// Mass-action form: new infections are `β · S · I / N` on both sides.
pub fn mass_action_spec() -> Result<ModelSpec, ConfigError> {
    let rules = vec![
        UpdateRule::new(SUSCEPTIBLE, vec![
            Term::mass_action_outflow(SUSCEPTIBLE, INFECTED, &[INFECTION_RATE]),
        ]),
        UpdateRule::new(INFECTED, vec![
            Term::mass_action_inflow(SUSCEPTIBLE, INFECTED, &[INFECTION_RATE]),
            Term::outflow(INFECTED, &[RECOVERY_RATE]),
        ]),
        UpdateRule::new(RECOVERED, vec![
            Term::inflow(INFECTED, &[RECOVERY_RATE]),
        ]),
    ];
    ModelSpec::new("sir-mass-action", compartments(), rates(), rules, 0, 2)
}
