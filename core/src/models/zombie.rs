//! SIInZD zombie outbreak: Susceptible, Immune, Infected, Zombies, Dead.

use crate::{
    compartment::CompartmentDef,
    error::ConfigError,
    model::ModelSpec,
    rates::RateDef,
    rule::{Term, UpdateRule},
    types::{CompartmentId, RateId},
};

pub const SUSCEPTIBLE: CompartmentId = 0;
pub const IMMUNE:      CompartmentId = 1;
pub const INFECTED:    CompartmentId = 2;
pub const ZOMBIES:     CompartmentId = 3;
pub const DEAD:        CompartmentId = 4;

/// Susceptible → Infected.
pub const INFECTION_RATE:    RateId = 0;
/// Infected → Zombies.
pub const ZOMBIE_RATE:       RateId = 1;
/// Living (Susceptible, Immune, Infected) killed by zombies.
pub const DEATH_RATE:        RateId = 2;
/// Zombies destroyed by the living.
pub const ZOMBIE_DEATH_RATE: RateId = 3;

pub fn spec() -> Result<ModelSpec, ConfigError> {
    let compartments = vec![
        CompartmentDef::new("susceptible", "Susceptible", 175_000),
        CompartmentDef::new("immune",      "Immune",      100),
        CompartmentDef::new("infected",    "Infected",    10),
        CompartmentDef::new("zombies",     "Zombies",     10),
        CompartmentDef::new("dead",        "Dead",        0),
    ];
    let rates = vec![
        RateDef::new("infection_rate",    0.4),
        RateDef::new("zombie_rate",       0.04),
        RateDef::new("death_rate",        0.25),
        RateDef::new("zombie_death_rate", 0.5),
    ];
    let rules = vec![
        UpdateRule::new(SUSCEPTIBLE, vec![
            Term::outflow(SUSCEPTIBLE, &[INFECTION_RATE, DEATH_RATE]),
        ]),
        UpdateRule::new(IMMUNE, vec![
            Term::outflow(IMMUNE, &[DEATH_RATE]),
        ]),
        UpdateRule::new(INFECTED, vec![
            Term::inflow(SUSCEPTIBLE, &[INFECTION_RATE]),
            Term::outflow(INFECTED, &[ZOMBIE_RATE, DEATH_RATE]),
        ]),
        UpdateRule::new(ZOMBIES, vec![
            Term::inflow(INFECTED, &[ZOMBIE_RATE]),
            Term::outflow(ZOMBIES, &[ZOMBIE_DEATH_RATE]),
        ]),
        UpdateRule::new(DEAD, vec![
            Term::inflow(SUSCEPTIBLE, &[DEATH_RATE]),
            Term::inflow(INFECTED, &[DEATH_RATE]),
            Term::inflow(IMMUNE, &[DEATH_RATE]),
            Term::inflow(ZOMBIES, &[ZOMBIE_DEATH_RATE]),
        ]),
    ];
    ModelSpec::new("zombie", compartments, rates, rules, 2023, 2)
}
