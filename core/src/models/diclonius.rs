//! Diclonius population growth: Uninfected Humans, Carriers, Diclonius
//! Queens, Silphalets.
//!
//! Birth rates are given per 1000 people per year and are scaled to a
//! monthly per-capita fraction inside each term.

use crate::{
    compartment::CompartmentDef,
    error::ConfigError,
    model::ModelSpec,
    rates::RateDef,
    rule::{Term, UpdateRule},
    types::{CompartmentId, RateId},
};

pub const HUMANS:     CompartmentId = 0;
pub const CARRIERS:   CompartmentId = 1;
pub const QUEENS:     CompartmentId = 2;
pub const SILPHALETS: CompartmentId = 3;

pub const INFECTION_RATE:       RateId = 0;
pub const HUMAN_BIRTH_RATE:     RateId = 1;
pub const QUEEN_BIRTH_RATE:     RateId = 2;
pub const SILPHALET_BIRTH_RATE: RateId = 3;

/// Per-1000-per-year to per-capita-per-month.
const MONTHLY_PER_CAPITA: f64 = 1.0 / 12_000.0;

/// Japan's 2023 birth rate, births per 1000 people per year.
const BIRTH_RATE: f64 = 7.013;

pub fn spec() -> Result<ModelSpec, ConfigError> {
    let compartments = vec![
        CompartmentDef::new("humans",     "Uninfected Humans", 173_000),
        CompartmentDef::new("carriers",   "Carriers",          10),
        CompartmentDef::new("queens",     "Diclonius Queens",  1),
        CompartmentDef::new("silphalets", "Silphalets",        35),
    ];
    let rates = vec![
        RateDef::new("infection_rate",       0.4),
        RateDef::new("human_birth_rate",     BIRTH_RATE),
        RateDef::new("queen_birth_rate",     BIRTH_RATE),
        RateDef::new("silphalet_birth_rate", BIRTH_RATE),
    ];
    let rules = vec![
        UpdateRule::new(HUMANS, vec![
            Term::inflow(HUMANS, &[HUMAN_BIRTH_RATE]).scaled(MONTHLY_PER_CAPITA),
            Term::outflow(QUEENS, &[INFECTION_RATE]),
            Term::outflow(SILPHALETS, &[INFECTION_RATE]),
        ]),
        UpdateRule::new(CARRIERS, vec![
            Term::inflow(QUEENS, &[INFECTION_RATE]),
            Term::inflow(SILPHALETS, &[INFECTION_RATE]),
        ]),
        // Queens are born to queens, and to half of the male population.
        UpdateRule::new(QUEENS, vec![
            Term::inflow(QUEENS, &[QUEEN_BIRTH_RATE]).scaled(MONTHLY_PER_CAPITA),
            Term::inflow(HUMANS, &[QUEEN_BIRTH_RATE]).scaled(MONTHLY_PER_CAPITA / 2.0),
            Term::inflow(CARRIERS, &[QUEEN_BIRTH_RATE]).scaled(MONTHLY_PER_CAPITA / 2.0),
        ]),
        // Silphalets are sterile; all of them are born to humans and carriers.
        UpdateRule::new(SILPHALETS, vec![
            Term::inflow(HUMANS, &[SILPHALET_BIRTH_RATE]).scaled(MONTHLY_PER_CAPITA),
            Term::inflow(CARRIERS, &[SILPHALET_BIRTH_RATE]).scaled(MONTHLY_PER_CAPITA),
        ]),
    ];
    ModelSpec::new("diclonius", compartments, rates, rules, 2005, 20)
}
