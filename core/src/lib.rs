//! Discrete-time compartmental population models, advanced one simulated
//! month per round by a fixed set of tasks in barrier lockstep.
//!
//! ```no_run
//! use outbreak_core::{config::SimConfig, engine::SimEngine, models::ModelKind, report::RoundReport};
//!
//! let config = SimConfig::for_model(ModelKind::Sir)?;
//! let mut reports: Vec<RoundReport> = Vec::new();
//! let summary = SimEngine::new(config).run(&mut reports)?;
//! assert_eq!(summary.rounds, 24);
//! # Ok::<(), outbreak_core::error::SimError>(())
//! ```

pub mod clock;
pub mod compartment;
pub mod config;
pub mod engine;
pub mod error;
pub mod lockstep;
pub mod model;
pub mod models;
pub mod rates;
pub mod report;
pub mod rule;
pub mod types;
