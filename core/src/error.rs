use thiserror::Error;

/// Rejections raised while validating a run, always before the first round.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown compartment '{name}' for model '{model}'")]
    UnknownCompartment { model: &'static str, name: String },

    #[error("Unknown rate '{name}' for model '{model}'")]
    UnknownRate { model: &'static str, name: String },

    #[error("Rate '{name}' must be a finite non-negative number, got {value}")]
    InvalidRate { name: String, value: f64 },

    #[error("Population value must be non-negative, got {value}")]
    NegativePopulation { value: i128 },

    #[error("Cannot parse '{text}' as {expected}")]
    Malformed { text: String, expected: &'static str },

    #[error("Model '{model}' runs {expected} tasks in lockstep (or 1 sequentially), got {actual}")]
    ThreadCount { model: &'static str, expected: usize, actual: usize },

    #[error("Model '{model}' is inconsistent: {reason}")]
    InvalidModel { model: &'static str, reason: String },

    #[error("Rate must be a finite non-negative number, got {value}")]
    NegativeRate { value: f64 },

    #[error("Horizon of {years} years overflows the clock from start year {start_year}")]
    HorizonOverflow { start_year: u32, years: u32 },
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Report output failed: {0}")]
    Report(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Worker thread '{name}' panicked")]
    WorkerPanicked { name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
