//! The catalog of built-in models.
//!
//! Each model's rule set is its own explicit configuration. Formulas are
//! kept exactly as each model defines them, even where two models disagree
//! on how the same transition should be written.

pub mod diclonius;
pub mod sir;
pub mod sqeir;
pub mod zombie;

use crate::{error::ConfigError, model::ModelSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    Sir,
    SirMassAction,
    Sqeir,
    Zombie,
    Diclonius,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Sir,
        ModelKind::SirMassAction,
        ModelKind::Sqeir,
        ModelKind::Zombie,
        ModelKind::Diclonius,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sir           => "sir",
            Self::SirMassAction => "sir-mass-action",
            Self::Sqeir         => "sqeir",
            Self::Zombie        => "zombie",
            Self::Diclonius     => "diclonius",
        }
    }

    pub fn spec(&self) -> Result<ModelSpec, ConfigError> {
        match self {
            Self::Sir           => sir::spec(),
            Self::SirMassAction => sir::mass_action_spec(),
            Self::Sqeir         => sqeir::spec(),
            Self::Zombie        => zombie::spec(),
            Self::Diclonius     => diclonius::spec(),
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown model '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_model_is_consistent() {
        for kind in ModelKind::ALL {
            let spec = kind.spec().unwrap();
            assert_eq!(spec.name, kind.name());
            assert_eq!(spec.rules.len(), spec.compartments.len());
            assert_eq!(spec.task_count(), spec.compartments.len() + 1);
        }
    }

    #[test]
    fn names_round_trip() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.name().parse::<ModelKind>(), Ok(kind));
        }
        assert!("seir".parse::<ModelKind>().is_err());
    }
}
