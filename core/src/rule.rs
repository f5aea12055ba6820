//! Per-compartment update rules.
//!
//! Every rule has the same accumulate-then-clamp shape:
//!
//! ```text
//! next = clamp_nonnegative(current + Σ inflows − Σ outflows)
//! ```
//!
//! Each term is rounded (half away from zero) on its own before it is
//! accumulated, so compartments stay integral. Terms read only values of the
//! current round; a rule never sees another compartment's next value.

use crate::{
    compartment::PopulationView,
    rates::RateTable,
    types::{CompartmentId, Population, RateId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Inflow,
    Outflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    /// `source × scale × Σ rates`
    Proportional { source: CompartmentId },
    /// `Σ rates × source × contact / N`, where `N` is the whole population.
    MassAction { source: CompartmentId, contact: CompartmentId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub flow:  Flow,
    pub kind:  TermKind,
    pub rates: Vec<RateId>,
    pub scale: f64,
}

impl Term {
    pub fn inflow(source: CompartmentId, rates: &[RateId]) -> Self {
        Self::proportional(Flow::Inflow, source, rates)
    }

    pub fn outflow(source: CompartmentId, rates: &[RateId]) -> Self {
        Self::proportional(Flow::Outflow, source, rates)
    }

    pub fn mass_action_inflow(source: CompartmentId, contact: CompartmentId, rates: &[RateId]) -> Self {
        Self::mass_action(Flow::Inflow, source, contact, rates)
    }

    pub fn mass_action_outflow(source: CompartmentId, contact: CompartmentId, rates: &[RateId]) -> Self {
        Self::mass_action(Flow::Outflow, source, contact, rates)
    }

    /// Multiply the term by a constant, e.g. to turn a yearly
    /// per-thousand rate into a monthly per-capita one.
    pub fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    fn proportional(flow: Flow, source: CompartmentId, rates: &[RateId]) -> Self {
        Self {
            flow,
            kind: TermKind::Proportional { source },
            rates: rates.to_vec(),
            scale: 1.0,
        }
    }

    fn mass_action(flow: Flow, source: CompartmentId, contact: CompartmentId, rates: &[RateId]) -> Self {
        Self {
            flow,
            kind: TermKind::MassAction { source, contact },
            rates: rates.to_vec(),
            scale: 1.0,
        }
    }

    /// Rounded, unsigned size of this term for the current round.
    pub fn magnitude<V: PopulationView + ?Sized>(&self, view: &V, rates: &RateTable) -> i128 {
        let rate = rates.sum(&self.rates) * self.scale;
        let raw = match self.kind {
            TermKind::Proportional { source } => view.population(source) as f64 * rate,
            TermKind::MassAction { source, contact } => {
                let total = view.total();
                if total == 0 {
                    0.0
                } else {
                    let source = view.population(source) as f64;
                    let contact = view.population(contact) as f64;
                    rate * (source * contact / total as f64)
                }
            }
        };
        // `as` saturates on overflow.
        raw.round() as i128
    }

    /// Compartments this term reads.
    pub fn sources(&self) -> Vec<CompartmentId> {
        match self.kind {
            TermKind::Proportional { source } => vec![source],
            TermKind::MassAction { source, contact } => vec![source, contact],
        }
    }
}

/// The update rule owned by a single compartment worker.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRule {
    pub target: CompartmentId,
    pub terms:  Vec<Term>,
}

impl UpdateRule {
    pub fn new(target: CompartmentId, terms: Vec<Term>) -> Self {
        Self { target, terms }
    }

    /// Unclamped next value. May be negative.
    pub fn raw_next<V: PopulationView + ?Sized>(&self, view: &V, rates: &RateTable) -> i128 {
        let current = i128::from(view.population(self.target));
        self.terms.iter().fold(current, |acc, term| {
            let delta = term.magnitude(view, rates);
            match term.flow {
                Flow::Inflow => acc.saturating_add(delta),
                Flow::Outflow => acc.saturating_sub(delta),
            }
        })
    }

    /// The value this compartment commits for the next round.
    pub fn next_value<V: PopulationView + ?Sized>(&self, view: &V, rates: &RateTable) -> Population {
        clamp_population(self.raw_next(view, rates))
    }

    /// Every compartment this rule reads, including its own.
    pub fn dependencies(&self) -> Vec<CompartmentId> {
        let mut deps = vec![self.target];
        for term in &self.terms {
            for source in term.sources() {
                if !deps.contains(&source) {
                    deps.push(source);
                }
            }
        }
        deps
    }
}

/// Negative results mean the compartment died out.
pub fn clamp_population(raw: i128) -> Population {
    raw.clamp(0, i128::from(Population::MAX)) as Population
}
