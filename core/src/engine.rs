//! The simulation engine.
//!
//! ROUND PROTOCOL (every task, every round, until the horizon):
//!   1. Compute:      each worker evaluates its rule against the current round.
//!   2. compute_done
//!   3. Commit:       each worker stores its own next value.
//!   4. commit_done
//!   5. Report:       the reporter alone emits the round and advances the clock.
//!   6. report_done
//!   7. Every task re-checks the clock before starting the next round.
//!
//! RULES:
//!   - A worker writes only its own compartment, and only in phase 3.
//!   - Only the reporter writes the clock, and only in phase 5.
//!   - Every task loops on the same clock, so they all stop on the same round.

use crate::{
    clock::{SharedClock, SimClock},
    compartment::CompartmentSet,
    config::{Execution, SimConfig},
    error::{SimError, SimResult},
    lockstep::RoundBarrier,
    report::{CompartmentValue, ReportSink, RoundReport},
    types::Round,
};
use serde::Serialize;
use std::thread;

/// What a finished run looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub model:        &'static str,
    /// Reports emitted, including the initial-state report.
    pub rounds:       Round,
    pub clock:        SimClock,
    pub final_values: Vec<CompartmentValue>,
}

pub struct SimEngine {
    config:       SimConfig,
    compartments: CompartmentSet,
    clock:        SimClock,
    /// Number of the next round to report.
    next_round:   Round,
}

impl SimEngine {
    pub fn new(config: SimConfig) -> Self {
        let compartments = CompartmentSet::new(&config.model.compartments, &config.initial);
        let clock = SimClock::new(config.model.start_year, config.horizon_year());
        Self { config, compartments, clock, next_round: 0 }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }

    pub fn compartments(&self) -> &CompartmentSet {
        &self.compartments
    }

    /// Run until the horizon, sending every round's report to `sink`.
    ///
    /// A sink failure does not stop the run: the reporter keeps meeting the
    /// barriers, stops emitting, and the first error is returned at the end.
    pub fn run(&mut self, sink: &mut dyn ReportSink) -> SimResult<RunSummary> {
        let model = &self.config.model;
        log::info!(
            "model={} tasks={} execution={:?} start={} horizon={} rounds={}",
            model.name,
            model.task_count(),
            self.config.execution,
            self.clock.start_year,
            self.clock.horizon_year,
            self.clock.rounds_remaining()
        );

        let mut reporter = Reporter::new(sink, self.next_round);

        if self.config.emit_initial_state && self.next_round == 0 && self.clock.is_running() {
            reporter.report(&self.clock, &self.compartments);
            self.clock.advance();
        }
        // Computed rounds are numbered from 1; round 0 is the initial state.
        reporter.round = reporter.round.max(1);

        match self.config.execution {
            Execution::Lockstep   => self.run_lockstep(&mut reporter)?,
            Execution::Sequential => self.run_sequential(&mut reporter),
        }

        self.next_round = reporter.round;
        let emitted = reporter.emitted;
        reporter.finish()?;

        let summary = self.summary(emitted);
        log::info!(
            "model={} finished: {} reports, clock at {}/{}",
            summary.model,
            summary.rounds,
            summary.clock.current_year,
            summary.clock.display_month()
        );
        Ok(summary)
    }

    fn run_lockstep(&mut self, reporter: &mut Reporter<'_>) -> SimResult<()> {
        let shared_clock = SharedClock::new(self.clock);
        let barrier = RoundBarrier::new(self.config.model.task_count());
        let compartments = &self.compartments;
        let rates = &self.config.rates;

        thread::scope(|scope| -> SimResult<()> {
            let workers: Vec<_> = self
                .config
                .model
                .rules
                .iter()
                .map(|rule| {
                    let mut barrier = barrier.clone();
                    let clock = &shared_clock;
                    let handle = scope.spawn(move || {
                        while clock.is_running() {
                            let next = rule.next_value(compartments, rates);
                            barrier.compute_done();
                            compartments.commit(rule.target, next);
                            barrier.commit_done();
                            barrier.report_done();
                        }
                    });
                    (compartments.label(rule.target), handle)
                })
                .collect();

            // The calling thread is the reporter task.
            let mut barrier = barrier;
            while shared_clock.is_running() {
                barrier.compute_done();
                barrier.commit_done();
                let mut clock = shared_clock.load();
                reporter.report(&clock, compartments);
                clock.advance();
                shared_clock.store(clock);
                barrier.report_done();
            }

            for (name, handle) in workers {
                handle
                    .join()
                    .map_err(|_| SimError::WorkerPanicked { name: name.to_string() })?;
            }
            Ok(())
        })?;

        self.clock = shared_clock.load();
        Ok(())
    }

    fn run_sequential(&mut self, reporter: &mut Reporter<'_>) {
        let rules = &self.config.model.rules;
        let rates = &self.config.rates;
        while self.clock.is_running() {
            let next: Vec<_> = rules
                .iter()
                .map(|rule| (rule.target, rule.next_value(&self.compartments, rates)))
                .collect();
            for (target, value) in next {
                self.compartments.commit(target, value);
            }
            reporter.report(&self.clock, &self.compartments);
            self.clock.advance();
        }
    }

    fn summary(&self, rounds: Round) -> RunSummary {
        let values = self.compartments.snapshot();
        RunSummary {
            model: self.config.model.name,
            rounds,
            clock: self.clock,
            final_values: self
                .compartments
                .labels()
                .iter()
                .zip(values)
                .map(|(&name, value)| CompartmentValue { name, value })
                .collect(),
        }
    }
}

/// The reporter's side of a run: numbering, emitting, and holding on to the
/// first sink error.
struct Reporter<'a> {
    sink:    &'a mut dyn ReportSink,
    round:   Round,
    emitted: Round,
    error:   Option<SimError>,
}

impl<'a> Reporter<'a> {
    fn new(sink: &'a mut dyn ReportSink, first_round: Round) -> Self {
        Self { sink, round: first_round, emitted: 0, error: None }
    }

    fn report(&mut self, clock: &SimClock, compartments: &CompartmentSet) {
        let report = RoundReport::capture(self.round, clock, compartments);
        log::debug!(
            "round={} year={} month={} values={:?}",
            report.round,
            report.year,
            report.month,
            report.values()
        );
        if self.error.is_none() {
            if let Err(e) = self.sink.emit(&report) {
                log::warn!("report sink failed at round {}: {e}; no further output", self.round);
                self.error = Some(e);
            }
        }
        self.emitted += 1;
        self.round += 1;
    }

    fn finish(self) -> SimResult<()> {
        if let Some(e) = self.error {
            return Err(e);
        }
        self.sink.finish()
    }
}
