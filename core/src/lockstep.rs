//! The three-phase round barrier.
//!
//! Every task of a run holds a clone and calls the three phases in order,
//! once per round. No task passes a phase until all K tasks have reached it:
//!
//! ```text
//! compute ─▶ compute_done ─▶ commit ─▶ commit_done ─▶ report ─▶ report_done
//! ```

/// A handle to the shared barrier for one task.
#[derive(Clone)]
pub struct RoundBarrier {
    barrier: hurdles::Barrier,
    tasks:   usize,
}

impl RoundBarrier {
    pub fn new(tasks: usize) -> Self {
        Self { barrier: hurdles::Barrier::new(tasks), tasks }
    }

    pub fn tasks(&self) -> usize {
        self.tasks
    }

    /// Every worker has computed its next value from the current round.
    pub fn compute_done(&mut self) {
        self.barrier.wait();
    }

    /// Every worker has committed. Values are now stable until the next round.
    pub fn commit_done(&mut self) {
        self.barrier.wait();
    }

    /// The reporter has emitted the round and advanced the clock.
    pub fn report_done(&mut self) {
        self.barrier.wait();
    }
}

impl std::fmt::Debug for RoundBarrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundBarrier").field("tasks", &self.tasks).finish()
    }
}
