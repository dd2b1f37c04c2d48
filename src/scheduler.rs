//! The behavior scheduler: a long-lived tick loop that interleaves idle
//! simulation with one-shot interaction workflows.
//!
//! One tick per second for the life of the analysis. Everything inside
//! a tick is synchronous and blocking; there is deliberately no internal
//! parallelism, so two actions never contend for the single virtual
//! pointer and keyboard focus. The only cross-thread interaction is the
//! cooperative stop signal, checked once at the top of each tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::FlagTable;
use crate::dispatch;
use crate::platforms::DesktopEngine;
use crate::sweep;
use crate::workflows::{InteractionWorkflow, WorkflowKind};

/// Wall-clock length of one tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Office-window sweep cadence, in elapsed seconds.
const OFFICE_SWEEP_EVERY: u64 = 60;

/// Owns the flag table and elapsed-seconds counter for one analysis
/// run. [`Scheduler::tick`] performs a single pass of the per-tick
/// algorithm; [`Scheduler::run`] adds the pacing and the stop check.
pub struct Scheduler {
    engine: Arc<dyn DesktopEngine>,
    flags: FlagTable,
    workflows: Vec<Box<dyn InteractionWorkflow>>,
    seconds: u64,
    stop: Arc<AtomicBool>,
}

impl Scheduler {
    pub fn new(
        engine: Arc<dyn DesktopEngine>,
        flags: FlagTable,
        workflows: Vec<Box<dyn InteractionWorkflow>>,
        stop: Arc<AtomicBool>,
    ) -> Self {
        Self {
            engine,
            flags,
            workflows,
            seconds: 0,
            stop,
        }
    }

    /// Elapsed-seconds counter; increments once per tick.
    pub fn elapsed_seconds(&self) -> u64 {
        self.seconds
    }

    pub fn flags(&self) -> &FlagTable {
        &self.flags
    }

    /// One pass of the per-tick algorithm, without the sleep. No error
    /// is fatal: a failed step is logged and the tick moves on.
    pub fn tick(&mut self) {
        if self.seconds > 0 && self.seconds % OFFICE_SWEEP_EVERY == 0 {
            if let Err(e) = sweep::sweep_office_windows(self.engine.as_ref()) {
                warn!("office-window sweep aborted: {e}");
            }
        }

        if self.flags.click_pointer.is_active() {
            if let Err(e) = dispatch::click_pointer(self.engine.as_ref()) {
                warn!("pointer click failed: {e}");
            }
        }

        if self.flags.move_pointer.is_active() {
            if let Err(e) = dispatch::move_pointer(self.engine.as_ref()) {
                warn!("pointer move failed: {e}");
            }
        }

        if self.flags.click_buttons.is_active() {
            if let Err(e) = sweep::sweep_buttons(self.engine.as_ref()) {
                warn!("button sweep aborted: {e}");
            }
        }

        // At most one one-shot workflow per tick; the rest keep their
        // place in the priority order and wait for later ticks.
        if let Some(kind) = self.flags.next_pending_workflow() {
            self.dispatch_workflow(kind);
        }

        self.seconds += 1;
    }

    /// Run one workflow and consume its flag regardless of outcome, so
    /// it is never retried within this analysis.
    fn dispatch_workflow(&mut self, kind: WorkflowKind) {
        match self.workflows.iter().find(|w| w.kind() == kind) {
            Some(workflow) => {
                info!(workflow = %kind, "dispatching one-shot workflow");
                if let Err(e) = workflow.run() {
                    warn!(workflow = %kind, "workflow failed: {e}");
                }
            }
            None => debug!(workflow = %kind, "no workflow registered for slot"),
        }
        self.flags.workflow_mut(kind).complete_one_shot();
    }

    /// The tick loop. Returns when the stop signal is observed at the
    /// top of a tick; there is no mid-tick cancellation.
    pub fn run(&mut self) {
        info!("behavior scheduler running");
        while !self.stop.load(Ordering::SeqCst) {
            let started = Instant::now();
            self.tick();
            // Sweeps and workflows eat into the period; sleep only the
            // remainder.
            if let Some(remaining) = TICK_PERIOD.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
        info!(
            elapsed_seconds = self.seconds,
            "behavior scheduler stopped"
        );
    }
}
