//! Human desktop-interaction simulation for analysis sandboxes.
//!
//! Malware routinely fingerprints unattended environments and goes
//! dormant when nobody seems to be at the keyboard. This crate makes the
//! sandbox's virtual desktop look used: it moves and clicks the mouse,
//! sweeps every visible window for installer/permission/save buttons
//! worth clicking (in a dozen languages), closes leftover office
//! document windows, and fires one-shot per-application interaction
//! workflows supplied by the surrounding framework.
//!
//! The sandbox-facing surface is [`Human`]: build it from the analysis
//! options, register workflows, `start()`, and `stop()` when the
//! analysis ends. Everything else runs on one dedicated background
//! thread, one tick per second.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::{error, instrument, warn};

pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod element;
pub mod errors;
pub mod platforms;
pub mod scheduler;
pub mod sweep;
pub mod workflows;

pub use classifier::{classify, Verdict};
pub use config::{BehaviorFlag, FlagTable, Options};
pub use element::{Control, Window};
pub use errors::AutomationError;
pub use scheduler::Scheduler;
pub use workflows::{InteractionWorkflow, WorkflowKind};

use platforms::DesktopEngine;

/// The interaction simulator's lifecycle handle.
///
/// Owns the platform engine, the resolved flag table and the registered
/// workflows until [`Human::start`] moves them onto the scheduler
/// thread. [`Human::stop`] sets the cooperative stop signal and waits
/// for the loop to observe it (within one tick period).
pub struct Human {
    engine: Arc<dyn DesktopEngine>,
    flags: FlagTable,
    workflows: Vec<Box<dyn InteractionWorkflow>>,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Human {
    /// Build a simulator for the current platform.
    #[instrument(skip(options))]
    pub fn new(options: &Options) -> Result<Self, AutomationError> {
        Ok(Self::with_engine(platforms::create_engine()?, options))
    }

    /// Build a simulator around an explicit engine. Used by tests and
    /// by frameworks that construct the engine themselves.
    pub fn with_engine(engine: Arc<dyn DesktopEngine>, options: &Options) -> Self {
        Self {
            engine,
            flags: FlagTable::resolve(options),
            workflows: Vec::new(),
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Attach a one-shot interaction workflow. Must be called before
    /// [`Human::start`]; workflows registered later are dropped.
    pub fn register_workflow(&mut self, workflow: Box<dyn InteractionWorkflow>) {
        if self.handle.is_some() {
            warn!("workflow registered after start is ignored");
            return;
        }
        self.workflows.push(workflow);
    }

    /// Begin the tick loop on a dedicated background thread.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<(), AutomationError> {
        if self.handle.is_some() {
            warn!("scheduler already running");
            return Ok(());
        }
        self.stop.store(false, Ordering::SeqCst);
        let mut scheduler = Scheduler::new(
            self.engine.clone(),
            self.flags.clone(),
            std::mem::take(&mut self.workflows),
            self.stop.clone(),
        );
        let handle = thread::Builder::new()
            .name("humanizer-scheduler".to_string())
            .spawn(move || scheduler.run())
            .map_err(|e| {
                AutomationError::PlatformError(format!("failed to spawn scheduler thread: {e}"))
            })?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Request cooperative shutdown and wait for the scheduler thread
    /// to exit. The signal is observed at the top of the next tick; a
    /// sweep or workflow already in flight completes first.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("scheduler thread panicked");
            }
        }
    }

    /// Whether the scheduler thread is currently running.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for Human {
    fn drop(&mut self) {
        // Signal only; the detached thread winds down within a tick.
        self.stop.store(true, Ordering::SeqCst);
    }
}
