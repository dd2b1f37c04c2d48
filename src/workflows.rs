//! One-shot interaction workflows.
//!
//! A workflow is a scripted per-application routine (open an editor and
//! type some text, run a few calculator operations, ...) supplied by the
//! sandbox framework. The engine treats them as opaque: the scheduler
//! dispatches each registered workflow at most once per analysis run and
//! only observes success or failure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AutomationError;

/// The workflow slots the scheduler knows about, in dispatch priority
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    Editor,
    Paint,
    Document,
    Pdf,
    Browser,
    Calculator,
}

impl WorkflowKind {
    /// All kinds, in the fixed order the scheduler dispatches them.
    pub const ALL: [WorkflowKind; 6] = [
        WorkflowKind::Editor,
        WorkflowKind::Paint,
        WorkflowKind::Document,
        WorkflowKind::Pdf,
        WorkflowKind::Browser,
        WorkflowKind::Calculator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowKind::Editor => "editor",
            WorkflowKind::Paint => "paint",
            WorkflowKind::Document => "document",
            WorkflowKind::Pdf => "pdf",
            WorkflowKind::Browser => "browser",
            WorkflowKind::Calculator => "calculator",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scripted per-application routine invoked by the scheduler.
///
/// `run` is synchronous and blocking; the scheduler does not interrupt
/// it once started. A returned error is logged and swallowed, and the
/// workflow's one-shot flag is consumed either way, so implementations
/// never run twice within one analysis.
pub trait InteractionWorkflow: Send {
    /// Which scheduler slot this workflow fills.
    fn kind(&self) -> WorkflowKind;

    /// Execute the routine to completion.
    fn run(&self) -> Result<(), AutomationError>;
}
