use thiserror::Error;

/// Errors surfaced by the interaction-simulation engine.
///
/// None of these are fatal to the scheduler loop: stale targets are
/// skipped, workflow failures consume the workflow's one-shot flag, and
/// platform failures abort the current tick step only.
#[derive(Error, Debug)]
pub enum AutomationError {
    /// A window or control handle became invalid between discovery and
    /// use. Expected under concurrent desktop activity.
    #[error("Element not available: {0}")]
    ElementNotAvailable(String),

    /// The windowing subsystem rejected or failed an operation.
    #[error("Platform error: {0}")]
    PlatformError(String),

    /// An external interaction workflow raised an error.
    #[error("Workflow failed: {0}")]
    WorkflowFailed(String),

    /// The engine was created on a platform without a supported
    /// windowing subsystem.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}
