//! Platform engines: the slice of the windowing subsystem the
//! interaction-simulation engine consumes.

use std::sync::Arc;

use crate::element::Window;
use crate::errors::AutomationError;

/// The common trait all platform engines implement. Every call is
/// synchronous and blocks on the underlying windowing subsystem.
pub trait DesktopEngine: Send + Sync {
    /// All current top-level windows, visible or not.
    fn windows(&self) -> Result<Vec<Window>, AutomationError>;

    /// The active display's resolution in pixels.
    fn screen_size(&self) -> Result<(i32, i32), AutomationError>;

    /// Move the pointer to an absolute screen position.
    fn set_pointer_position(&self, x: i32, y: i32) -> Result<(), AutomationError>;

    /// Synthesize a pointer button press at the current position.
    fn pointer_down(&self) -> Result<(), AutomationError>;

    /// Synthesize a pointer button release at the current position.
    fn pointer_up(&self) -> Result<(), AutomationError>;
}

#[cfg(target_os = "windows")]
pub mod windows;

/// Create the engine for the current platform.
pub fn create_engine() -> Result<Arc<dyn DesktopEngine>, AutomationError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::WindowsEngine::new()?))
    }
    #[cfg(not(target_os = "windows"))]
    {
        Err(AutomationError::UnsupportedPlatform(
            "human-interaction simulation requires a Windows desktop".to_string(),
        ))
    }
}
