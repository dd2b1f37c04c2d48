//! Action dispatcher: the side-effecting half of the pipeline.
//!
//! Clicks and close requests are fire-and-forget; a target that vanished
//! between discovery and use is logged and forgotten, never propagated.

use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::{info, warn};

use crate::element::{Control, Window};
use crate::errors::AutomationError;
use crate::platforms::DesktopEngine;

/// Settle delay between focusing the owning window and sending the
/// activation, to avoid racing window-manager focus animations.
const CLICK_SETTLE: Duration = Duration::from_secs(1);

/// Gap between the synthetic button-down and button-up.
const BUTTON_GAP: Duration = Duration::from_millis(50);

/// Click a control: focus its owning window, wait out the settle delay,
/// then send a synthetic activation. Failures are logged and swallowed.
pub fn click(control: &Control) {
    if let Err(e) = try_click(control) {
        warn!("click failed: {e}");
    }
}

fn try_click(control: &Control) -> Result<(), AutomationError> {
    control.focus_owner()?;
    thread::sleep(CLICK_SETTLE);
    control.activate()
}

/// Ask a window to close. Asynchronous; no confirmation is awaited.
pub fn request_close(window: &Window) {
    match window.request_close() {
        Ok(()) => info!("requested window close"),
        Err(e) => warn!("close request failed: {e}"),
    }
}

/// Move the pointer to a uniformly random point on the active display.
pub fn move_pointer(engine: &dyn DesktopEngine) -> Result<(), AutomationError> {
    let (width, height) = engine.screen_size()?;
    let mut rng = rand::thread_rng();
    let x = rng.gen_range(0..=width);
    let y = rng.gen_range(0..=height);
    engine.set_pointer_position(x, y)
}

/// Move the pointer to the top-center of the screen and issue a
/// synthetic button-down/up pair.
pub fn click_pointer(engine: &dyn DesktopEngine) -> Result<(), AutomationError> {
    let (width, _) = engine.screen_size()?;
    engine.set_pointer_position(width / 2, 0)?;
    engine.pointer_down()?;
    thread::sleep(BUTTON_GAP);
    engine.pointer_up()
}
