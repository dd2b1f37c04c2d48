//! Window and control sweeps.
//!
//! A sweep is one full pass over the currently visible windows for a
//! given purpose. Individual windows or controls going stale mid-walk
//! are skipped; only the windowing subsystem itself failing aborts a
//! sweep, and then only for the current tick.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::classifier::{self, Verdict};
use crate::dispatch;
use crate::errors::AutomationError;
use crate::platforms::DesktopEngine;

/// Title pattern for productivity-suite document windows. Leftovers
/// from an earlier automated session pop save prompts that would block
/// this one, so they are closed on sight.
static OFFICE_WINDOW: Lazy<Regex> =
    Lazy::new(|| Regex::new("- (Microsoft|Word|Excel|PowerPoint)").expect("static pattern"));

/// Visit every descendant control of every visible window and click the
/// ones the classifier approves. Siblings of a clicked control are
/// still visited.
pub fn sweep_buttons(engine: &dyn DesktopEngine) -> Result<(), AutomationError> {
    for window in engine.windows()? {
        if !window.is_visible() {
            continue;
        }
        for control in window.controls() {
            let class = match control.class_name() {
                Ok(class) => class,
                Err(e) => {
                    debug!("skipping stale control: {e}");
                    continue;
                }
            };
            if !classifier::is_button_class(&class) {
                continue;
            }
            let text = match control.text() {
                Ok(text) => text,
                Err(e) => {
                    debug!("skipping stale button: {e}");
                    continue;
                }
            };
            if classifier::classify(&class, &text) == Verdict::Click {
                info!(button = %text, "found button, clicking it");
                dispatch::click(&control);
            }
        }
    }
    Ok(())
}

/// Close any visible window whose title marks it as a productivity
/// application's document window.
pub fn sweep_office_windows(engine: &dyn DesktopEngine) -> Result<(), AutomationError> {
    for window in engine.windows()? {
        if !window.is_visible() {
            continue;
        }
        let title = match window.title() {
            Ok(title) => title,
            Err(e) => {
                debug!("skipping stale window: {e}");
                continue;
            }
        };
        if OFFICE_WINDOW.is_match(&title) {
            info!(%title, "closing office window");
            dispatch::request_close(&window);
        }
    }
    Ok(())
}
