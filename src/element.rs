//! Trait-object wrappers around the windowing subsystem's window and
//! control handles.
//!
//! Handles are owned by the operating environment and only observed
//! here. A [`Control`] is transient: it is valid for the duration of the
//! sweep that produced it and must not be retained across ticks.

use std::fmt::Debug;

use tracing::debug;

use crate::errors::AutomationError;

/// Platform interface for a top-level desktop window.
pub trait WindowImpl: Send + Sync + Debug {
    fn is_visible(&self) -> bool;
    fn title(&self) -> Result<String, AutomationError>;
    /// Direct child controls, in z-order.
    fn children(&self) -> Result<Vec<Control>, AutomationError>;
    /// Post an asynchronous close request. Fire-and-forget.
    fn request_close(&self) -> Result<(), AutomationError>;
}

/// A top-level desktop window.
#[derive(Debug)]
pub struct Window {
    inner: Box<dyn WindowImpl>,
}

impl Window {
    pub fn new(inner: impl WindowImpl + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.inner.is_visible()
    }

    pub fn title(&self) -> Result<String, AutomationError> {
        self.inner.title()
    }

    pub fn request_close(&self) -> Result<(), AutomationError> {
        self.inner.request_close()
    }

    /// Depth-first walk over every descendant control. The sequence is
    /// lazy and single-use; the underlying tree may change between
    /// sweeps, so it is never restarted.
    pub fn controls(&self) -> ControlWalk {
        match self.inner.children() {
            Ok(children) => ControlWalk::from_roots(children),
            Err(e) => {
                debug!("window children unavailable, skipping: {e}");
                ControlWalk::from_roots(Vec::new())
            }
        }
    }
}

/// Platform interface for a child control of a window.
pub trait ControlImpl: Send + Sync + Debug {
    fn class_name(&self) -> Result<String, AutomationError>;
    /// The control's text. Unbounded; platforms query the length before
    /// allocating.
    fn text(&self) -> Result<String, AutomationError>;
    /// Direct child controls, in z-order.
    fn children(&self) -> Result<Vec<Control>, AutomationError>;
    /// Bring the control's owning top-level window to the foreground.
    fn focus_owner(&self) -> Result<(), AutomationError>;
    /// Send a synthetic activation message to the control.
    fn activate(&self) -> Result<(), AutomationError>;
}

/// A UI element that is a descendant of a [`Window`]. Valid only for the
/// enumeration pass that produced it.
#[derive(Debug)]
pub struct Control {
    inner: Box<dyn ControlImpl>,
}

impl Control {
    pub fn new(inner: impl ControlImpl + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    pub fn class_name(&self) -> Result<String, AutomationError> {
        self.inner.class_name()
    }

    pub fn text(&self) -> Result<String, AutomationError> {
        self.inner.text()
    }

    pub fn children(&self) -> Result<Vec<Control>, AutomationError> {
        self.inner.children()
    }

    pub fn focus_owner(&self) -> Result<(), AutomationError> {
        self.inner.focus_owner()
    }

    pub fn activate(&self) -> Result<(), AutomationError> {
        self.inner.activate()
    }
}

/// Explicit depth-first traversal of a window's control tree.
///
/// A control whose children cannot be fetched (closed concurrently with
/// the walk) is still yielded, but its subtree is skipped; stale entries
/// are never fatal to the sweep.
pub struct ControlWalk {
    stack: Vec<Control>,
}

impl ControlWalk {
    fn from_roots(mut roots: Vec<Control>) -> Self {
        roots.reverse();
        Self { stack: roots }
    }
}

impl Iterator for ControlWalk {
    type Item = Control;

    fn next(&mut self) -> Option<Control> {
        let control = self.stack.pop()?;
        match control.children() {
            Ok(mut children) => {
                children.reverse();
                self.stack.append(&mut children);
            }
            Err(e) => debug!("control subtree unavailable, skipping: {e}"),
        }
        Some(control)
    }
}
