//! Shared mock windowing subsystem for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use humanizer::element::{Control, ControlImpl, Window, WindowImpl};
use humanizer::errors::AutomationError;
use humanizer::platforms::DesktopEngine;
use humanizer::workflows::{InteractionWorkflow, WorkflowKind};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "humanizer=debug".into()),
        )
        .try_init();
}

fn gone() -> AutomationError {
    AutomationError::ElementNotAvailable("mock target gone".to_string())
}

#[derive(Debug, Clone)]
pub struct MockControl {
    pub class: String,
    pub text: String,
    pub stale: bool,
    pub children: Vec<MockControl>,
    clicks: Arc<AtomicUsize>,
}

impl MockControl {
    pub fn new(class: &str, text: &str) -> Self {
        Self {
            class: class.to_string(),
            text: text.to_string(),
            stale: false,
            children: Vec::new(),
            clicks: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn button(text: &str) -> Self {
        Self::new("Button", text)
    }

    pub fn stale(mut self) -> Self {
        self.stale = true;
        self
    }

    pub fn with_children(mut self, children: Vec<MockControl>) -> Self {
        self.children = children;
        self
    }

    pub fn click_count(&self) -> usize {
        self.clicks.load(Ordering::SeqCst)
    }
}

impl ControlImpl for MockControl {
    fn class_name(&self) -> Result<String, AutomationError> {
        if self.stale {
            return Err(gone());
        }
        Ok(self.class.clone())
    }

    fn text(&self) -> Result<String, AutomationError> {
        if self.stale {
            return Err(gone());
        }
        Ok(self.text.clone())
    }

    fn children(&self) -> Result<Vec<Control>, AutomationError> {
        if self.stale {
            return Err(gone());
        }
        Ok(self.children.iter().cloned().map(Control::new).collect())
    }

    fn focus_owner(&self) -> Result<(), AutomationError> {
        if self.stale {
            return Err(gone());
        }
        Ok(())
    }

    fn activate(&self) -> Result<(), AutomationError> {
        if self.stale {
            return Err(gone());
        }
        self.clicks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MockWindow {
    pub title: String,
    pub visible: bool,
    pub stale: bool,
    pub controls: Vec<MockControl>,
    close_requests: Arc<AtomicUsize>,
}

impl MockWindow {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            visible: true,
            stale: false,
            controls: Vec::new(),
            close_requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn stale(mut self) -> Self {
        self.stale = true;
        self
    }

    pub fn with_controls(mut self, controls: Vec<MockControl>) -> Self {
        self.controls = controls;
        self
    }

    pub fn close_count(&self) -> usize {
        self.close_requests.load(Ordering::SeqCst)
    }
}

impl WindowImpl for MockWindow {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn title(&self) -> Result<String, AutomationError> {
        if self.stale {
            return Err(gone());
        }
        Ok(self.title.clone())
    }

    fn children(&self) -> Result<Vec<Control>, AutomationError> {
        if self.stale {
            return Err(gone());
        }
        Ok(self.controls.iter().cloned().map(Control::new).collect())
    }

    fn request_close(&self) -> Result<(), AutomationError> {
        if self.stale {
            return Err(gone());
        }
        self.close_requests.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct MockEngine {
    pub windows: Vec<MockWindow>,
    pub fail_enumeration: bool,
    pub size: (i32, i32),
    pub pointer_positions: Arc<Mutex<Vec<(i32, i32)>>>,
    pub downs: Arc<AtomicUsize>,
    pub ups: Arc<AtomicUsize>,
}

impl MockEngine {
    pub fn new(windows: Vec<MockWindow>) -> Self {
        Self {
            windows,
            fail_enumeration: false,
            size: (1920, 1080),
            pointer_positions: Arc::new(Mutex::new(Vec::new())),
            downs: Arc::new(AtomicUsize::new(0)),
            ups: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        let mut engine = Self::new(Vec::new());
        engine.fail_enumeration = true;
        engine
    }
}

impl DesktopEngine for MockEngine {
    fn windows(&self) -> Result<Vec<Window>, AutomationError> {
        if self.fail_enumeration {
            return Err(AutomationError::PlatformError(
                "mock windowing subsystem unreachable".to_string(),
            ));
        }
        Ok(self.windows.iter().cloned().map(Window::new).collect())
    }

    fn screen_size(&self) -> Result<(i32, i32), AutomationError> {
        Ok(self.size)
    }

    fn set_pointer_position(&self, x: i32, y: i32) -> Result<(), AutomationError> {
        self.pointer_positions.lock().unwrap().push((x, y));
        Ok(())
    }

    fn pointer_down(&self) -> Result<(), AutomationError> {
        self.downs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn pointer_up(&self) -> Result<(), AutomationError> {
        self.ups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct MockWorkflow {
    kind: WorkflowKind,
    fails: bool,
    runs: Arc<AtomicUsize>,
    log: Arc<Mutex<Vec<WorkflowKind>>>,
}

impl MockWorkflow {
    pub fn new(kind: WorkflowKind, log: Arc<Mutex<Vec<WorkflowKind>>>) -> Self {
        Self {
            kind,
            fails: false,
            runs: Arc::new(AtomicUsize::new(0)),
            log,
        }
    }

    pub fn failing(kind: WorkflowKind, log: Arc<Mutex<Vec<WorkflowKind>>>) -> Self {
        let mut workflow = Self::new(kind, log);
        workflow.fails = true;
        workflow
    }

    pub fn run_counter(&self) -> Arc<AtomicUsize> {
        self.runs.clone()
    }
}

impl InteractionWorkflow for MockWorkflow {
    fn kind(&self) -> WorkflowKind {
        self.kind
    }

    fn run(&self) -> Result<(), AutomationError> {
        self.log.lock().unwrap().push(self.kind);
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fails {
            return Err(AutomationError::WorkflowFailed(format!(
                "mock {} workflow refused",
                self.kind
            )));
        }
        Ok(())
    }
}
