//! Win32 engine.
//!
//! Classic window messages rather than UI Automation: the controls this
//! engine cares about (installer wizards, message boxes, permission
//! dialogs) are plain Win32 buttons, and `BM_CLICK`/`WM_CLOSE` reach
//! them without a COM apartment.

use std::ffi::c_void;

use tracing::debug;
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEINPUT,
    MOUSE_EVENT_FLAGS,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetAncestor, GetClassNameW, GetSystemMetrics, GetWindow, GetWindowTextW,
    IsWindow, IsWindowVisible, SendMessageW, SendNotifyMessageW, SetCursorPos,
    SetForegroundWindow, BM_CLICK, GA_ROOT, GW_CHILD, GW_HWNDNEXT, SM_CXSCREEN, SM_CYSCREEN,
    WM_CLOSE, WM_GETTEXT, WM_GETTEXTLENGTH,
};

use crate::element::{Control, ControlImpl, Window, WindowImpl};
use crate::errors::AutomationError;
use crate::platforms::DesktopEngine;

/// HWNDs are carried as `isize` so handles can cross the scheduler
/// thread boundary (`HWND` wraps a raw pointer and is not `Send`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawHandle(isize);

impl RawHandle {
    fn from_hwnd(hwnd: HWND) -> Self {
        Self(hwnd.0 as isize)
    }

    fn hwnd(self) -> HWND {
        HWND(self.0 as *mut c_void)
    }

    fn is_alive(self) -> bool {
        unsafe { IsWindow(self.hwnd()) }.as_bool()
    }

    fn gone(self, what: &str) -> AutomationError {
        AutomationError::ElementNotAvailable(format!("{what} {:#x} no longer exists", self.0))
    }
}

fn top_level_handles() -> Result<Vec<RawHandle>, AutomationError> {
    unsafe extern "system" fn collect(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let handles = &mut *(lparam.0 as *mut Vec<RawHandle>);
        handles.push(RawHandle::from_hwnd(hwnd));
        BOOL(1)
    }

    let mut handles: Vec<RawHandle> = Vec::new();
    unsafe {
        EnumWindows(
            Some(collect),
            LPARAM(&mut handles as *mut Vec<RawHandle> as isize),
        )
    }
    .map_err(|e| AutomationError::PlatformError(format!("EnumWindows failed: {e}")))?;
    Ok(handles)
}

/// Direct children of a window, in z-order.
fn direct_children(parent: RawHandle) -> Vec<RawHandle> {
    let null = HWND(std::ptr::null_mut());
    let mut children = Vec::new();
    let mut next = unsafe { GetWindow(parent.hwnd(), GW_CHILD) }.unwrap_or(null);
    while !next.0.is_null() {
        children.push(RawHandle::from_hwnd(next));
        next = unsafe { GetWindow(next, GW_HWNDNEXT) }.unwrap_or(null);
    }
    children
}

fn window_title(handle: RawHandle) -> String {
    let mut buf = [0u16; 1024];
    let len = unsafe { GetWindowTextW(handle.hwnd(), &mut buf) };
    String::from_utf16_lossy(&buf[..len.max(0) as usize])
}

fn class_name(handle: RawHandle) -> String {
    let mut buf = [0u16; 256];
    let len = unsafe { GetClassNameW(handle.hwnd(), &mut buf) };
    String::from_utf16_lossy(&buf[..len.max(0) as usize])
}

/// Control text is unbounded, so the length is queried before the
/// buffer is allocated.
fn control_text(handle: RawHandle) -> String {
    let len =
        unsafe { SendMessageW(handle.hwnd(), WM_GETTEXTLENGTH, WPARAM(0), LPARAM(0)) }.0.max(0)
            as usize;
    let mut buf = vec![0u16; len + 1];
    let copied = unsafe {
        SendMessageW(
            handle.hwnd(),
            WM_GETTEXT,
            WPARAM(buf.len()),
            LPARAM(buf.as_mut_ptr() as isize),
        )
    }
    .0
    .max(0) as usize;
    String::from_utf16_lossy(&buf[..copied.min(len)])
}

#[derive(Debug, Clone, Copy)]
struct WinWindow(RawHandle);

impl WindowImpl for WinWindow {
    fn is_visible(&self) -> bool {
        unsafe { IsWindowVisible(self.0.hwnd()) }.as_bool()
    }

    fn title(&self) -> Result<String, AutomationError> {
        if !self.0.is_alive() {
            return Err(self.0.gone("window"));
        }
        Ok(window_title(self.0))
    }

    fn children(&self) -> Result<Vec<Control>, AutomationError> {
        if !self.0.is_alive() {
            return Err(self.0.gone("window"));
        }
        Ok(direct_children(self.0)
            .into_iter()
            .map(|h| Control::new(WinControl(h)))
            .collect())
    }

    fn request_close(&self) -> Result<(), AutomationError> {
        if !self.0.is_alive() {
            return Err(self.0.gone("window"));
        }
        unsafe { SendNotifyMessageW(self.0.hwnd(), WM_CLOSE, WPARAM(0), LPARAM(0)) }
            .map_err(|e| AutomationError::PlatformError(format!("WM_CLOSE notify failed: {e}")))
    }
}

#[derive(Debug, Clone, Copy)]
struct WinControl(RawHandle);

impl ControlImpl for WinControl {
    fn class_name(&self) -> Result<String, AutomationError> {
        if !self.0.is_alive() {
            return Err(self.0.gone("control"));
        }
        Ok(class_name(self.0))
    }

    fn text(&self) -> Result<String, AutomationError> {
        if !self.0.is_alive() {
            return Err(self.0.gone("control"));
        }
        Ok(control_text(self.0))
    }

    fn children(&self) -> Result<Vec<Control>, AutomationError> {
        if !self.0.is_alive() {
            return Err(self.0.gone("control"));
        }
        Ok(direct_children(self.0)
            .into_iter()
            .map(|h| Control::new(WinControl(h)))
            .collect())
    }

    fn focus_owner(&self) -> Result<(), AutomationError> {
        let root = unsafe { GetAncestor(self.0.hwnd(), GA_ROOT) };
        if root.0.is_null() {
            return Err(self.0.gone("control"));
        }
        // Foreground activation is refused when another process holds
        // focus; BM_CLICK still lands, so this is not an error.
        if !unsafe { SetForegroundWindow(root) }.as_bool() {
            debug!("SetForegroundWindow refused, continuing");
        }
        Ok(())
    }

    fn activate(&self) -> Result<(), AutomationError> {
        if !self.0.is_alive() {
            return Err(self.0.gone("control"));
        }
        let _ = unsafe { SendMessageW(self.0.hwnd(), BM_CLICK, WPARAM(0), LPARAM(0)) };
        Ok(())
    }
}

fn send_pointer_button(flags: MOUSE_EVENT_FLAGS) -> Result<(), AutomationError> {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if sent == 0 {
        return Err(AutomationError::PlatformError(
            "SendInput rejected the pointer event".to_string(),
        ));
    }
    Ok(())
}

/// Engine backed by the classic Win32 windowing APIs.
pub struct WindowsEngine;

impl WindowsEngine {
    pub fn new() -> Result<Self, AutomationError> {
        Ok(Self)
    }
}

impl DesktopEngine for WindowsEngine {
    fn windows(&self) -> Result<Vec<Window>, AutomationError> {
        Ok(top_level_handles()?
            .into_iter()
            .map(|h| Window::new(WinWindow(h)))
            .collect())
    }

    fn screen_size(&self) -> Result<(i32, i32), AutomationError> {
        let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
        let height = unsafe { GetSystemMetrics(SM_CYSCREEN) };
        if width == 0 || height == 0 {
            return Err(AutomationError::PlatformError(
                "GetSystemMetrics reported a zero-sized display".to_string(),
            ));
        }
        Ok((width, height))
    }

    fn set_pointer_position(&self, x: i32, y: i32) -> Result<(), AutomationError> {
        unsafe { SetCursorPos(x, y) }
            .map_err(|e| AutomationError::PlatformError(format!("SetCursorPos failed: {e}")))
    }

    fn pointer_down(&self) -> Result<(), AutomationError> {
        send_pointer_button(MOUSEEVENTF_LEFTDOWN)
    }

    fn pointer_up(&self) -> Result<(), AutomationError> {
        send_pointer_button(MOUSEEVENTF_LEFTUP)
    }
}
