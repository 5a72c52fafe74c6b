//! Windows implementation of the broadcast platform.
//!
//! - [`WindowsPlatform`] answers window queries (`GetForegroundWindow`,
//!   `ScreenToClient`, `EnumWindows`, ...) and posts the mirrored messages
//!   with `PostMessageW`.
//! - [`WindowsHookBackend`] installs the `WH_KEYBOARD_LL` / `WH_MOUSE_LL`
//!   hooks and registers the three hotkeys on the host window.
//! - [`create_message_window`] and [`run_message_loop`] provide the
//!   message-only host window and the Win32 loop the hooks need.
//!
//! Low-level hook callbacks run on the thread that installed the hooks, and
//! only while that thread is pumping messages.  The dispatcher is therefore
//! kept in a thread-local, and hooks must be installed from the thread that
//! runs [`run_message_loop`].
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::cell::RefCell;
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mbx_core::{
    HotkeyChord, HotkeySlot, KeyEvent, MessageParams, MouseEvent, Point, RawInputEvent,
    VirtualKey, WindowHandle,
};
use tracing::{debug, error, warn};
use windows::core::w;
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::ScreenToClient;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_NOREPEAT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, CreateWindowExW, DestroyWindow, DispatchMessageW, EnumWindows,
    GetClientRect, GetForegroundWindow, GetMessageW, GetWindowTextLengthW, GetWindowTextW,
    IsWindow, IsWindowVisible, PostMessageW, PostThreadMessageW, SetWindowsHookExW,
    TranslateMessage, UnhookWindowsHookEx, HC_ACTION, HHOOK, HWND_MESSAGE, KBDLLHOOKSTRUCT, MSG,
    MSLLHOOKSTRUCT, WH_KEYBOARD_LL, WH_MOUSE_LL, WINDOW_EX_STYLE, WINDOW_STYLE, WM_QUIT,
};

use crate::application::dispatch::{BroadcastDispatcher, InputPlatform, PlatformError};
use crate::application::session::{HookBackend, HookError};
use crate::application::targets::{titles_match, WindowDirectory};

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

fn handle(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

// ── Window queries and message posting ────────────────────────────────────────

/// Live desktop access through the Win32 API.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsPlatform;

impl WindowsPlatform {
    pub fn new() -> Self {
        Self
    }
}

/// Visible top-level windows titled `title` (case-insensitive), in z-order.
pub fn find_windows_by_exact_title(title: &str) -> Vec<WindowHandle> {
    struct Search<'a> {
        title: &'a str,
        found: Vec<WindowHandle>,
    }

    unsafe extern "system" fn enum_cb(hwnd: HWND, lparam: LPARAM) -> BOOL {
        // SAFETY: lparam is the `Search` passed to EnumWindows below, which
        // outlives the synchronous enumeration.
        let search = &mut *(lparam.0 as *mut Search<'_>);
        if IsWindowVisible(hwnd).as_bool() {
            if let Some(text) = read_window_text(hwnd) {
                if titles_match(&text, search.title) {
                    search.found.push(handle(hwnd));
                }
            }
        }
        BOOL(1)
    }

    let mut search = Search {
        title,
        found: Vec::new(),
    };
    // SAFETY: the callback has the WNDENUMPROC signature and only touches
    // `search` through the LPARAM for the duration of this call.
    unsafe {
        let ptr = &mut search as *mut Search<'_>;
        if let Err(e) = EnumWindows(Some(enum_cb), LPARAM(ptr as isize)) {
            debug!("EnumWindows stopped early: {e}");
        }
    }
    search.found
}

/// Reads a window title.  `None` for untitled windows.
///
/// # Safety
///
/// `hwnd` may be stale; the Win32 calls tolerate that and report length 0.
unsafe fn read_window_text(hwnd: HWND) -> Option<String> {
    let len = GetWindowTextLengthW(hwnd);
    if len <= 0 {
        return None;
    }
    let mut buf = vec![0u16; len as usize + 1];
    let read = GetWindowTextW(hwnd, &mut buf);
    if read <= 0 {
        return None;
    }
    Some(String::from_utf16_lossy(&buf[..read as usize]))
}

impl InputPlatform for WindowsPlatform {
    fn foreground_window(&self) -> WindowHandle {
        // SAFETY: no preconditions; returns null when no window is focused.
        handle(unsafe { GetForegroundWindow() })
    }

    fn screen_to_client(&self, window: WindowHandle, screen: Point) -> Option<Point> {
        let mut pt = POINT {
            x: screen.x,
            y: screen.y,
        };
        // SAFETY: `pt` is a valid, writable POINT for the duration of the call.
        let ok = unsafe { ScreenToClient(hwnd(window), &mut pt) };
        ok.as_bool().then(|| Point::new(pt.x, pt.y))
    }

    fn client_size(&self, window: WindowHandle) -> Option<(i32, i32)> {
        let mut rect = RECT::default();
        // SAFETY: `rect` is a valid, writable RECT for the duration of the call.
        unsafe { GetClientRect(hwnd(window), &mut rect) }.ok()?;
        Some((rect.right - rect.left, rect.bottom - rect.top))
    }

    fn is_key_down(&self, vk: VirtualKey) -> bool {
        // SAFETY: no preconditions; the high bit reports "currently down".
        unsafe { GetAsyncKeyState(i32::from(vk)) < 0 }
    }

    fn post_message(&self, window: WindowHandle, params: MessageParams) -> Result<(), PlatformError> {
        // SAFETY: PostMessageW only queues the message; a stale handle makes
        // the call fail rather than crash.
        unsafe {
            PostMessageW(
                hwnd(window),
                params.message,
                WPARAM(params.wparam),
                LPARAM(params.lparam),
            )
        }
        .map_err(|e| PlatformError::PostFailed {
            window: window.0,
            reason: e.to_string(),
        })
    }
}

impl WindowDirectory for WindowsPlatform {
    fn find_windows_by_exact_title(&self, title: &str) -> Vec<WindowHandle> {
        find_windows_by_exact_title(title)
    }

    fn window_title(&self, window: WindowHandle) -> Option<String> {
        let hwnd = hwnd(window);
        // SAFETY: IsWindow and the text getters accept any handle value.
        unsafe {
            if !IsWindow(hwnd).as_bool() {
                return None;
            }
            Some(read_window_text(hwnd).unwrap_or_default())
        }
    }

    fn foreground_window(&self) -> WindowHandle {
        InputPlatform::foreground_window(self)
    }
}

// ── Hooks and hotkeys ─────────────────────────────────────────────────────────

/// Set while a [`WindowsHookBackend`] exists.  Low-level hooks are
/// process-global, so only one session may own them.
static HOOKS_CLAIMED: AtomicBool = AtomicBool::new(false);

thread_local! {
    /// Dispatcher fed by the hook callbacks on this thread.
    static DISPATCHER: RefCell<Option<Arc<BroadcastDispatcher>>> = const { RefCell::new(None) };
}

/// [`HookBackend`] over `SetWindowsHookExW` and `RegisterHotKey`.
pub struct WindowsHookBackend {
    keyboard: Option<HHOOK>,
    mouse: Option<HHOOK>,
}

impl WindowsHookBackend {
    /// Claims the process-wide hook slot.
    ///
    /// # Errors
    ///
    /// [`HookError::SessionAlreadyActive`] if another backend is alive.
    pub fn new() -> Result<Self, HookError> {
        if HOOKS_CLAIMED
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(HookError::SessionAlreadyActive);
        }
        Ok(Self {
            keyboard: None,
            mouse: None,
        })
    }
}

impl Drop for WindowsHookBackend {
    fn drop(&mut self) {
        self.remove_hooks();
        HOOKS_CLAIMED.store(false, Ordering::SeqCst);
    }
}

impl HookBackend for WindowsHookBackend {
    fn install_hooks(&mut self, dispatcher: Arc<BroadcastDispatcher>) -> Result<(), HookError> {
        if self.keyboard.is_some() || self.mouse.is_some() {
            return Ok(());
        }
        DISPATCHER.with(|d| *d.borrow_mut() = Some(dispatcher));

        // SAFETY: both procs have the HOOKPROC signature and live for the
        // whole program; the module handle is this executable.
        let installed = unsafe {
            GetModuleHandleW(None).and_then(|module| {
                let keyboard = SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), module, 0)?;
                match SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), module, 0) {
                    Ok(mouse) => Ok((keyboard, mouse)),
                    Err(e) => {
                        let _ = UnhookWindowsHookEx(keyboard);
                        Err(e)
                    }
                }
            })
        };

        match installed {
            Ok((keyboard, mouse)) => {
                self.keyboard = Some(keyboard);
                self.mouse = Some(mouse);
                debug!("WH_KEYBOARD_LL and WH_MOUSE_LL installed");
                Ok(())
            }
            Err(e) => {
                DISPATCHER.with(|d| *d.borrow_mut() = None);
                Err(HookError::HookInstallFailed(e.to_string()))
            }
        }
    }

    fn remove_hooks(&mut self) {
        for hook in [self.keyboard.take(), self.mouse.take()].into_iter().flatten() {
            // SAFETY: `hook` came from SetWindowsHookExW and is unhooked once.
            if let Err(e) = unsafe { UnhookWindowsHookEx(hook) } {
                warn!("UnhookWindowsHookEx failed: {e}");
            }
        }
        DISPATCHER.with(|d| *d.borrow_mut() = None);
    }

    fn register_hotkey(
        &mut self,
        host: WindowHandle,
        slot: HotkeySlot,
        chord: &HotkeyChord,
    ) -> Result<(), HookError> {
        let modifiers = HOT_KEY_MODIFIERS(chord.modifiers().bits() | MOD_NOREPEAT.0);
        // SAFETY: `host` is the message window created on this thread.
        unsafe { RegisterHotKey(hwnd(host), slot.id(), modifiers, u32::from(chord.key())) }.map_err(
            |e| HookError::HotkeyRegistrationFailed {
                slot,
                reason: e.to_string(),
            },
        )
    }

    fn unregister_hotkey(&mut self, host: WindowHandle, slot: HotkeySlot) {
        // SAFETY: unregistering an id that was never registered just fails.
        let _ = unsafe { UnregisterHotKey(hwnd(host), slot.id()) };
    }
}

/// Hands one decoded event to this thread's dispatcher.
///
/// A panic must never unwind across the FFI boundary, so it is caught and
/// logged here.
fn dispatch(event: RawInputEvent) {
    let Some(dispatcher) = DISPATCHER.with(|d| d.borrow().clone()) else {
        return;
    };
    if panic::catch_unwind(AssertUnwindSafe(|| dispatcher.handle(&event))).is_err() {
        error!(?event, "dispatcher panicked; event dropped");
    }
}

/// Low-level keyboard hook callback.
///
/// # Safety
///
/// Called by Windows on the hook thread.  It never swallows the physical
/// event: the chain is always continued.
unsafe extern "system" fn keyboard_hook_proc(n_code: i32, w_param: WPARAM, l_param: LPARAM) -> LRESULT {
    if n_code == HC_ACTION as i32 {
        // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
        let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);
        if let Some(event) = KeyEvent::from_hook(w_param.0 as u32, kbs.vkCode, kbs.scanCode, kbs.flags.0) {
            dispatch(RawInputEvent::Key(event));
        }
    }
    // SAFETY: forward to the next hook in the chain.
    CallNextHookEx(HHOOK::default(), n_code, w_param, l_param)
}

/// Low-level mouse hook callback.
///
/// # Safety
///
/// Called by Windows on the hook thread; must return quickly.
unsafe extern "system" fn mouse_hook_proc(n_code: i32, w_param: WPARAM, l_param: LPARAM) -> LRESULT {
    if n_code == HC_ACTION as i32 {
        // SAFETY: l_param points to a MSLLHOOKSTRUCT when n_code == HC_ACTION.
        let mhs = &*(l_param.0 as *const MSLLHOOKSTRUCT);
        if let Some(event) = MouseEvent::from_hook(w_param.0 as u32, mhs.pt.x, mhs.pt.y, mhs.mouseData) {
            dispatch(RawInputEvent::Mouse(event));
        }
    }
    // SAFETY: forward to the next hook in the chain.
    CallNextHookEx(HHOOK::default(), n_code, w_param, l_param)
}

// ── Host window and message loop ──────────────────────────────────────────────

/// Creates a hidden message-only window to receive `WM_HOTKEY`.
///
/// # Errors
///
/// [`HookError::HookInstallFailed`] if `CreateWindowExW` fails.
pub fn create_message_window() -> Result<WindowHandle, HookError> {
    // SAFETY: "STATIC" is a system class; HWND_MESSAGE makes the window
    // message-only, so it is never shown.
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            w!("STATIC"),
            w!("mbx-broadcast host"),
            WINDOW_STYLE(0),
            0,
            0,
            0,
            0,
            HWND_MESSAGE,
            None,
            None,
            None,
        )
    }
    .map_err(|e| HookError::HookInstallFailed(format!("host window: {e}")))?;
    Ok(handle(hwnd))
}

pub fn destroy_message_window(window: WindowHandle) {
    // SAFETY: called on the creating thread with the handle it returned.
    if let Err(e) = unsafe { DestroyWindow(hwnd(window)) } {
        warn!("DestroyWindow failed: {e}");
    }
}

/// Id of the calling thread, for [`post_quit`].
pub fn current_thread_id() -> u32 {
    // SAFETY: no preconditions.
    unsafe { GetCurrentThreadId() }
}

/// Asks the message loop running on `thread_id` to exit.
pub fn post_quit(thread_id: u32) {
    // SAFETY: PostThreadMessageW only queues a message.
    if let Err(e) = unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
        warn!("failed to post WM_QUIT: {e}");
    }
}

/// Pumps messages until `WM_QUIT`.
///
/// `on_message` sees every message (id, wParam) before it is dispatched, which
/// is how thread-queued `WM_HOTKEY` messages reach the session.
pub fn run_message_loop(mut on_message: impl FnMut(u32, usize)) {
    let mut msg = MSG::default();
    loop {
        // SAFETY: standard Win32 GetMessage/DispatchMessage loop pattern.
        let r = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if r.0 <= 0 {
            break;
        }
        on_message(msg.message, msg.wParam.0);
        // SAFETY: `msg` was filled in by GetMessageW.
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
