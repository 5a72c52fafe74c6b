//! Mock platform for unit and integration testing.
//!
//! # Why a mock platform?
//!
//! The real platform calls `PostMessageW`, `ScreenToClient` and
//! `GetAsyncKeyState`, which need a desktop session with live game windows
//! and would actually inject input into them.
//!
//! `MockPlatform` replaces every OS call with an in-memory window table and
//! records each posted message in a `Mutex<Vec<...>>`, so tests can assert
//! exactly which window received what, and in which order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let platform = Arc::new(MockPlatform::new());
//! platform.add_window(WindowHandle(1), "D2R", Point::new(0, 0), 800, 600);
//! platform.add_window(WindowHandle(2), "D2R", Point::new(800, 0), 800, 600);
//! platform.set_foreground(WindowHandle(1));
//!
//! dispatcher.handle_key(&event);
//!
//! assert_eq!(platform.posted_to(WindowHandle(2)).len(), 1);
//! ```
//!
//! # Injected failures
//!
//! [`MockPlatform::fail_posts_to`] makes `post_message` fail for one window,
//! which exercises the skip-and-continue path of the dispatcher.

use std::sync::{Mutex, PoisonError};

use mbx_core::{MessageParams, Point, VirtualKey, WindowHandle};

use crate::application::dispatch::{InputPlatform, PlatformError};
use crate::application::targets::{titles_match, WindowDirectory};

/// One fake top-level window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockWindow {
    pub handle: WindowHandle,
    pub title: String,
    pub visible: bool,
    /// Screen position of the client area's top-left corner.
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

/// An in-memory desktop that records all posted messages.
#[derive(Debug, Default)]
pub struct MockPlatform {
    /// Windows in enumeration (z-) order.
    pub windows: Mutex<Vec<MockWindow>>,
    pub foreground: Mutex<WindowHandle>,
    /// Keys and mouse buttons reported as held down.
    pub held_keys: Mutex<Vec<VirtualKey>>,
    /// Every successful `post_message` call, in order.
    pub posted: Mutex<Vec<(WindowHandle, MessageParams)>>,
    /// Windows for which `post_message` fails.
    pub failing: Mutex<Vec<WindowHandle>>,
}

impl MockPlatform {
    /// Creates an empty desktop with no foreground window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a visible window whose client area starts at `origin`.
    pub fn add_window(&self, handle: WindowHandle, title: &str, origin: Point, width: i32, height: i32) {
        lock(&self.windows).push(MockWindow {
            handle,
            title: title.to_string(),
            visible: true,
            origin,
            width,
            height,
        });
    }

    /// Hides or shows an existing window.
    pub fn set_visible(&self, handle: WindowHandle, visible: bool) {
        if let Some(w) = lock(&self.windows).iter_mut().find(|w| w.handle == handle) {
            w.visible = visible;
        }
    }

    /// Removes a window, as if it had been closed.
    pub fn close_window(&self, handle: WindowHandle) {
        lock(&self.windows).retain(|w| w.handle != handle);
    }

    pub fn set_foreground(&self, handle: WindowHandle) {
        *lock(&self.foreground) = handle;
    }

    /// Replaces the set of held keys.
    pub fn hold_keys(&self, keys: &[VirtualKey]) {
        *lock(&self.held_keys) = keys.to_vec();
    }

    pub fn fail_posts_to(&self, handle: WindowHandle) {
        lock(&self.failing).push(handle);
    }

    /// All recorded posts.
    pub fn posted(&self) -> Vec<(WindowHandle, MessageParams)> {
        lock(&self.posted).clone()
    }

    /// Messages posted to one window, in order.
    pub fn posted_to(&self, handle: WindowHandle) -> Vec<MessageParams> {
        lock(&self.posted)
            .iter()
            .filter(|(w, _)| *w == handle)
            .map(|(_, p)| *p)
            .collect()
    }

    fn window(&self, handle: WindowHandle) -> Option<MockWindow> {
        lock(&self.windows).iter().find(|w| w.handle == handle).cloned()
    }
}

/// Locks a mock field, ignoring poisoning from a panicked test thread.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InputPlatform for MockPlatform {
    fn foreground_window(&self) -> WindowHandle {
        *lock(&self.foreground)
    }

    fn screen_to_client(&self, window: WindowHandle, screen: Point) -> Option<Point> {
        self.window(window)
            .map(|w| Point::new(screen.x - w.origin.x, screen.y - w.origin.y))
    }

    fn client_size(&self, window: WindowHandle) -> Option<(i32, i32)> {
        self.window(window).map(|w| (w.width, w.height))
    }

    fn is_key_down(&self, vk: VirtualKey) -> bool {
        lock(&self.held_keys).contains(&vk)
    }

    fn post_message(&self, window: WindowHandle, params: MessageParams) -> Result<(), PlatformError> {
        if lock(&self.failing).contains(&window) {
            return Err(PlatformError::PostFailed {
                window: window.0,
                reason: "injected failure".to_string(),
            });
        }
        if self.window(window).is_none() {
            return Err(PlatformError::InvalidWindow(window.0));
        }
        lock(&self.posted).push((window, params));
        Ok(())
    }
}

impl WindowDirectory for MockPlatform {
    fn find_windows_by_exact_title(&self, title: &str) -> Vec<WindowHandle> {
        lock(&self.windows)
            .iter()
            .filter(|w| w.visible && titles_match(&w.title, title))
            .map(|w| w.handle)
            .collect()
    }

    fn window_title(&self, window: WindowHandle) -> Option<String> {
        self.window(window).map(|w| w.title)
    }

    fn foreground_window(&self) -> WindowHandle {
        *lock(&self.foreground)
    }
}
