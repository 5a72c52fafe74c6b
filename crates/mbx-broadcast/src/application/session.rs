//! HookSession: lifecycle of the global hooks and the three hotkeys.
//!
//! ```text
//!  Uninitialized ──initialize──▶ Armed ◀──update_broadcast_state──▶ Active
//!        │                         │                                   │
//!        └──────────────dispose────┴──────────────dispose──────────────┴──▶ Disposed
//! ```
//!
//! - **Armed**: bound to a host window, hotkeys registered, hooks not
//!   installed.
//! - **Active**: hooks installed; every physical event reaches the
//!   [`BroadcastDispatcher`].
//!
//! Installing and removing hooks is edge-triggered: the backend is only
//! called when the desired state differs from the current one.  Hotkey
//! registration is best-effort; a chord that does not parse or is already
//! owned by another process leaves its slot unbound and is logged.
//!
//! The OS specifics sit behind [`HookBackend`]; the Windows implementation
//! is `infrastructure::platform::windows::WindowsHookBackend`.  The backend
//! owns the process-wide hook slot, so [`HookSession::dispose`] drops it:
//! once a session is disposed, a new one can be created in the same process.

use std::sync::Arc;

use mbx_core::{input::msg, BroadcastSettings, HotkeyChord, HotkeySlot, WindowHandle};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::dispatch::{BroadcastDispatcher, EnvironmentSource, InputPlatform};

/// Error type for hook and hotkey operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookError {
    #[error("failed to install low-level hook: {0}")]
    HookInstallFailed(String),

    #[error("failed to register hotkey {slot:?}: {reason}")]
    HotkeyRegistrationFailed { slot: HotkeySlot, reason: String },

    #[error("another broadcast session already owns the global hooks")]
    SessionAlreadyActive,

    #[error("session cannot be initialized from state {0:?}")]
    InvalidState(SessionState),

    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// OS operations the session drives.
///
/// Dropping the backend releases whatever process-wide resources it claimed.
#[cfg_attr(test, mockall::automock)]
pub trait HookBackend {
    /// Installs the keyboard and mouse hooks, routing events to `dispatcher`.
    fn install_hooks(&mut self, dispatcher: Arc<BroadcastDispatcher>) -> Result<(), HookError>;

    /// Removes both hooks.  Must tolerate hooks that are already gone.
    fn remove_hooks(&mut self);

    fn register_hotkey(
        &mut self,
        host: WindowHandle,
        slot: HotkeySlot,
        chord: &HotkeyChord,
    ) -> Result<(), HookError>;

    /// Unregisters a slot.  Unbound slots are ignored.
    fn unregister_hotkey(&mut self, host: WindowHandle, slot: HotkeySlot);
}

/// Lifecycle state of a [`HookSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Armed,
    Active,
    Disposed,
}

type Handler = Box<dyn Fn() + Send + Sync>;

/// Owns the hook and hotkey lifecycle for one host window.
pub struct HookSession {
    /// `None` once disposed.
    backend: Option<Box<dyn HookBackend>>,
    dispatcher: Arc<BroadcastDispatcher>,
    environment: Arc<dyn EnvironmentSource>,
    state: SessionState,
    host: Option<WindowHandle>,
    bound: Vec<HotkeySlot>,
    on_toggle_broadcast: Option<Handler>,
    on_toggle_mode: Option<Handler>,
    on_toggle_window: Option<Handler>,
}

impl HookSession {
    pub fn new(
        backend: Box<dyn HookBackend>,
        environment: Arc<dyn EnvironmentSource>,
        platform: Arc<dyn InputPlatform>,
    ) -> Self {
        let dispatcher = Arc::new(BroadcastDispatcher::new(Arc::clone(&environment), platform));
        Self {
            backend: Some(backend),
            dispatcher,
            environment,
            state: SessionState::Uninitialized,
            host: None,
            bound: Vec::new(),
            on_toggle_broadcast: None,
            on_toggle_mode: None,
            on_toggle_window: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// `true` while the global hooks are installed.
    pub fn hooks_installed(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Hotkey slots currently registered with the OS.
    pub fn bound_hotkeys(&self) -> &[HotkeySlot] {
        &self.bound
    }

    /// The dispatcher the hooks feed.
    pub fn dispatcher(&self) -> &Arc<BroadcastDispatcher> {
        &self.dispatcher
    }

    /// Binds to `host`, registers the hotkeys and installs the hooks if the
    /// current settings ask for them.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidState`] unless the session is
    /// uninitialized.  Hotkey and hook failures are logged, not returned.
    pub fn initialize(&mut self, host: WindowHandle) -> Result<(), HookError> {
        if self.state != SessionState::Uninitialized {
            return Err(HookError::InvalidState(self.state));
        }
        self.host = Some(host);
        self.state = SessionState::Armed;
        debug!(host = host.0, "hook session armed");

        let settings = self.environment.snapshot().settings();
        self.update_hotkeys(&settings);
        self.update_broadcast_state(&settings);
        Ok(())
    }

    /// Unregisters all three slots, then registers each from `settings`.
    pub fn update_hotkeys(&mut self, settings: &BroadcastSettings) {
        let (Some(host), Some(backend)) = (self.host, self.backend.as_mut()) else {
            return;
        };

        for slot in HotkeySlot::ALL {
            backend.unregister_hotkey(host, slot);
        }
        self.bound.clear();

        for slot in HotkeySlot::ALL {
            let text = settings.hotkey(slot);
            if text.trim().is_empty() {
                continue;
            }
            let chord = match HotkeyChord::parse(text) {
                Ok(chord) => chord,
                Err(e) => {
                    warn!(?slot, "hotkey '{text}' left unbound: {e}");
                    continue;
                }
            };
            match backend.register_hotkey(host, slot, &chord) {
                Ok(()) => {
                    debug!(?slot, "hotkey {chord} registered");
                    self.bound.push(slot);
                }
                Err(e) => warn!(?slot, "hotkey {chord} left unbound: {e}"),
            }
        }
    }

    /// Installs or removes the hooks to match `settings`.
    ///
    /// No-op before `initialize`, after `dispose`, or when the hooks are
    /// already in the wanted state.
    pub fn update_broadcast_state(&mut self, settings: &BroadcastSettings) {
        let wanted = settings.wants_hooks();
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match (self.state, wanted) {
            (SessionState::Armed, true) => {
                match backend.install_hooks(Arc::clone(&self.dispatcher)) {
                    Ok(()) => {
                        self.state = SessionState::Active;
                        info!("broadcast hooks installed");
                    }
                    Err(e) => warn!("broadcast stays inactive: {e}"),
                }
            }
            (SessionState::Active, false) => {
                backend.remove_hooks();
                self.state = SessionState::Armed;
                info!("broadcast hooks removed");
            }
            _ => {}
        }
    }

    /// Releases hotkeys and hooks, then drops the backend so the process-wide
    /// hook slot is free again.  Safe to call in any state, any number of
    /// times.
    pub fn dispose(&mut self) {
        let Some(mut backend) = self.backend.take() else {
            return;
        };
        if self.state == SessionState::Active {
            backend.remove_hooks();
        }
        if let Some(host) = self.host.take() {
            for slot in HotkeySlot::ALL {
                backend.unregister_hotkey(host, slot);
            }
        }
        drop(backend);
        self.bound.clear();
        self.state = SessionState::Disposed;
        debug!("hook session disposed");
    }

    pub fn on_toggle_broadcast_requested(&mut self, handler: impl Fn() + Send + Sync + 'static) {
        self.on_toggle_broadcast = Some(Box::new(handler));
    }

    pub fn on_toggle_mode_requested(&mut self, handler: impl Fn() + Send + Sync + 'static) {
        self.on_toggle_mode = Some(Box::new(handler));
    }

    pub fn on_toggle_window_requested(&mut self, handler: impl Fn() + Send + Sync + 'static) {
        self.on_toggle_window = Some(Box::new(handler));
    }

    /// Handles a message delivered to the host window.
    ///
    /// Returns `true` if the message was a hotkey this session owns; the
    /// matching handler has then been invoked synchronously.
    pub fn handle_host_message(&self, message: u32, wparam: usize) -> bool {
        if message != msg::WM_HOTKEY || matches!(self.state, SessionState::Uninitialized | SessionState::Disposed) {
            return false;
        }
        let Some(slot) = i32::try_from(wparam).ok().and_then(HotkeySlot::from_id) else {
            return false;
        };
        let handler = match slot {
            HotkeySlot::ToggleBroadcast => &self.on_toggle_broadcast,
            HotkeySlot::ToggleMode => &self.on_toggle_mode,
            HotkeySlot::ToggleWindow => &self.on_toggle_window,
        };
        debug!(?slot, "hotkey pressed");
        if let Some(handler) = handler {
            handler();
        }
        true
    }
}

impl Drop for HookSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
