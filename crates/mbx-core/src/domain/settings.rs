//! Broadcast settings and target descriptors.
//!
//! [`BroadcastSettings`] is owned by the configuration layer and is read-only
//! to the broadcast engine.  The engine receives it as an immutable snapshot on
//! every event; writers replace the whole snapshot rather than mutating fields
//! in place, so a hook callback never observes a half-updated value.

use serde::{Deserialize, Serialize};

use crate::hotkey::{HotkeyChord, HotkeySlot};

/// Opaque OS window identifier (`HWND` on Windows).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// A window that should receive mirrored input.
///
/// Supplied fresh on every dispatch; the engine never caches targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetWindow {
    pub handle: WindowHandle,
    /// Whether the window renders into a letterboxed 4:3 viewport.
    pub classic_mode_enabled: bool,
}

impl TargetWindow {
    pub fn new(handle: WindowHandle, classic_mode_enabled: bool) -> Self {
        Self {
            handle,
            classic_mode_enabled,
        }
    }
}

/// User-facing broadcast switches and hotkey bindings.
///
/// Hotkey strings are either empty or `Modifier+...+Key`; a string that fails
/// to parse simply leaves its hotkey inactive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BroadcastSettings {
    /// Master switch.
    #[serde(default)]
    pub enabled: bool,
    /// Mirror into every running target, not only those marked for broadcast.
    #[serde(default = "default_true")]
    pub broadcast_all: bool,
    #[serde(default = "default_true")]
    pub keyboard_enabled: bool,
    #[serde(default = "default_true")]
    pub mouse_enabled: bool,
    #[serde(default = "default_toggle_broadcast_hotkey")]
    pub toggle_broadcast_hotkey: String,
    #[serde(default = "default_toggle_mode_hotkey")]
    pub toggle_mode_hotkey: String,
    #[serde(default = "default_toggle_window_hotkey")]
    pub toggle_window_hotkey: String,
}

fn default_true() -> bool {
    true
}
fn default_toggle_broadcast_hotkey() -> String {
    "Ctrl+Alt+B".to_string()
}
fn default_toggle_mode_hotkey() -> String {
    "Ctrl+Alt+M".to_string()
}
fn default_toggle_window_hotkey() -> String {
    "Ctrl+Alt+W".to_string()
}

impl Default for BroadcastSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            broadcast_all: default_true(),
            keyboard_enabled: default_true(),
            mouse_enabled: default_true(),
            toggle_broadcast_hotkey: default_toggle_broadcast_hotkey(),
            toggle_mode_hotkey: default_toggle_mode_hotkey(),
            toggle_window_hotkey: default_toggle_window_hotkey(),
        }
    }
}

impl BroadcastSettings {
    /// `true` when the global hooks should be installed.
    pub fn wants_hooks(&self) -> bool {
        self.enabled && (self.keyboard_enabled || self.mouse_enabled)
    }

    /// The configured string for a hotkey slot.
    pub fn hotkey(&self, slot: HotkeySlot) -> &str {
        match slot {
            HotkeySlot::ToggleBroadcast => &self.toggle_broadcast_hotkey,
            HotkeySlot::ToggleMode => &self.toggle_mode_hotkey,
            HotkeySlot::ToggleWindow => &self.toggle_window_hotkey,
        }
    }

    /// Parses all three hotkey strings; unparseable or empty ones are `None`.
    ///
    /// An unknown key name allocates its error, so callers on the hook path
    /// should parse once per settings change and keep the result.
    pub fn chords(&self) -> [Option<HotkeyChord>; 3] {
        HotkeySlot::ALL.map(|slot| HotkeyChord::parse(self.hotkey(slot)).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_disabled_with_standard_hotkeys() {
        let s = BroadcastSettings::default();
        assert!(!s.enabled);
        assert!(s.broadcast_all && s.keyboard_enabled && s.mouse_enabled);
        assert_eq!(s.toggle_broadcast_hotkey, "Ctrl+Alt+B");
        assert_eq!(s.toggle_mode_hotkey, "Ctrl+Alt+M");
        assert_eq!(s.toggle_window_hotkey, "Ctrl+Alt+W");
    }

    #[test]
    fn test_wants_hooks_needs_enabled_and_an_input_kind() {
        let mut s = BroadcastSettings {
            enabled: true,
            ..Default::default()
        };
        assert!(s.wants_hooks());
        s.keyboard_enabled = false;
        assert!(s.wants_hooks());
        s.mouse_enabled = false;
        assert!(!s.wants_hooks());
        s.keyboard_enabled = true;
        s.enabled = false;
        assert!(!s.wants_hooks());
    }

    #[test]
    fn test_chords_skip_unparseable_entries() {
        let s = BroadcastSettings {
            toggle_mode_hotkey: "Ctrl+Alt".to_string(),
            toggle_window_hotkey: String::new(),
            ..Default::default()
        };
        let [broadcast, mode, window] = s.chords();
        assert_eq!(broadcast, HotkeyChord::parse("Ctrl+Alt+B").ok());
        assert_eq!(mode, None);
        assert_eq!(window, None);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let s: BroadcastSettings = toml::from_str("enabled = true").unwrap();
        assert!(s.enabled);
        assert_eq!(s.toggle_window_hotkey, "Ctrl+Alt+W");
        assert!(s.mouse_enabled);
    }

    #[test]
    fn test_null_handle() {
        assert!(WindowHandle::NULL.is_null());
        assert!(!WindowHandle(0x1234).is_null());
    }
}
