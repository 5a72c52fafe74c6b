//! Raw input events and window-message encoding.
//!
//! Low-level hook callbacks hand over a message id plus a small payload
//! struct (`KBDLLHOOKSTRUCT` / `MSLLHOOKSTRUCT`).  This module decodes those
//! payloads into [`RawInputEvent`]s and re-encodes them as the
//! `(message, wParam, lParam)` triples that a target window's message queue
//! expects.  It performs no OS calls; live key state is supplied through
//! [`crate::keymap::KeyState`].

pub mod translate;

use crate::domain::geometry::Point;
use crate::keymap::VirtualKey;

/// Window message ids used by the broadcast engine (winuser.h).
pub mod msg {
    pub const WM_KEYDOWN: u32 = 0x0100;
    pub const WM_KEYUP: u32 = 0x0101;
    pub const WM_SYSKEYDOWN: u32 = 0x0104;
    pub const WM_SYSKEYUP: u32 = 0x0105;
    pub const WM_HOTKEY: u32 = 0x0312;
    pub const WM_MOUSEMOVE: u32 = 0x0200;
    pub const WM_LBUTTONDOWN: u32 = 0x0201;
    pub const WM_LBUTTONUP: u32 = 0x0202;
    pub const WM_RBUTTONDOWN: u32 = 0x0204;
    pub const WM_RBUTTONUP: u32 = 0x0205;
    pub const WM_MBUTTONDOWN: u32 = 0x0207;
    pub const WM_MBUTTONUP: u32 = 0x0208;
    pub const WM_MOUSEWHEEL: u32 = 0x020A;
    pub const WM_MOUSEHWHEEL: u32 = 0x020E;
}

/// `KBDLLHOOKSTRUCT.flags` bit: extended key (right-hand Ctrl/Alt, arrows, ...).
pub const LLKHF_EXTENDED: u32 = 0x01;

/// A keyboard event as delivered to the low-level keyboard hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub virtual_key: VirtualKey,
    pub scan_code: u32,
    /// Raw `KBDLLHOOKSTRUCT.flags`.
    pub flags: u32,
    pub is_key_up: bool,
    /// `WM_SYSKEY*` variant (key pressed while Alt is held, or F10).
    pub is_system_key: bool,
}

impl KeyEvent {
    /// Decodes a keyboard hook payload.
    ///
    /// Returns `None` for messages other than key-down/up and their system
    /// variants.
    pub fn from_hook(message: u32, vk_code: u32, scan_code: u32, flags: u32) -> Option<Self> {
        if !translate::is_qualifying_key_message(message) {
            return None;
        }
        Some(Self {
            virtual_key: vk_code as VirtualKey,
            scan_code,
            flags,
            is_key_up: matches!(message, msg::WM_KEYUP | msg::WM_SYSKEYUP),
            is_system_key: matches!(message, msg::WM_SYSKEYDOWN | msg::WM_SYSKEYUP),
        })
    }

    /// The message id this event was delivered as.
    pub fn message(&self) -> u32 {
        match (self.is_system_key, self.is_key_up) {
            (false, false) => msg::WM_KEYDOWN,
            (false, true) => msg::WM_KEYUP,
            (true, false) => msg::WM_SYSKEYDOWN,
            (true, true) => msg::WM_SYSKEYUP,
        }
    }
}

/// A mouse event as delivered to the low-level mouse hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Cursor position in screen coordinates.
    pub screen_point: Point,
    pub message: u32,
    /// Raw `MSLLHOOKSTRUCT.mouseData`; the high word carries the wheel delta.
    pub mouse_data: u32,
}

impl MouseEvent {
    /// Decodes a mouse hook payload.
    ///
    /// Returns `None` for messages the engine does not mirror (X buttons,
    /// double-clicks, non-client messages).
    pub fn from_hook(message: u32, x: i32, y: i32, mouse_data: u32) -> Option<Self> {
        translate::is_qualifying_mouse_message(message).then_some(Self {
            screen_point: Point::new(x, y),
            message,
            mouse_data,
        })
    }
}

/// One captured event, living only for the duration of a hook callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

/// A fully encoded message ready for `PostMessageW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageParams {
    pub message: u32,
    pub wparam: usize,
    pub lparam: isize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_from_hook_decodes_direction_and_system_bit() {
        let ev = KeyEvent::from_hook(msg::WM_SYSKEYUP, 0x42, 0x30, 0x81).unwrap();
        assert_eq!(ev.virtual_key, 0x42);
        assert!(ev.is_key_up);
        assert!(ev.is_system_key);
        assert_eq!(ev.message(), msg::WM_SYSKEYUP);
    }

    #[test]
    fn test_key_event_from_hook_rejects_other_messages() {
        assert!(KeyEvent::from_hook(msg::WM_HOTKEY, 0x42, 0, 0).is_none());
        assert!(KeyEvent::from_hook(0x0102, 0x42, 0, 0).is_none()); // WM_CHAR
    }

    #[test]
    fn test_mouse_event_from_hook_filters_messages() {
        assert!(MouseEvent::from_hook(msg::WM_MOUSEMOVE, 1, 2, 0).is_some());
        assert!(MouseEvent::from_hook(0x020B, 1, 2, 0).is_none()); // WM_XBUTTONDOWN
    }
}
