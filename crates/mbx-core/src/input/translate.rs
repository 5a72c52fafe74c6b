//! Bit-level encoding of mirrored keyboard and mouse messages.
//!
//! # Keyboard lParam
//!
//! ```text
//! bits  0-15  repeat count (always 1)
//! bits 16-23  scan code
//! bit     24  extended key (copied from LLKHF_EXTENDED)
//! bit     31  transition state (1 = key up)
//! ```
//!
//! Bits 29 and 30 are left clear; the raw hook flags are re-encoded, not
//! reinterpreted.
//!
//! # Mouse wParam
//!
//! The low word is the `MK_*` button/modifier mask sampled at dispatch time.
//! Wheel messages additionally carry the signed 16-bit delta in the high word.
//! Sampling live rather than copying from the source event matters: by the
//! time an event is mirrored the user may already have released a button.

use super::{msg, KeyEvent, MessageParams, MouseEvent, LLKHF_EXTENDED};
use crate::domain::geometry::Point;
use crate::keymap::{vk, KeyState};

pub const MK_LBUTTON: u16 = 0x0001;
pub const MK_RBUTTON: u16 = 0x0002;
pub const MK_SHIFT: u16 = 0x0004;
pub const MK_CONTROL: u16 = 0x0008;
pub const MK_MBUTTON: u16 = 0x0010;
pub const MK_XBUTTON1: u16 = 0x0020;
pub const MK_XBUTTON2: u16 = 0x0040;

/// `true` for key-down, key-up and their system (Alt-chord) variants.
pub fn is_qualifying_key_message(message: u32) -> bool {
    matches!(
        message,
        msg::WM_KEYDOWN | msg::WM_KEYUP | msg::WM_SYSKEYDOWN | msg::WM_SYSKEYUP
    )
}

/// `true` for move, left/right/middle button down/up and both wheels.
pub fn is_qualifying_mouse_message(message: u32) -> bool {
    matches!(
        message,
        msg::WM_MOUSEMOVE
            | msg::WM_LBUTTONDOWN
            | msg::WM_LBUTTONUP
            | msg::WM_RBUTTONDOWN
            | msg::WM_RBUTTONUP
            | msg::WM_MBUTTONDOWN
            | msg::WM_MBUTTONUP
            | msg::WM_MOUSEWHEEL
            | msg::WM_MOUSEHWHEEL
    )
}

/// Builds the `WM_KEY*` lParam for a mirrored keystroke.
pub fn build_key_lparam(scan_code: u32, flags: u32, is_key_up: bool) -> isize {
    let mut lparam: u32 = 1;
    lparam |= (scan_code & 0xFF) << 16;
    if flags & LLKHF_EXTENDED != 0 {
        lparam |= 1 << 24;
    }
    if is_key_up {
        lparam |= 1 << 31;
    }
    // Sign-extend like a 32-bit LPARAM widened to pointer size.
    lparam as i32 as isize
}

/// Full dispatch parameters for a keystroke: same message id, VK in wParam.
pub fn build_key_dispatch_params(event: &KeyEvent) -> MessageParams {
    MessageParams {
        message: event.message(),
        wparam: usize::from(event.virtual_key),
        lparam: build_key_lparam(event.scan_code, event.flags, event.is_key_up),
    }
}

/// Samples the `MK_*` mask from live key state.
pub fn mouse_key_state(state: &dyn KeyState) -> u16 {
    const BITS: [(u8, u16); 7] = [
        (vk::LBUTTON, MK_LBUTTON),
        (vk::RBUTTON, MK_RBUTTON),
        (vk::MBUTTON, MK_MBUTTON),
        (vk::XBUTTON1, MK_XBUTTON1),
        (vk::XBUTTON2, MK_XBUTTON2),
        (vk::SHIFT, MK_SHIFT),
        (vk::CONTROL, MK_CONTROL),
    ];
    BITS.iter()
        .filter(|(key, _)| state.is_down(*key))
        .fold(0, |mask, (_, bit)| mask | bit)
}

/// Builds the mouse wParam from the raw `mouseData` and a live `MK_*` mask.
pub fn build_mouse_wparam(message: u32, mouse_data: u32, key_state: u16) -> usize {
    if matches!(message, msg::WM_MOUSEWHEEL | msg::WM_MOUSEHWHEEL) {
        let delta = (mouse_data >> 16) as u16 as i16;
        let packed = (i32::from(delta) << 16) | i32::from(key_state);
        return packed as isize as usize;
    }
    usize::from(key_state)
}

/// Packs a client point into a mouse-message lParam (`y` high, `x` low).
pub fn pack_point_lparam(p: Point) -> isize {
    ((p.y << 16) | (p.x & 0xFFFF)) as isize
}

/// Full dispatch parameters for a mouse event at `client` in the target.
pub fn build_mouse_dispatch_params(event: &MouseEvent, client: Point, key_state: u16) -> MessageParams {
    MessageParams {
        message: event.message,
        wparam: build_mouse_wparam(event.message, event.mouse_data, key_state),
        lparam: pack_point_lparam(client),
    }
}
