//! Key code tables.
//!
//! Hotkey chords name their primary key by text; the OS speaks Windows
//! Virtual Key codes.  This module owns the translation between the two, plus
//! the modifier and mouse-button VK constants that live key-state queries use.

pub mod windows_vk;

pub use windows_vk::{name_to_vk, vk_to_name, VirtualKey};

/// VK codes used to sample live modifier and button state.
pub mod vk {
    use super::VirtualKey;

    pub const LBUTTON: VirtualKey = 0x01;
    pub const RBUTTON: VirtualKey = 0x02;
    pub const MBUTTON: VirtualKey = 0x04;
    pub const XBUTTON1: VirtualKey = 0x05;
    pub const XBUTTON2: VirtualKey = 0x06;
    pub const SHIFT: VirtualKey = 0x10;
    pub const CONTROL: VirtualKey = 0x11;
    /// Alt.
    pub const MENU: VirtualKey = 0x12;
    pub const LWIN: VirtualKey = 0x5B;
    pub const RWIN: VirtualKey = 0x5C;
}

/// Read-only view of the physical key state at the moment of the call.
///
/// The Windows implementation wraps `GetAsyncKeyState`; tests use a fixed set
/// of held keys.
pub trait KeyState {
    /// Returns `true` if the key (or mouse button) identified by `vk` is down.
    fn is_down(&self, vk: VirtualKey) -> bool;
}

/// A [`KeyState`] backed by an explicit list of held keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys(pub Vec<VirtualKey>);

impl HeldKeys {
    pub fn new(keys: &[VirtualKey]) -> Self {
        Self(keys.to_vec())
    }
}

impl KeyState for HeldKeys {
    fn is_down(&self, vk: VirtualKey) -> bool {
        self.0.contains(&vk)
    }
}
