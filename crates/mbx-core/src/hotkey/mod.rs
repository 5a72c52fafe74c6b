//! Hotkey chord parsing, formatting and matching.
//!
//! A chord is a set of modifiers plus exactly one primary key, written in the
//! config file as `Modifier+Modifier+...+Key`:
//!
//! ```text
//! Ctrl+Alt+B        Control+Shift+F5        win + numpad1
//! ```
//!
//! Modifier tokens are `Ctrl`/`Control`, `Alt`, `Shift` and `Win`/`Windows`
//! (case-insensitive).  Every other token must be a key name known to
//! [`crate::keymap`].  Segments are whitespace-trimmed and empty segments are
//! ignored, so `"Ctrl++B"` parses the same as `"Ctrl+B"`.
//!
//! # Last key token wins
//!
//! When a string names more than one non-modifier key (`"Ctrl+A+B"`), the
//! last one is kept and the earlier ones are discarded.  Config files written
//! by older launcher builds rely on this, so it is kept as-is rather than
//! rejected.
//!
//! # Matching against live state
//!
//! The broadcast hook consults [`is_suppressed`] on every physical key event
//! so that the keypress completing a registered hotkey is not also mirrored
//! into the target windows.  Parsing and matching never allocate on the
//! success path.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::keymap::{self, vk, KeyState, VirtualKey};

/// Errors produced when a hotkey string cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HotkeyError {
    /// The string is empty or contains only whitespace and `+` separators.
    #[error("hotkey string is empty")]
    Empty,

    /// The string contains only modifiers.
    #[error("hotkey '{0}' has no key, only modifiers")]
    MissingKey(String),

    /// A non-modifier token is not a recognised key name.
    #[error("unknown key '{0}' in hotkey")]
    UnknownKey(String),
}

/// Modifier set of a chord, using the `RegisterHotKey` `MOD_*` bit layout so
/// the raw bits can be handed to the OS unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const ALT: Modifiers = Modifiers(0x0001);
    pub const CTRL: Modifiers = Modifiers(0x0002);
    pub const SHIFT: Modifiers = Modifiers(0x0004);
    pub const WIN: Modifiers = Modifiers(0x0008);

    /// Formatting order.  Parsing accepts any order.
    const CANONICAL: [(Modifiers, &'static str); 4] = [
        (Modifiers::CTRL, "Ctrl"),
        (Modifiers::ALT, "Alt"),
        (Modifiers::SHIFT, "Shift"),
        (Modifiers::WIN, "Win"),
    ];

    /// Raw `MOD_*` bits.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every modifier in `other` is also in `self`.
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Samples which modifiers are physically held right now.
    ///
    /// Win counts as held when either the left or right Windows key is down.
    pub fn held(state: &dyn KeyState) -> Modifiers {
        let mut held = Modifiers::NONE;
        if state.is_down(vk::CONTROL) {
            held |= Modifiers::CTRL;
        }
        if state.is_down(vk::MENU) {
            held |= Modifiers::ALT;
        }
        if state.is_down(vk::SHIFT) {
            held |= Modifiers::SHIFT;
        }
        if state.is_down(vk::LWIN) || state.is_down(vk::RWIN) {
            held |= Modifiers::WIN;
        }
        held
    }

    fn from_token(token: &str) -> Option<Modifiers> {
        const TOKENS: [(&str, Modifiers); 6] = [
            ("Ctrl", Modifiers::CTRL),
            ("Control", Modifiers::CTRL),
            ("Alt", Modifiers::ALT),
            ("Shift", Modifiers::SHIFT),
            ("Win", Modifiers::WIN),
            ("Windows", Modifiers::WIN),
        ];
        TOKENS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|&(_, m)| m)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

/// A parsed hotkey: modifier set plus one primary key.
///
/// Immutable once built.  Two chords are equal iff both the modifier set and
/// the key code match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyChord {
    modifiers: Modifiers,
    key: VirtualKey,
}

impl HotkeyChord {
    pub fn new(modifiers: Modifiers, key: VirtualKey) -> Self {
        Self { modifiers, key }
    }

    /// Parses a `Modifier+...+Key` string.
    ///
    /// # Errors
    ///
    /// - [`HotkeyError::Empty`] when no tokens remain after trimming.
    /// - [`HotkeyError::UnknownKey`] when a non-modifier token is not a key name.
    /// - [`HotkeyError::MissingKey`] when only modifiers are present.
    pub fn parse(text: &str) -> Result<Self, HotkeyError> {
        let mut modifiers = Modifiers::NONE;
        let mut key: Option<VirtualKey> = None;
        let mut saw_token = false;

        for token in text.split('+').map(str::trim).filter(|t| !t.is_empty()) {
            saw_token = true;
            if let Some(m) = Modifiers::from_token(token) {
                modifiers |= m;
                continue;
            }
            match keymap::name_to_vk(token) {
                // Last key token wins; see module docs.
                Some(vk) => key = Some(vk),
                None => return Err(HotkeyError::UnknownKey(token.to_string())),
            }
        }

        if !saw_token {
            return Err(HotkeyError::Empty);
        }
        key.map(|key| Self { modifiers, key })
            .ok_or_else(|| HotkeyError::MissingKey(text.trim().to_string()))
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn key(&self) -> VirtualKey {
        self.key
    }

    /// Returns `true` iff `physical_vk` is this chord's key and every modifier
    /// of the chord is held.  Extra held modifiers are ignored.
    pub fn matches(&self, physical_vk: VirtualKey, held: Modifiers) -> bool {
        self.key == physical_vk && held.contains(self.modifiers)
    }
}

impl FromStr for HotkeyChord {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical form: modifiers in `Ctrl+Alt+Shift+Win` order, then the key's
/// canonical name.
impl fmt::Display for HotkeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in Modifiers::CANONICAL {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match keymap::vk_to_name(self.key) {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02X}", self.key),
        }
    }
}

/// Returns `true` iff any of `chords` matches the physical key with the
/// currently held modifiers.
///
/// Used to keep the keypress that completes a hotkey from being mirrored.
pub fn is_suppressed<'a, I>(chords: I, physical_vk: VirtualKey, held: Modifiers) -> bool
where
    I: IntoIterator<Item = &'a HotkeyChord>,
{
    chords.into_iter().any(|chord| chord.matches(physical_vk, held))
}

/// The three hotkeys a broadcast session registers with the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeySlot {
    ToggleBroadcast,
    ToggleMode,
    ToggleWindow,
}

impl HotkeySlot {
    pub const ALL: [HotkeySlot; 3] = [
        HotkeySlot::ToggleBroadcast,
        HotkeySlot::ToggleMode,
        HotkeySlot::ToggleWindow,
    ];

    /// Registration id passed to `RegisterHotKey` and echoed in `WM_HOTKEY`.
    pub fn id(self) -> i32 {
        match self {
            HotkeySlot::ToggleBroadcast => 0xB001,
            HotkeySlot::ToggleMode => 0xB002,
            HotkeySlot::ToggleWindow => 0xB003,
        }
    }

    /// Inverse of [`HotkeySlot::id`].
    pub fn from_id(id: i32) -> Option<HotkeySlot> {
        Self::ALL.into_iter().find(|slot| slot.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::HeldKeys;

    fn chord(text: &str) -> HotkeyChord {
        HotkeyChord::parse(text).expect("chord must parse")
    }

    // ── parse ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_ctrl_alt_b() {
        let c = chord("Ctrl+Alt+B");
        assert_eq!(c.modifiers(), Modifiers::CTRL | Modifiers::ALT);
        assert_eq!(c.key(), 0x42);
    }

    #[test]
    fn test_parse_is_order_and_case_insensitive() {
        assert_eq!(chord("ctrl+alt+b"), chord("Alt+Ctrl+B"));
        assert_eq!(chord("CONTROL+windows+f5"), chord("Win+Ctrl+F5"));
    }

    #[test]
    fn test_parse_trims_whitespace_and_skips_empty_segments() {
        assert_eq!(chord("  Ctrl + + Shift +  M "), chord("Ctrl+Shift+M"));
    }

    #[test]
    fn test_parse_key_without_modifiers() {
        let c = chord("F9");
        assert!(c.modifiers().is_empty());
        assert_eq!(c.key(), 0x78);
    }

    #[test]
    fn test_parse_empty_fails() {
        assert_eq!(HotkeyChord::parse(""), Err(HotkeyError::Empty));
        assert_eq!(HotkeyChord::parse("   "), Err(HotkeyError::Empty));
        assert_eq!(HotkeyChord::parse(" + + "), Err(HotkeyError::Empty));
    }

    #[test]
    fn test_parse_modifiers_only_fails() {
        assert!(matches!(
            HotkeyChord::parse("Ctrl+Alt"),
            Err(HotkeyError::MissingKey(_))
        ));
    }

    #[test]
    fn test_parse_unknown_token_fails_whole_chord() {
        assert_eq!(
            HotkeyChord::parse("Ctrl+Hyper+B"),
            Err(HotkeyError::UnknownKey("Hyper".to_string()))
        );
    }

    #[test]
    fn test_parse_numbered_oem_and_system_keys() {
        assert_eq!(chord("Ctrl+Oem3"), chord("Ctrl+OemTilde"));
        assert_eq!(chord("Ctrl+OemBackslash").key(), 0xE2);
        assert_eq!(chord("Ctrl+Alt+LWin").key(), 0x5B);
        assert_eq!(chord("Ctrl+Sleep").to_string(), "Ctrl+Sleep");
        assert_eq!(chord("Shift+Oem1").to_string(), "Shift+OemSemicolon");
    }

    #[test]
    fn test_parse_last_key_token_wins() {
        // Documented quirk: multiple keys are not an error, the last one is kept.
        let c = chord("Ctrl+A+B");
        assert_eq!(c, chord("Ctrl+B"));
    }

    // ── format ────────────────────────────────────────────────────────────────

    #[test]
    fn test_format_uses_canonical_modifier_order() {
        assert_eq!(chord("shift+win+alt+ctrl+x").to_string(), "Ctrl+Alt+Shift+Win+X");
    }

    #[test]
    fn test_format_normalizes_equivalent_chords() {
        assert_eq!(chord("ctrl+alt+b").to_string(), chord("Alt+Ctrl+B").to_string());
        assert_eq!(chord("Control+Return").to_string(), "Ctrl+Enter");
    }

    #[test]
    fn test_format_then_parse_is_identity() {
        for text in ["Ctrl+Alt+B", "Shift+F12", "Win+NumPad3", "Alt+OemTilde"] {
            let c = chord(text);
            assert_eq!(chord(&c.to_string()), c);
        }
    }

    // ── matches / is_suppressed ───────────────────────────────────────────────

    #[test]
    fn test_matches_requires_key_and_all_modifiers() {
        let c = chord("Ctrl+Alt+B");
        assert!(c.matches(0x42, Modifiers::CTRL | Modifiers::ALT));
        assert!(!c.matches(0x42, Modifiers::CTRL));
        assert!(!c.matches(0x43, Modifiers::CTRL | Modifiers::ALT));
    }

    #[test]
    fn test_matches_ignores_extra_held_modifiers() {
        let c = chord("Ctrl+B");
        assert!(c.matches(0x42, Modifiers::CTRL | Modifiers::SHIFT | Modifiers::WIN));
    }

    #[test]
    fn test_held_reads_either_win_key() {
        let held = Modifiers::held(&HeldKeys::new(&[vk::RWIN, vk::CONTROL]));
        assert_eq!(held, Modifiers::WIN | Modifiers::CTRL);
    }

    #[test]
    fn test_is_suppressed_true_only_while_chord_is_complete() {
        let chords = [chord("Ctrl+Alt+B"), chord("Ctrl+Alt+M")];
        let all_down = Modifiers::held(&HeldKeys::new(&[vk::CONTROL, vk::MENU]));
        let alt_released = Modifiers::held(&HeldKeys::new(&[vk::CONTROL]));

        assert!(is_suppressed(&chords, 0x4D, all_down));
        assert!(!is_suppressed(&chords, 0x4D, alt_released));
        assert!(!is_suppressed(&chords, 0x41, all_down));
    }

    #[test]
    fn test_is_suppressed_with_no_chords_is_false() {
        assert!(!is_suppressed(&[], 0x42, Modifiers::CTRL));
    }

    // ── HotkeySlot ────────────────────────────────────────────────────────────

    #[test]
    fn test_slot_ids_round_trip() {
        for slot in HotkeySlot::ALL {
            assert_eq!(HotkeySlot::from_id(slot.id()), Some(slot));
        }
        assert_eq!(HotkeySlot::from_id(1), None);
    }
}
