//! Key name to Windows Virtual Key (VK) code table.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//!
//! # Key names
//!
//! Hotkey strings in the config file name their primary key with the WPF
//! `System.Windows.Input.Key` names: letters (`A`–`Z`), digit-row keys
//! (`D0`–`D9`, or bare `0`–`9`), function keys (`F1`–`F24`), numpad keys
//! (`NumPad0`–`NumPad9`), named navigation / editing keys, the Windows, media
//! and browser keys, and the OEM keys under both their US-layout names
//! (`OemTilde`) and their numbered names (`Oem3`).  Several keys also accept
//! the Win32 spelling (`Return` for `Enter`, `Prior` for `PageUp`, ...).
//!
//! The first entry for a VK code in [`KEY_NAMES`] is its canonical name; it is
//! what [`vk_to_name`] returns and what chord formatting writes back out.

/// A Windows Virtual Key code.
///
/// VK codes range from 0x01 to 0xFE; 0x00 never names a key.
pub type VirtualKey = u8;

/// Every recognised key name paired with its VK code.
///
/// Canonical names come first for each VK; aliases follow.  Lookups are
/// ASCII case-insensitive.
const KEY_NAMES: &[(&str, VirtualKey)] = &[
    // ── Alphabet keys (VK_A=0x41 … VK_Z=0x5A) ────────────────────────────────
    ("A", 0x41),
    ("B", 0x42),
    ("C", 0x43),
    ("D", 0x44),
    ("E", 0x45),
    ("F", 0x46),
    ("G", 0x47),
    ("H", 0x48),
    ("I", 0x49),
    ("J", 0x4A),
    ("K", 0x4B),
    ("L", 0x4C),
    ("M", 0x4D),
    ("N", 0x4E),
    ("O", 0x4F),
    ("P", 0x50),
    ("Q", 0x51),
    ("R", 0x52),
    ("S", 0x53),
    ("T", 0x54),
    ("U", 0x55),
    ("V", 0x56),
    ("W", 0x57),
    ("X", 0x58),
    ("Y", 0x59),
    ("Z", 0x5A),
    // ── Digit row (VK_0=0x30 … VK_9=0x39) ───────────────────────────────────
    ("D0", 0x30),
    ("D1", 0x31),
    ("D2", 0x32),
    ("D3", 0x33),
    ("D4", 0x34),
    ("D5", 0x35),
    ("D6", 0x36),
    ("D7", 0x37),
    ("D8", 0x38),
    ("D9", 0x39),
    ("0", 0x30),
    ("1", 0x31),
    ("2", 0x32),
    ("3", 0x33),
    ("4", 0x34),
    ("5", 0x35),
    ("6", 0x36),
    ("7", 0x37),
    ("8", 0x38),
    ("9", 0x39),
    // ── Function keys (VK_F1=0x70 … VK_F24=0x87) ────────────────────────────
    ("F1", 0x70),
    ("F2", 0x71),
    ("F3", 0x72),
    ("F4", 0x73),
    ("F5", 0x74),
    ("F6", 0x75),
    ("F7", 0x76),
    ("F8", 0x77),
    ("F9", 0x78),
    ("F10", 0x79),
    ("F11", 0x7A),
    ("F12", 0x7B),
    ("F13", 0x7C),
    ("F14", 0x7D),
    ("F15", 0x7E),
    ("F16", 0x7F),
    ("F17", 0x80),
    ("F18", 0x81),
    ("F19", 0x82),
    ("F20", 0x83),
    ("F21", 0x84),
    ("F22", 0x85),
    ("F23", 0x86),
    ("F24", 0x87),
    // ── Numpad (VK_NUMPAD0=0x60 … VK_DIVIDE=0x6F) ──────────────────────────
    ("NumPad0", 0x60),
    ("NumPad1", 0x61),
    ("NumPad2", 0x62),
    ("NumPad3", 0x63),
    ("NumPad4", 0x64),
    ("NumPad5", 0x65),
    ("NumPad6", 0x66),
    ("NumPad7", 0x67),
    ("NumPad8", 0x68),
    ("NumPad9", 0x69),
    ("Multiply", 0x6A),
    ("Add", 0x6B),
    ("Separator", 0x6C),
    ("Subtract", 0x6D),
    ("Decimal", 0x6E),
    ("Divide", 0x6F),
    ("NumLock", 0x90),
    // ── Control keys ─────────────────────────────────────────────────────────
    ("Back", 0x08), // VK_BACK
    ("Backspace", 0x08),
    ("Tab", 0x09),
    ("Clear", 0x0C),
    ("Enter", 0x0D), // VK_RETURN
    ("Return", 0x0D),
    ("Pause", 0x13),
    ("CapsLock", 0x14), // VK_CAPITAL
    ("Capital", 0x14),
    ("Escape", 0x1B),
    ("Esc", 0x1B),
    ("Space", 0x20),
    ("PageUp", 0x21), // VK_PRIOR
    ("Prior", 0x21),
    ("PageDown", 0x22), // VK_NEXT
    ("Next", 0x22),
    ("End", 0x23),
    ("Home", 0x24),
    ("Left", 0x25),
    ("Up", 0x26),
    ("Right", 0x27),
    ("Down", 0x28),
    ("PrintScreen", 0x2C), // VK_SNAPSHOT
    ("Snapshot", 0x2C),
    ("Insert", 0x2D),
    ("Delete", 0x2E),
    ("Del", 0x2E),
    ("LWin", 0x5B),
    ("RWin", 0x5C),
    ("Apps", 0x5D),
    ("Sleep", 0x5F),
    ("Scroll", 0x91), // VK_SCROLL
    ("ScrollLock", 0x91),
    ("LeftShift", 0xA0), // VK_LSHIFT
    ("RightShift", 0xA1),
    ("LeftCtrl", 0xA2),
    ("RightCtrl", 0xA3),
    ("LeftAlt", 0xA4),
    ("RightAlt", 0xA5),
    // ── Browser, volume, media and launch keys (0xA6 … 0xB7) ────────────────
    ("BrowserBack", 0xA6),
    ("BrowserForward", 0xA7),
    ("BrowserRefresh", 0xA8),
    ("BrowserStop", 0xA9),
    ("BrowserSearch", 0xAA),
    ("BrowserFavorites", 0xAB),
    ("BrowserHome", 0xAC),
    ("VolumeMute", 0xAD),
    ("VolumeDown", 0xAE),
    ("VolumeUp", 0xAF),
    ("MediaNextTrack", 0xB0),
    ("MediaPreviousTrack", 0xB1),
    ("MediaStop", 0xB2),
    ("MediaPlayPause", 0xB3),
    ("LaunchMail", 0xB4),
    ("SelectMedia", 0xB5),
    ("LaunchApplication1", 0xB6),
    ("LaunchApplication2", 0xB7),
    // ── OEM punctuation (US layout positions) ────────────────────────────────
    ("OemSemicolon", 0xBA),
    ("OemPlus", 0xBB),
    ("OemComma", 0xBC),
    ("OemMinus", 0xBD),
    ("OemPeriod", 0xBE),
    ("OemQuestion", 0xBF),
    ("OemTilde", 0xC0),
    ("OemOpenBrackets", 0xDB),
    ("OemPipe", 0xDC),
    ("OemCloseBrackets", 0xDD),
    ("OemQuotes", 0xDE),
    ("Oem8", 0xDF),
    ("OemBackslash", 0xE2), // VK_OEM_102
    ("OemClear", 0xFE),
    // Numbered OEM names, VK_OEM_1 … VK_OEM_102.
    ("Oem1", 0xBA),
    ("Oem2", 0xBF),
    ("Oem3", 0xC0),
    ("Oem4", 0xDB),
    ("Oem5", 0xDC),
    ("Oem6", 0xDD),
    ("Oem7", 0xDE),
    ("Oem102", 0xE2),
];

/// Resolves a key name to its VK code, ignoring ASCII case.
///
/// Returns `None` when the name is not in the table.  Does not allocate, so it
/// is safe to call from a hook callback.
pub fn name_to_vk(name: &str) -> Option<VirtualKey> {
    KEY_NAMES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|&(_, vk)| vk)
}

/// Returns the canonical name for a VK code, or `None` for codes without one.
pub fn vk_to_name(vk: VirtualKey) -> Option<&'static str> {
    KEY_NAMES
        .iter()
        .find(|&&(_, candidate)| candidate == vk)
        .map(|&(name, _)| name)
}
