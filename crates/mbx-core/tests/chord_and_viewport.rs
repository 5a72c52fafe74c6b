//! Integration tests for the mbx-core public API.
//!
//! These exercise the hotkey codec, the geometry helpers and the message
//! translator together the way the broadcast hook uses them.

use mbx_core::{
    client_to_normalized, compute_classic_viewport, input::msg, input::translate,
    keymap::{vk, HeldKeys},
    normalized_to_client, BroadcastSettings, HotkeyChord, HotkeyError, KeyEvent, Modifiers,
    MouseEvent, Point,
};

#[test]
fn test_equivalent_chord_strings_format_identically() {
    let pairs = [
        ("ctrl+alt+b", "Alt+Ctrl+B"),
        ("Control + Shift + f5", "shift+ctrl+F5"),
        ("windows+return", "Win+Enter"),
    ];
    for (a, b) in pairs {
        let a = HotkeyChord::parse(a).expect("valid chord");
        let b = HotkeyChord::parse(b).expect("valid chord");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }
}

#[test]
fn test_invalid_chords_are_rejected() {
    assert_eq!(HotkeyChord::parse(""), Err(HotkeyError::Empty));
    assert!(matches!(
        HotkeyChord::parse("Ctrl+Alt"),
        Err(HotkeyError::MissingKey(_))
    ));
    assert!(matches!(
        HotkeyChord::parse("Ctrl+Alt+NotAKey"),
        Err(HotkeyError::UnknownKey(_))
    ));
}

#[test]
fn test_default_settings_suppress_their_own_hotkey_keystroke() {
    let settings = BroadcastSettings::default();
    let chords = settings.chords();
    let held = Modifiers::held(&HeldKeys::new(&[vk::CONTROL, vk::MENU]));

    // Ctrl+Alt+B is the default toggle-broadcast hotkey.
    assert!(mbx_core::is_suppressed(chords.iter().flatten(), 0x42, held));

    // Releasing Alt means B is an ordinary keystroke again.
    let ctrl_only = Modifiers::held(&HeldKeys::new(&[vk::CONTROL]));
    assert!(!mbx_core::is_suppressed(chords.iter().flatten(), 0x42, ctrl_only));
}

#[test]
fn test_viewport_examples() {
    let full = compute_classic_viewport(800, 600).unwrap();
    assert_eq!((full.left, full.top, full.width, full.height), (0, 0, 800, 600));

    let wide = compute_classic_viewport(1920, 1080).unwrap();
    assert_eq!((wide.left, wide.top, wide.width, wide.height), (240, 0, 1440, 1080));
}

#[test]
fn test_mouse_position_maps_between_differently_sized_classic_windows() {
    // Source: 1920x1080 classic (viewport 1440x1080 at x=240).
    // Target: 1024x768 classic (exact 4:3, viewport is the full client).
    let source_click = Point::new(240 + 720, 270);
    let n = client_to_normalized(source_click, 1920, 1080, true).unwrap();
    let target = normalized_to_client(n, 1024, 768, true).unwrap();
    assert_eq!(target, Point::new(512, 192));
}

#[test]
fn test_translated_messages_for_a_key_and_a_wheel_event() {
    let key = KeyEvent::from_hook(msg::WM_KEYUP, 0x41, 0x1E, 0).unwrap();
    let params = translate::build_key_dispatch_params(&key);
    assert_eq!(params.message, msg::WM_KEYUP);
    assert_eq!(params.wparam, 0x41);
    assert_eq!(params.lparam as u32, 0x801E_0001);

    let wheel = MouseEvent::from_hook(msg::WM_MOUSEWHEEL, 100, 100, 120 << 16).unwrap();
    let state = translate::mouse_key_state(&HeldKeys::new(&[vk::SHIFT]));
    let params = translate::build_mouse_dispatch_params(&wheel, Point::new(10, 20), state);
    assert_eq!(params.wparam, (120 << 16) | usize::from(translate::MK_SHIFT));
    assert_eq!(params.lparam, (20 << 16) | 10);
}
