//! BroadcastDispatcher: mirrors one physical input event into every target.
//!
//! The dispatcher is invoked synchronously from inside the low-level hook
//! callbacks, so everything here runs under the OS hook time budget:
//!
//! 1. Gate on the settings snapshot (master switch, input kind) and on
//!    "is the foreground window one of ours".
//! 2. Keyboard only: drop keystrokes that complete a configured hotkey.
//! 3. Pull a fresh target list and skip the foreground window itself.
//! 4. Translate the event per target (mouse positions are remapped through
//!    the normalized classic-viewport space) and post it.
//!
//! Per-target failures are counted and skipped; nothing is retried or
//! queued.
//!
//! # Architecture
//!
//! Like the other use cases this depends only on traits:
//! [`EnvironmentSource`] hands out one [`BroadcastEnvironment`] snapshot per
//! event (settings, pre-parsed hotkey chords, targets), and [`InputPlatform`]
//! wraps the handful of OS calls needed per event.  The
//! Windows implementation lives in `infrastructure::platform::windows`; tests
//! use `infrastructure::platform::mock::MockPlatform`.

use std::sync::Arc;

use mbx_core::{
    client_to_normalized, input::translate, is_suppressed, keymap::KeyState, normalized_to_client,
    BroadcastSettings, HotkeyChord, KeyEvent, MessageParams, Modifiers, MouseEvent, NormalizedPoint, Point,
    RawInputEvent, TargetWindow, VirtualKey, WindowHandle,
};
use thiserror::Error;
use tracing::trace;

/// Error returned by [`InputPlatform`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The window handle no longer refers to a live window.
    #[error("window {0:#x} no longer exists")]
    InvalidWindow(isize),

    /// The OS refused to queue the message.
    #[error("posting to window {window:#x} failed: {reason}")]
    PostFailed { window: isize, reason: String },
}

/// Settings and target lookups for one event.
///
/// Every method is called from the hook callback and must be synchronous,
/// side-effect free and quick.
pub trait BroadcastEnvironment: Send + Sync {
    /// The settings this snapshot was taken from.
    fn settings(&self) -> Arc<BroadcastSettings>;

    /// The three hotkey chords of [`settings`](Self::settings), parsed.
    ///
    /// The default re-parses the strings on every call; snapshots published
    /// once and read many times should parse at publish time instead.
    fn hotkey_chords(&self) -> [Option<HotkeyChord>; 3] {
        self.settings().chords()
    }

    /// The live target list, in dispatch order.  May be empty.
    fn targets(&self) -> Vec<TargetWindow>;

    /// Whether the current foreground window is one input should be mirrored
    /// from.
    fn is_foreground_target_class(&self) -> bool;

    /// Whether `window` renders into a letterboxed 4:3 viewport.
    fn is_classic_mode(&self, window: WindowHandle) -> bool;
}

/// Hands out one consistent [`BroadcastEnvironment`] per event.
///
/// The dispatcher calls [`snapshot`](Self::snapshot) exactly once per hook
/// event, so a writer swapping settings mid-event is never observed half-way.
pub trait EnvironmentSource: Send + Sync {
    fn snapshot(&self) -> Arc<dyn BroadcastEnvironment>;
}

/// Per-event OS operations.
pub trait InputPlatform: Send + Sync {
    /// The window that currently has keyboard focus, or [`WindowHandle::NULL`].
    fn foreground_window(&self) -> WindowHandle;

    /// Converts a screen point into `window`'s client coordinates.
    fn screen_to_client(&self, window: WindowHandle, screen: Point) -> Option<Point>;

    /// Client area size of `window`, or `None` if it cannot be queried.
    fn client_size(&self, window: WindowHandle) -> Option<(i32, i32)>;

    /// Live physical state of a key or mouse button.
    fn is_key_down(&self, vk: VirtualKey) -> bool;

    /// Queues `params` on `window`'s message queue without waiting.
    fn post_message(&self, window: WindowHandle, params: MessageParams) -> Result<(), PlatformError>;
}

/// Adapts an [`InputPlatform`] to the [`KeyState`] seam used by mbx-core.
struct LiveKeys<'a>(&'a dyn InputPlatform);

impl KeyState for LiveKeys<'_> {
    fn is_down(&self, vk: VirtualKey) -> bool {
        self.0.is_key_down(vk)
    }
}

/// What happened to one physical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Broadcast is off, the input kind is off, or the foreground window is
    /// not a target.
    Disabled,
    /// The keystroke completes a configured hotkey and was not mirrored.
    Suppressed,
    /// The event was offered to the target list.
    ///
    /// `skipped` counts targets dropped because of geometry or posting
    /// failures; the foreground window and null handles are not counted.
    Dispatched { posted: usize, skipped: usize },
}

impl DispatchOutcome {
    /// Number of messages actually posted.
    pub fn posted(&self) -> usize {
        match self {
            DispatchOutcome::Dispatched { posted, .. } => *posted,
            _ => 0,
        }
    }
}

#[derive(Default)]
struct Tally {
    posted: usize,
    skipped: usize,
}

impl From<Tally> for DispatchOutcome {
    fn from(t: Tally) -> Self {
        DispatchOutcome::Dispatched {
            posted: t.posted,
            skipped: t.skipped,
        }
    }
}

/// Mirrors physical input events into the current target windows.
pub struct BroadcastDispatcher {
    environment: Arc<dyn EnvironmentSource>,
    platform: Arc<dyn InputPlatform>,
}

impl BroadcastDispatcher {
    pub fn new(environment: Arc<dyn EnvironmentSource>, platform: Arc<dyn InputPlatform>) -> Self {
        Self {
            environment,
            platform,
        }
    }

    /// Dispatches either kind of event.
    pub fn handle(&self, event: &RawInputEvent) -> DispatchOutcome {
        match event {
            RawInputEvent::Key(key) => self.handle_key(key),
            RawInputEvent::Mouse(mouse) => self.handle_mouse(mouse),
        }
    }

    /// Mirrors a key-down/up event.  Key parameters are sent unmodified to
    /// every target.
    pub fn handle_key(&self, event: &KeyEvent) -> DispatchOutcome {
        let env = self.environment.snapshot();
        let settings = env.settings();
        if !(settings.enabled && settings.keyboard_enabled) || !env.is_foreground_target_class() {
            return DispatchOutcome::Disabled;
        }

        let held = Modifiers::held(&LiveKeys(self.platform.as_ref()));
        if is_suppressed(env.hotkey_chords().iter().flatten(), event.virtual_key, held) {
            trace!(vk = event.virtual_key, "keystroke completes a hotkey, not mirrored");
            return DispatchOutcome::Suppressed;
        }

        let params = translate::build_key_dispatch_params(event);
        let foreground = self.platform.foreground_window();
        let mut tally = Tally::default();

        for target in env.targets() {
            if excluded(target.handle, foreground) {
                continue;
            }
            self.post(target.handle, params, &mut tally);
        }
        tally.into()
    }

    /// Mirrors a mouse event, remapping its position into each target.
    pub fn handle_mouse(&self, event: &MouseEvent) -> DispatchOutcome {
        let env = self.environment.snapshot();
        let settings = env.settings();
        if !(settings.enabled && settings.mouse_enabled) || !env.is_foreground_target_class() {
            return DispatchOutcome::Disabled;
        }

        let foreground = self.platform.foreground_window();
        let source = self.normalize_source(env.as_ref(), foreground, event.screen_point);
        let key_state = translate::mouse_key_state(&LiveKeys(self.platform.as_ref()));
        let mut tally = Tally::default();

        for target in env.targets() {
            if excluded(target.handle, foreground) {
                continue;
            }
            let Some(client) = self.target_point(&target, source, event.screen_point) else {
                trace!(window = target.handle.0, "target geometry unavailable, skipped");
                tally.skipped += 1;
                continue;
            };
            let params = translate::build_mouse_dispatch_params(event, client, key_state);
            self.post(target.handle, params, &mut tally);
        }
        tally.into()
    }

    /// Normalizes the cursor against the foreground (source) window.
    ///
    /// `None` when the source geometry cannot be resolved; targets then fall
    /// back to a direct screen-to-client conversion.
    fn normalize_source(
        &self,
        env: &dyn BroadcastEnvironment,
        foreground: WindowHandle,
        screen: Point,
    ) -> Option<NormalizedPoint> {
        if foreground.is_null() {
            return None;
        }
        let client = self.platform.screen_to_client(foreground, screen)?;
        let (width, height) = self.platform.client_size(foreground)?;
        let classic = env.is_classic_mode(foreground);
        client_to_normalized(client, width, height, classic).ok()
    }

    /// Final client-space position for one target, or `None` to skip it.
    fn target_point(
        &self,
        target: &TargetWindow,
        source: Option<NormalizedPoint>,
        screen: Point,
    ) -> Option<Point> {
        match (self.platform.client_size(target.handle), source) {
            (Some((w, h)), _) if w <= 0 || h <= 0 => None,
            (Some((w, h)), Some(n)) => normalized_to_client(n, w, h, target.classic_mode_enabled).ok(),
            _ => self.platform.screen_to_client(target.handle, screen),
        }
    }

    fn post(&self, window: WindowHandle, params: MessageParams, tally: &mut Tally) {
        match self.platform.post_message(window, params) {
            Ok(()) => tally.posted += 1,
            Err(e) => {
                trace!(window = window.0, "post skipped: {e}");
                tally.skipped += 1;
            }
        }
    }
}

/// A target never receives its own input, and null handles are ignored.
fn excluded(target: WindowHandle, foreground: WindowHandle) -> bool {
    target.is_null() || target == foreground
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::MockPlatform;
    use mbx_core::{input::msg, keymap::vk};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ── Test doubles ──────────────────────────────────────────────────────────

    #[derive(Clone)]
    struct StaticEnvironment {
        settings: Arc<BroadcastSettings>,
        /// Pre-parsed chords; `None` falls back to parsing `settings`.
        chords: Option<[Option<HotkeyChord>; 3]>,
        targets: Vec<TargetWindow>,
        foreground_is_target: bool,
        classic_windows: Vec<WindowHandle>,
    }

    impl StaticEnvironment {
        fn enabled(targets: Vec<TargetWindow>) -> Self {
            Self {
                settings: Arc::new(BroadcastSettings {
                    enabled: true,
                    ..Default::default()
                }),
                chords: None,
                targets,
                foreground_is_target: true,
                classic_windows: Vec::new(),
            }
        }
    }

    impl BroadcastEnvironment for StaticEnvironment {
        fn settings(&self) -> Arc<BroadcastSettings> {
            Arc::clone(&self.settings)
        }
        fn hotkey_chords(&self) -> [Option<HotkeyChord>; 3] {
            self.chords.unwrap_or_else(|| self.settings.chords())
        }
        fn targets(&self) -> Vec<TargetWindow> {
            self.targets.clone()
        }
        fn is_foreground_target_class(&self) -> bool {
            self.foreground_is_target
        }
        fn is_classic_mode(&self, window: WindowHandle) -> bool {
            self.classic_windows.contains(&window)
        }
    }

    impl EnvironmentSource for StaticEnvironment {
        fn snapshot(&self) -> Arc<dyn BroadcastEnvironment> {
            Arc::new(self.clone())
        }
    }

    /// Counts how many snapshots the dispatcher takes.
    struct CountingSource {
        env: StaticEnvironment,
        snapshots: AtomicUsize,
    }

    impl EnvironmentSource for CountingSource {
        fn snapshot(&self) -> Arc<dyn BroadcastEnvironment> {
            self.snapshots.fetch_add(1, Ordering::SeqCst);
            Arc::new(self.env.clone())
        }
    }

    const SOURCE: WindowHandle = WindowHandle(0x100);
    const T1: WindowHandle = WindowHandle(0x200);
    const T2: WindowHandle = WindowHandle(0x300);

    fn platform() -> Arc<MockPlatform> {
        let p = MockPlatform::new();
        p.add_window(SOURCE, "Diablo II: Resurrected", Point::new(0, 0), 800, 600);
        p.add_window(T1, "Diablo II: Resurrected", Point::new(1000, 0), 800, 600);
        p.add_window(T2, "Diablo II: Resurrected", Point::new(2000, 0), 1600, 1200);
        p.set_foreground(SOURCE);
        Arc::new(p)
    }

    fn dispatcher(env: StaticEnvironment, platform: &Arc<MockPlatform>) -> BroadcastDispatcher {
        BroadcastDispatcher::new(Arc::new(env), Arc::clone(platform) as Arc<dyn InputPlatform>)
    }

    fn key_a_down() -> KeyEvent {
        KeyEvent::from_hook(msg::WM_KEYDOWN, 0x41, 0x1E, 0).unwrap()
    }

    fn all_targets() -> Vec<TargetWindow> {
        vec![
            TargetWindow::new(SOURCE, false),
            TargetWindow::new(T1, false),
            TargetWindow::new(T2, false),
        ]
    }

    // ── Gating ────────────────────────────────────────────────────────────────

    #[test]
    fn test_disabled_settings_post_nothing() {
        // Arrange
        let p = platform();
        let mut env = StaticEnvironment::enabled(all_targets());
        env.settings = Arc::new(BroadcastSettings::default());
        let d = dispatcher(env, &p);

        // Act
        let outcome = d.handle_key(&key_a_down());

        // Assert
        assert_eq!(outcome, DispatchOutcome::Disabled);
        assert!(p.posted().is_empty());
    }

    #[test]
    fn test_keyboard_switch_off_blocks_keys_but_not_mouse() {
        let p = platform();
        let mut env = StaticEnvironment::enabled(all_targets());
        env.settings = Arc::new(BroadcastSettings {
            enabled: true,
            keyboard_enabled: false,
            ..Default::default()
        });
        let d = dispatcher(env, &p);

        assert_eq!(d.handle_key(&key_a_down()), DispatchOutcome::Disabled);
        let mv = MouseEvent::from_hook(msg::WM_MOUSEMOVE, 10, 10, 0).unwrap();
        assert_eq!(d.handle_mouse(&mv).posted(), 2);
    }

    #[test]
    fn test_foreground_not_a_target_posts_nothing() {
        let p = platform();
        let mut env = StaticEnvironment::enabled(all_targets());
        env.foreground_is_target = false;
        let d = dispatcher(env, &p);

        assert_eq!(d.handle_key(&key_a_down()), DispatchOutcome::Disabled);
        assert!(p.posted().is_empty());
    }

    // ── Keyboard ──────────────────────────────────────────────────────────────

    #[test]
    fn test_key_is_posted_to_every_target_except_foreground() {
        // Arrange
        let p = platform();
        let d = dispatcher(StaticEnvironment::enabled(all_targets()), &p);

        // Act
        let outcome = d.handle_key(&key_a_down());

        // Assert
        assert_eq!(outcome, DispatchOutcome::Dispatched { posted: 2, skipped: 0 });
        let posted = p.posted();
        assert!(posted.iter().all(|(w, _)| *w != SOURCE));
        assert_eq!(posted[0].1.message, msg::WM_KEYDOWN);
        assert_eq!(posted[0].1.wparam, 0x41);
        assert_eq!(posted[0].1.lparam, 0x001E_0001);
    }

    #[test]
    fn test_null_target_handles_are_ignored() {
        let p = platform();
        let d = dispatcher(
            StaticEnvironment::enabled(vec![TargetWindow::new(WindowHandle::NULL, false), TargetWindow::new(T1, false)]),
            &p,
        );

        assert_eq!(d.handle_key(&key_a_down()), DispatchOutcome::Dispatched { posted: 1, skipped: 0 });
    }

    #[test]
    fn test_hotkey_keystroke_is_suppressed() {
        // Arrange: Ctrl+Alt held, B pressed → default toggle-broadcast chord.
        let p = platform();
        p.hold_keys(&[vk::CONTROL, vk::MENU]);
        let d = dispatcher(StaticEnvironment::enabled(all_targets()), &p);
        let b = KeyEvent::from_hook(msg::WM_SYSKEYDOWN, 0x42, 0x30, 0).unwrap();

        // Act
        let outcome = d.handle_key(&b);

        // Assert
        assert_eq!(outcome, DispatchOutcome::Suppressed);
        assert!(p.posted().is_empty());
    }

    #[test]
    fn test_hotkey_key_without_modifiers_is_mirrored() {
        let p = platform();
        let d = dispatcher(StaticEnvironment::enabled(all_targets()), &p);
        let b = KeyEvent::from_hook(msg::WM_KEYDOWN, 0x42, 0x30, 0).unwrap();

        assert_eq!(d.handle_key(&b).posted(), 2);
    }

    #[test]
    fn test_suppression_uses_the_snapshot_chords() {
        // Arrange: the snapshot carries Ctrl+F1 in place of the parsed strings.
        let p = platform();
        let mut env = StaticEnvironment::enabled(all_targets());
        env.chords = Some([Some(HotkeyChord::parse("Ctrl+F1").unwrap()), None, None]);
        let d = dispatcher(env, &p);
        p.hold_keys(&[vk::CONTROL, vk::MENU]);
        let ctrl_alt_b = KeyEvent::from_hook(msg::WM_SYSKEYDOWN, 0x42, 0x30, 0).unwrap();
        let f1 = KeyEvent::from_hook(msg::WM_KEYDOWN, 0x70, 0x3B, 0).unwrap();

        // Act
        let mirrored = d.handle_key(&ctrl_alt_b);
        let suppressed = d.handle_key(&f1);

        // Assert
        assert_eq!(mirrored.posted(), 2);
        assert_eq!(suppressed, DispatchOutcome::Suppressed);
    }

    #[test]
    fn test_one_snapshot_is_taken_per_event() {
        // Arrange: classic source so every environment lookup is exercised.
        let p = platform();
        let mut env = StaticEnvironment::enabled(all_targets());
        env.classic_windows.push(SOURCE);
        let source = Arc::new(CountingSource {
            env,
            snapshots: AtomicUsize::new(0),
        });
        let d = BroadcastDispatcher::new(
            Arc::clone(&source) as Arc<dyn EnvironmentSource>,
            Arc::clone(&p) as Arc<dyn InputPlatform>,
        );
        let click = MouseEvent::from_hook(msg::WM_LBUTTONDOWN, 400, 300, 0).unwrap();

        // Act
        d.handle_mouse(&click);
        d.handle_key(&key_a_down());

        // Assert
        assert_eq!(source.snapshots.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_post_failure_does_not_abort_remaining_targets() {
        // Arrange
        let p = platform();
        p.fail_posts_to(T1);
        let d = dispatcher(StaticEnvironment::enabled(all_targets()), &p);

        // Act
        let outcome = d.handle_key(&key_a_down());

        // Assert
        assert_eq!(outcome, DispatchOutcome::Dispatched { posted: 1, skipped: 1 });
        assert_eq!(p.posted_to(T2).len(), 1);
    }

    // ── Mouse ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_mouse_position_is_scaled_into_each_target() {
        // Arrange: source 800x600 at origin, cursor at its centre.
        let p = platform();
        let d = dispatcher(StaticEnvironment::enabled(all_targets()), &p);
        let click = MouseEvent::from_hook(msg::WM_LBUTTONDOWN, 400, 300, 0).unwrap();

        // Act
        d.handle_mouse(&click);

        // Assert
        assert_eq!(p.posted_to(T1)[0].lparam, (300 << 16) | 400);
        assert_eq!(p.posted_to(T2)[0].lparam, (600 << 16) | 800);
    }

    #[test]
    fn test_classic_target_lands_inside_its_viewport() {
        // Arrange: 1920x1080 classic target, viewport x in [240, 1680).
        let p = platform();
        let wide = WindowHandle(0x400);
        p.add_window(wide, "Diablo II: Resurrected", Point::new(0, 2000), 1920, 1080);
        let d = dispatcher(StaticEnvironment::enabled(vec![TargetWindow::new(wide, true)]), &p);
        let left_edge = MouseEvent::from_hook(msg::WM_MOUSEMOVE, 0, 300, 0).unwrap();

        // Act
        d.handle_mouse(&left_edge);

        // Assert
        let lparam = p.posted_to(wide)[0].lparam;
        assert_eq!(lparam & 0xFFFF, 240);
        assert_eq!(lparam >> 16, 540);
    }

    #[test]
    fn test_classic_source_normalizes_against_its_viewport() {
        // Arrange: source becomes 1920x1080 classic; click in its left letterbox bar.
        let p = MockPlatform::new();
        p.add_window(SOURCE, "D2R", Point::new(0, 0), 1920, 1080);
        p.add_window(T1, "D2R", Point::new(0, 2000), 800, 600);
        p.set_foreground(SOURCE);
        let p = Arc::new(p);
        let mut env = StaticEnvironment::enabled(vec![TargetWindow::new(T1, false)]);
        env.classic_windows.push(SOURCE);
        let d = dispatcher(env, &p);
        let in_bar = MouseEvent::from_hook(msg::WM_MOUSEMOVE, 100, 540, 0).unwrap();

        // Act
        d.handle_mouse(&in_bar);

        // Assert: saturates to the target's left edge, vertical centre.
        assert_eq!(p.posted_to(T1)[0].lparam, 300 << 16);
    }

    #[test]
    fn test_zero_size_target_is_skipped_without_affecting_others() {
        // Arrange
        let p = platform();
        let collapsed = WindowHandle(0x500);
        p.add_window(collapsed, "Diablo II: Resurrected", Point::new(0, 0), 0, 600);
        let d = dispatcher(
            StaticEnvironment::enabled(vec![TargetWindow::new(collapsed, false), TargetWindow::new(T1, false)]),
            &p,
        );
        let mv = MouseEvent::from_hook(msg::WM_MOUSEMOVE, 10, 10, 0).unwrap();

        // Act
        let outcome = d.handle_mouse(&mv);

        // Assert
        assert_eq!(outcome, DispatchOutcome::Dispatched { posted: 1, skipped: 1 });
        assert!(p.posted_to(collapsed).is_empty());
    }

    #[test]
    fn test_unresolvable_source_falls_back_to_screen_to_client() {
        // Arrange: the foreground window has no client area to normalize against.
        let p = MockPlatform::new();
        p.add_window(SOURCE, "D2R", Point::new(0, 0), 0, 0);
        p.add_window(T1, "D2R", Point::new(1000, 100), 800, 600);
        p.set_foreground(SOURCE);
        let p = Arc::new(p);
        let d = dispatcher(StaticEnvironment::enabled(vec![TargetWindow::new(T1, false)]), &p);
        let mv = MouseEvent::from_hook(msg::WM_MOUSEMOVE, 1010, 120, 0).unwrap();

        // Act
        d.handle_mouse(&mv);

        // Assert: plain screen-to-client translation.
        assert_eq!(p.posted_to(T1)[0].lparam, (20 << 16) | 10);
    }

    #[test]
    fn test_vanished_target_is_skipped() {
        let p = platform();
        let gone = WindowHandle(0x999);
        let d = dispatcher(
            StaticEnvironment::enabled(vec![TargetWindow::new(gone, false), TargetWindow::new(T1, false)]),
            &p,
        );
        let mv = MouseEvent::from_hook(msg::WM_MOUSEMOVE, 10, 10, 0).unwrap();

        assert_eq!(d.handle_mouse(&mv), DispatchOutcome::Dispatched { posted: 1, skipped: 1 });
    }

    #[test]
    fn test_wheel_carries_delta_and_live_button_state() {
        // Arrange
        let p = platform();
        p.hold_keys(&[vk::RBUTTON]);
        let d = dispatcher(StaticEnvironment::enabled(vec![TargetWindow::new(T1, false)]), &p);
        let wheel = MouseEvent::from_hook(msg::WM_MOUSEWHEEL, 10, 10, (-120i16 as u16 as u32) << 16).unwrap();

        // Act
        d.handle_mouse(&wheel);

        // Assert
        let params = p.posted_to(T1)[0];
        assert_eq!(params.message, msg::WM_MOUSEWHEEL);
        assert_eq!(params.wparam as isize >> 16, -120);
        assert_eq!(params.wparam & 0xFFFF, usize::from(translate::MK_RBUTTON));
    }

    #[test]
    fn test_handle_routes_by_event_kind() {
        let p = platform();
        let d = dispatcher(StaticEnvironment::enabled(all_targets()), &p);

        assert_eq!(d.handle(&RawInputEvent::Key(key_a_down())).posted(), 2);
        let mv = MouseEvent::from_hook(msg::WM_MOUSEMOVE, 1, 1, 0).unwrap();
        assert_eq!(d.handle(&RawInputEvent::Mouse(mv)).posted(), 2);
    }
}
