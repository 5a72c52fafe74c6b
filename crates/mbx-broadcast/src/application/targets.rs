//! ConfiguredTargets: resolves the configured target list into live windows.
//!
//! Targets are configured by window title (one `[[targets]]` entry per game
//! client).  Handles are never cached: every call enumerates the desktop
//! again through the [`WindowDirectory`] capability, so a client that was
//! closed and relaunched is picked up on the very next event.
//!
//! The settings, their parsed hotkey chords and the target entries are held
//! as one immutable [`TargetsView`] behind an `RwLock<Arc<..>>`.  The
//! dispatcher takes the read lock once per event to clone the `Arc`; writers
//! build a new view and swap it in.

use std::sync::{Arc, PoisonError, RwLock};

use mbx_core::{BroadcastSettings, HotkeyChord, TargetWindow, WindowHandle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dispatch::{BroadcastEnvironment, EnvironmentSource};

/// Desktop window lookups.
pub trait WindowDirectory: Send + Sync {
    /// Visible top-level windows whose title equals `title`, ignoring case.
    fn find_windows_by_exact_title(&self, title: &str) -> Vec<WindowHandle>;

    /// Current title of `window`, or `None` if it no longer exists.
    fn window_title(&self, window: WindowHandle) -> Option<String>;

    fn foreground_window(&self) -> WindowHandle;
}

/// Case-insensitive title comparison used for every target lookup.
pub fn titles_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// One configured game window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetEntry {
    /// Exact window title, matched case-insensitively.
    pub title: String,
    /// The client renders in classic (letterboxed 4:3) mode.
    #[serde(default)]
    pub classic_mode: bool,
    /// Receives input when `broadcast_all` is off.
    #[serde(default = "default_true")]
    pub broadcast_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl TargetEntry {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            classic_mode: false,
            broadcast_enabled: true,
        }
    }
}

/// One published state of [`ConfiguredTargets`].
pub struct TargetsView {
    settings: Arc<BroadcastSettings>,
    chords: [Option<HotkeyChord>; 3],
    entries: Arc<Vec<TargetEntry>>,
    windows: Arc<dyn WindowDirectory>,
}

impl TargetsView {
    fn new(
        settings: Arc<BroadcastSettings>,
        entries: Arc<Vec<TargetEntry>>,
        windows: Arc<dyn WindowDirectory>,
    ) -> Self {
        Self {
            chords: settings.chords(),
            settings,
            entries,
            windows,
        }
    }

    pub fn entries(&self) -> &Arc<Vec<TargetEntry>> {
        &self.entries
    }

    fn entry_for(&self, window: WindowHandle) -> Option<&TargetEntry> {
        let title = self.windows.window_title(window)?;
        self.entries.iter().find(|e| titles_match(&e.title, &title))
    }
}

impl BroadcastEnvironment for TargetsView {
    fn settings(&self) -> Arc<BroadcastSettings> {
        Arc::clone(&self.settings)
    }

    fn hotkey_chords(&self) -> [Option<HotkeyChord>; 3] {
        self.chords
    }

    fn targets(&self) -> Vec<TargetWindow> {
        self.entries
            .iter()
            .filter(|e| self.settings.broadcast_all || e.broadcast_enabled)
            .flat_map(|e| {
                self.windows
                    .find_windows_by_exact_title(&e.title)
                    .into_iter()
                    .map(move |handle| TargetWindow::new(handle, e.classic_mode))
            })
            .collect()
    }

    fn is_foreground_target_class(&self) -> bool {
        let foreground = self.windows.foreground_window();
        !foreground.is_null() && self.entry_for(foreground).is_some()
    }

    fn is_classic_mode(&self, window: WindowHandle) -> bool {
        self.entry_for(window).is_some_and(|e| e.classic_mode)
    }
}

/// [`EnvironmentSource`] backed by configured target entries.
pub struct ConfiguredTargets {
    view: RwLock<Arc<TargetsView>>,
    windows: Arc<dyn WindowDirectory>,
}

impl ConfiguredTargets {
    pub fn new(
        settings: BroadcastSettings,
        entries: Vec<TargetEntry>,
        windows: Arc<dyn WindowDirectory>,
    ) -> Self {
        let view = TargetsView::new(Arc::new(settings), Arc::new(entries), Arc::clone(&windows));
        Self {
            view: RwLock::new(Arc::new(view)),
            windows,
        }
    }

    /// The currently published view.
    pub fn current(&self) -> Arc<TargetsView> {
        Arc::clone(&self.view.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn settings(&self) -> Arc<BroadcastSettings> {
        self.current().settings()
    }

    /// The current target entries.
    pub fn entries(&self) -> Arc<Vec<TargetEntry>> {
        Arc::clone(self.current().entries())
    }

    /// Builds the next view from the current one and publishes it.
    ///
    /// The write lock is held throughout, so concurrent writers never lose an
    /// update.  `f` returning `None` leaves the current view in place.
    fn update<R>(
        &self,
        f: impl FnOnce(&TargetsView) -> Option<(Arc<BroadcastSettings>, Arc<Vec<TargetEntry>>, R)>,
    ) -> Option<R> {
        let mut guard = self.view.write().unwrap_or_else(PoisonError::into_inner);
        let (settings, entries, result) = f(&guard)?;
        *guard = Arc::new(TargetsView::new(settings, entries, Arc::clone(&self.windows)));
        Some(result)
    }

    /// Swaps in new settings and entries (e.g. after a config reload).
    pub fn replace(&self, settings: BroadcastSettings, entries: Vec<TargetEntry>) {
        self.update(|_| Some((Arc::new(settings), Arc::new(entries), ())));
    }

    /// Applies `f` to a copy of the settings and publishes the result.
    fn update_settings(&self, f: impl FnOnce(&mut BroadcastSettings)) -> Arc<BroadcastSettings> {
        self.update(|view| {
            let mut next = (*view.settings).clone();
            f(&mut next);
            let next = Arc::new(next);
            Some((Arc::clone(&next), Arc::clone(&view.entries), next))
        })
        .unwrap_or_else(|| self.settings())
    }

    /// Flips the master broadcast switch.
    pub fn toggle_broadcast(&self) -> Arc<BroadcastSettings> {
        let next = self.update_settings(|s| s.enabled = !s.enabled);
        debug!(enabled = next.enabled, "broadcast toggled");
        next
    }

    /// Flips between "all targets" and "only entries marked for broadcast".
    pub fn toggle_mode(&self) -> Arc<BroadcastSettings> {
        let next = self.update_settings(|s| s.broadcast_all = !s.broadcast_all);
        debug!(broadcast_all = next.broadcast_all, "broadcast mode toggled");
        next
    }

    /// Flips `broadcast_enabled` on the entry matching the foreground
    /// window's title.
    ///
    /// Returns the updated entry, or `None` when the foreground window is not
    /// a configured target.
    pub fn toggle_foreground_window(&self) -> Option<TargetEntry> {
        let foreground = self.windows.foreground_window();
        if foreground.is_null() {
            return None;
        }
        let title = self.windows.window_title(foreground)?;

        let updated = self.update(|view| {
            let mut entries = (*view.entries).clone();
            let entry = entries.iter_mut().find(|e| titles_match(&e.title, &title))?;
            entry.broadcast_enabled = !entry.broadcast_enabled;
            let updated = entry.clone();
            Some((Arc::clone(&view.settings), Arc::new(entries), updated))
        })?;

        debug!(title = %updated.title, enabled = updated.broadcast_enabled, "window broadcast toggled");
        Some(updated)
    }
}

impl EnvironmentSource for ConfiguredTargets {
    fn snapshot(&self) -> Arc<dyn BroadcastEnvironment> {
        self.current()
    }
}
