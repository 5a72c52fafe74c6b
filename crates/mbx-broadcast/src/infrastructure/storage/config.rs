//! TOML-based configuration persistence.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\MultiboxBroadcast\config.toml`
//! - Linux:    `~/.config/multibox-broadcast/config.toml`
//! - macOS:    `~/Library/Application Support/MultiboxBroadcast/config.toml`
//!
//! Example file:
//!
//! ```toml
//! [general]
//! log_level = "info"
//!
//! [broadcast]
//! enabled = true
//! broadcast_all = false
//! toggle_broadcast_hotkey = "Ctrl+Alt+B"
//!
//! [[targets]]
//! title = "Alice"
//! classic_mode = true
//!
//! [[targets]]
//! title = "Bob"
//! broadcast_enabled = false
//! ```
//!
//! # Serde default values
//!
//! Every field has a `#[serde(default)]`, so a config written by an older
//! build (or a hand-written one with only a `[[targets]]` list) loads with
//! the missing settings filled in.

use std::path::{Path, PathBuf};

use mbx_core::{BroadcastSettings, HotkeyChord, HotkeySlot};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::application::targets::{titles_match, TargetEntry};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub broadcast: BroadcastSettings,
    #[serde(default)]
    pub targets: Vec<TargetEntry>,
}

/// Process-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Schema version string – bump when breaking changes are introduced.
    #[serde(default = "default_version")]
    pub version: String,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_version() -> String {
    "1.0".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Cleans up hand-edited input.
    ///
    /// - Hotkey strings are trimmed; unparseable ones are kept (the slot just
    ///   stays unbound) and logged.
    /// - Target entries with a blank title are dropped.
    /// - Duplicate titles (case-insensitive) keep the first entry.
    pub fn normalize(&mut self) {
        let b = &mut self.broadcast;
        for hotkey in [
            &mut b.toggle_broadcast_hotkey,
            &mut b.toggle_mode_hotkey,
            &mut b.toggle_window_hotkey,
        ] {
            let trimmed = hotkey.trim();
            if trimmed.len() != hotkey.len() {
                *hotkey = trimmed.to_string();
            }
        }
        for slot in HotkeySlot::ALL {
            let text = self.broadcast.hotkey(slot);
            if text.is_empty() {
                continue;
            }
            if let Err(e) = HotkeyChord::parse(text) {
                warn!(?slot, "configured hotkey '{text}' is invalid: {e}");
            }
        }

        let mut kept: Vec<TargetEntry> = Vec::with_capacity(self.targets.len());
        for mut entry in self.targets.drain(..) {
            entry.title = entry.title.trim().to_string();
            if entry.title.is_empty() {
                continue;
            }
            if kept.iter().any(|k| titles_match(&k.title, &entry.title)) {
                warn!(title = %entry.title, "duplicate target entry ignored");
                continue;
            }
            kept.push(entry);
        }
        self.targets = kept;
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads and normalizes `AppConfig` from `path`, returning
/// `AppConfig::default()` if the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let mut cfg: AppConfig = toml::from_str(&content)?;
            cfg.normalize();
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("MultiboxBroadcast"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("multibox-broadcast"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("MultiboxBroadcast")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
