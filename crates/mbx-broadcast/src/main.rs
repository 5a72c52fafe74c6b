//! Multibox Broadcast entry point.
//!
//! Loads the configuration, creates the hidden host window, arms the hook
//! session and then pumps Win32 messages on the main thread until Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config_from()        -- TOML settings + target titles
//!  └─ run()
//!       ├─ ConfiguredTargets    (settings snapshot, title lookups)
//!       ├─ HookSession          (hotkeys on the host window, LL hooks)
//!       ├─ signal thread        (Ctrl-C → WM_QUIT)
//!       └─ run_message_loop()   (hook callbacks + WM_HOTKEY, main thread)
//! ```
//!
//! Hotkey handlers only queue the pressed slot on a channel; the loop applies
//! the toggle after `handle_host_message` returns, then persists the new
//! state so it survives a restart.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mbx_broadcast::infrastructure::storage::config::{self, AppConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Mirrors keyboard and mouse input from the focused game window into every
/// other configured game window.
#[derive(Debug, Parser)]
#[command(
    name = "mbx-broadcast",
    about = "Input broadcaster for multiboxing game clients",
    version
)]
struct Cli {
    /// Path of the TOML configuration file.
    ///
    /// Defaults to `%APPDATA%\MultiboxBroadcast\config.toml`.  A missing file
    /// is created with defaults on the first toggle.
    #[arg(long, env = "MBX_CONFIG")]
    config: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let path = match cli.config {
        Some(path) => path,
        None => config::config_file_path()?,
    };
    let app_config = config::load_config_from(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    // `RUST_LOG` overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.general.log_level)),
        )
        .init();

    info!(
        config = %path.display(),
        targets = app_config.targets.len(),
        "Multibox Broadcast starting"
    );

    run(path, app_config)?;

    info!("Multibox Broadcast stopped");
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn run(_path: PathBuf, _config: AppConfig) -> anyhow::Result<()> {
    use mbx_broadcast::application::session::HookError;

    Err(HookError::UnsupportedPlatform(std::env::consts::OS.to_string()).into())
}

#[cfg(target_os = "windows")]
fn run(path: PathBuf, mut app_config: AppConfig) -> anyhow::Result<()> {
    use std::sync::{mpsc, Arc};

    use mbx_broadcast::application::dispatch::{EnvironmentSource, InputPlatform};
    use mbx_broadcast::application::session::HookSession;
    use mbx_broadcast::application::targets::{ConfiguredTargets, WindowDirectory};
    use mbx_broadcast::infrastructure::platform::windows::{
        self as win, WindowsHookBackend, WindowsPlatform,
    };
    use mbx_core::HotkeySlot;
    use tracing::{debug, error, warn};

    let platform = Arc::new(WindowsPlatform::new());
    let targets = Arc::new(ConfiguredTargets::new(
        app_config.broadcast.clone(),
        app_config.targets.clone(),
        Arc::clone(&platform) as Arc<dyn WindowDirectory>,
    ));
    let mut session = HookSession::new(
        Box::new(WindowsHookBackend::new()?),
        Arc::clone(&targets) as Arc<dyn EnvironmentSource>,
        platform as Arc<dyn InputPlatform>,
    );

    // ── Hotkey handlers ───────────────────────────────────────────────────────
    let (tx, rx) = mpsc::channel::<HotkeySlot>();
    let t = tx.clone();
    session.on_toggle_broadcast_requested(move || {
        let _ = t.send(HotkeySlot::ToggleBroadcast);
    });
    let t = tx.clone();
    session.on_toggle_mode_requested(move || {
        let _ = t.send(HotkeySlot::ToggleMode);
    });
    session.on_toggle_window_requested(move || {
        let _ = tx.send(HotkeySlot::ToggleWindow);
    });

    let host = win::create_message_window()?;
    session.initialize(host)?;

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let loop_thread = win::current_thread_id();
    std::thread::Builder::new()
        .name("mbx-signal".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    error!("failed to start signal runtime: {e}");
                    return;
                }
            };
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("shutdown signal received");
                }
            });
            win::post_quit(loop_thread);
        })
        .context("failed to spawn signal thread")?;

    info!("Multibox Broadcast ready.  Press Ctrl-C to exit.");

    win::run_message_loop(|message, wparam| {
        if !session.handle_host_message(message, wparam) {
            return;
        }
        while let Ok(slot) = rx.try_recv() {
            match slot {
                HotkeySlot::ToggleBroadcast => {
                    let settings = targets.toggle_broadcast();
                    info!(enabled = settings.enabled, "broadcast toggled");
                    session.update_broadcast_state(&settings);
                }
                HotkeySlot::ToggleMode => {
                    let settings = targets.toggle_mode();
                    info!(broadcast_all = settings.broadcast_all, "broadcast mode toggled");
                }
                HotkeySlot::ToggleWindow => match targets.toggle_foreground_window() {
                    Some(entry) => info!(
                        title = %entry.title,
                        enabled = entry.broadcast_enabled,
                        "window broadcast toggled"
                    ),
                    None => {
                        debug!("foreground window is not a configured target");
                        continue;
                    }
                },
            }

            app_config.broadcast = (*targets.settings()).clone();
            app_config.targets = targets.entries().to_vec();
            if let Err(e) = config::save_config_to(&path, &app_config) {
                warn!("failed to save config: {e}");
            }
        }
    });

    session.dispose();
    win::destroy_message_window(host);
    Ok(())
}
