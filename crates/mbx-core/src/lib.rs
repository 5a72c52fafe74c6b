//! # mbx-core
//!
//! OS-independent building blocks of the Multibox Broadcast input mirror.
//!
//! The broadcast engine watches the physical keyboard and mouse through global
//! low-level hooks and re-posts every event into a set of game windows.  All
//! of the decisions that can be made without touching the OS live here:
//!
//! - **`hotkey`** – parses `Ctrl+Alt+B`-style chord strings, formats them back
//!   canonically, and decides whether a keypress is completing one of the
//!   configured hotkeys (and must therefore not be mirrored).
//!
//! - **`domain`** – the settings snapshot and target descriptors, plus the
//!   classic-viewport geometry that keeps mirrored cursor positions on the
//!   rendered 4:3 surface of letterboxed windows.
//!
//! - **`input`** – decodes hook payloads and re-encodes them as
//!   `(message, wParam, lParam)` triples for `PostMessageW`.
//!
//! - **`keymap`** – key-name ↔ Virtual Key tables and the [`KeyState`] seam
//!   through which live key state is sampled.
//!
//! The crate has no dependency on the `windows` crate and compiles and tests
//! on every platform.

pub mod domain;
pub mod hotkey;
pub mod input;
pub mod keymap;

pub use domain::geometry::{
    client_to_normalized, compute_classic_viewport, normalized_to_client, GeometryError,
    NormalizedPoint, Point, Viewport,
};
pub use domain::settings::{BroadcastSettings, TargetWindow, WindowHandle};
pub use hotkey::{is_suppressed, HotkeyChord, HotkeyError, HotkeySlot, Modifiers};
pub use input::{KeyEvent, MessageParams, MouseEvent, RawInputEvent};
pub use keymap::{KeyState, VirtualKey};
