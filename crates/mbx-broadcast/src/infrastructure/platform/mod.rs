//! OS platform adapters.
//!
//! On Windows this wraps the low-level hooks (`WH_KEYBOARD_LL`,
//! `WH_MOUSE_LL`), `RegisterHotKey`, `PostMessageW` and the window queries
//! the dispatcher and target resolution need.
//!
//! # Hook callback constraints
//!
//! Windows silently removes a low-level hook whose callback exceeds the
//! `LowLevelHooksTimeout` budget.  The callbacks therefore run the dispatcher
//! synchronously, never block, and catch every panic before returning to the
//! OS.
//!
//! # Testability
//!
//! [`mock::MockPlatform`] implements the same traits over an in-memory
//! desktop, so dispatch and target resolution are testable on any OS.

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;
