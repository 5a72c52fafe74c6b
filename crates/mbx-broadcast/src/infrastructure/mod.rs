//! Infrastructure layer for the broadcast engine.
//!
//! Contains OS-facing adapters: the Win32 hook/hotkey backend and window
//! queries (`platform`), and configuration file persistence (`storage`).
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `mbx_core`, but MUST NOT be imported by the `application` layer outside
//! of tests.

pub mod platform;
pub mod storage;
