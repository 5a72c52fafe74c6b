//! Application layer use cases for the broadcast engine.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure rules in `mbx-core`) and the infrastructure (Win32 hooks, window
//! enumeration, config files).
//!
//! Use cases in this layer:
//!
//! - **Depend on abstractions** (traits) rather than concrete OS calls, so
//!   every decision can be unit-tested with the mock platform.
//! - **Contain no OS calls and no file system access**.
//!
//! # Sub-modules
//!
//! - **`dispatch`** – the [`dispatch::BroadcastDispatcher`] that runs inside
//!   the hook callbacks and posts each physical event to every target.  It
//!   runs on every keystroke and mouse movement.
//!
//! - **`session`** – the [`session::HookSession`] lifecycle: hotkey
//!   registration, edge-triggered hook install/remove, idempotent disposal.
//!
//! - **`targets`** – [`targets::ConfiguredTargets`], which turns the
//!   configured window titles into a fresh target list on every event and
//!   applies the three hotkey toggles.

pub mod dispatch;
pub mod session;
pub mod targets;
