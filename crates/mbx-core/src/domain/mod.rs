//! Domain types with no OS dependencies.

pub mod geometry;
pub mod settings;
