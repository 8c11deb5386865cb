//! PhysLab - physics simulation launcher
//!
//! Library side of the `physlab` binary: configuration, the launcher window
//! and the built-in simulation units. Exposed so integration tests can build
//! catalogs and registries the same way the binary does.

pub mod config;
pub mod input;
pub mod launcher;
pub mod units;
