//! blockfall: a terminal falling-block puzzle game.
//!
//! The crate splits into a pure rule engine ([`core`]) and the host-facing
//! layers that drive it: [`input`] maps key and mouse events to commands,
//! [`term`] renders snapshots to the terminal, and the binary owns the
//! gravity cadence. [`types`] holds the shared constants and plain enums.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
