//! Falling-block puzzle game (workspace facade crate).
//!
//! The simulation, input mapping and terminal rendering live in dedicated
//! crates under `crates/`; this package re-exports them and adds the pieces
//! that touch the outside world: best-score files and command-line settings.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod persist;
pub mod settings;
