//! Terminal rendering for the falling-block game.
//!
//! Rendering goes through a plain framebuffer instead of a widget library:
//!
//! - [`GameView`] draws a `core::GameSnapshot` into a [`FrameBuffer`] (pure, testable)
//! - [`TerminalRenderer`] flushes frames to a crossterm backend, redrawing only changed runs
//!
//! Board cells are two columns wide by default to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
