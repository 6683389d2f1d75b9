//! Board engine for the resolution bingo app: the 5x5 grid model, the
//! board lifecycle state machine, the multi-board registry and the
//! share-link codec. Everything here is pure and host-testable; rendering,
//! storage and timers live in the web crate.

pub use board::*;
pub use cell::*;
pub use error::*;
pub use grid::*;
pub use registry::*;
pub use share::*;
pub use theme::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod grid;
mod registry;
mod share;
mod theme;
mod types;
