//! Game session and move history for gridoku.
//!
//! A [`Session`] owns exactly one board, its solution grid, and its
//! [`TurnHistory`], and is the only mutation surface the layer above (CLI,
//! UI) should touch: every cell change flows through the session so the
//! history never diverges from the board. There is no global state; each
//! session is an independent context object.

pub use self::{
    history::{CellMove, Turn, TurnHistory},
    session::{GameError, MAX_GENERATE_ATTEMPTS, Mode, Session},
};

mod history;
mod session;
