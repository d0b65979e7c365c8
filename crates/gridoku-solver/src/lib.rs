//! Search, counting, and exact-cover solving for gridoku boards.
//!
//! Three independent engines over [`gridoku_core::Board`]:
//!
//! - [`backtrack`]: chronological backtracking, either deterministic
//!   (feasibility checks) or randomized (full-board generation).
//! - [`count_solutions`]: iterative exhaustive enumeration of every
//!   completion, using an explicit stack so deep searches cannot exhaust
//!   the call stack.
//! - [`find_assignment`]: an exact-cover 0/1 integer-program encoding
//!   solved through the pluggable [`LpBackend`] seam.

pub use self::{
    backtrack::{complete, fill_random, is_completable},
    count::count_solutions,
    exact_cover::{Feasibility, SolveError, find_assignment},
    lp::{BranchBoundBackend, BranchBoundModel, LpBackend, LpError, LpModel, LpStatus},
};

mod backtrack;
mod count;
mod exact_cover;
mod lp;
