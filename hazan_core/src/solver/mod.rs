//! Bounded-trace solver and the traits it is built on

mod linalg;
mod objective;
mod top_eig;
mod solver_error;
mod solver;

pub use linalg::*;
pub use objective::*;
pub use top_eig::*;
pub use solver_error::*;
pub use solver::*;
