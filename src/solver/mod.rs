// Solver adapters module

#[cfg(feature = "cbc")]
pub mod cbc;
pub mod factory;
#[cfg(feature = "highs")]
pub mod highs;

#[cfg(feature = "cbc")]
pub use cbc::CbcSolver;
pub use factory::SolverFactory;
#[cfg(feature = "highs")]
pub use highs::HighsSolver;
