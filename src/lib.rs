// Domain layer: constraint model, dataset, lowering, solver contract
pub mod domain;

// Application layer: solve orchestration and backend comparison
pub mod application;

// Solver adapters: concrete implementations of BackendCompiler
pub mod solver;

// Re-export commonly used types
pub use domain::{
    BackendCompiler, BackendKind, ConstraintModel, Dataset, Direction, GroupConstraintSpec,
    LinearProgram, LinkingGroupSpec, ModelError, Relation, SolveConfig, SolveResult, SolveStatus,
    SolverError, VariableKind,
};

pub use application::OptimizationService;

pub use solver::SolverFactory;

#[cfg(feature = "cbc")]
pub use solver::CbcSolver;
#[cfg(feature = "highs")]
pub use solver::HighsSolver;
