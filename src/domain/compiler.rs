// Domain service interface for compiling and solving a lowered program
// Defines the contract that any backend implementation must follow

use super::model::SolveConfig;
use super::outcome::RawOutcome;
use super::program::LinearProgram;

/// Errors raised while building or lowering a constraint model.
///
/// These are configuration and data errors: they are fatal to the attempt
/// and surface synchronously, before any solver is involved. Solver-domain
/// outcomes (infeasible, unbounded, unavailable) are not errors and flow
/// through `SolveResult` instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("no objective set: call set_objective before solving")]
    MissingObjective,

    #[error("dataset has no rows")]
    EmptyDataset,

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("column '{column}' has {actual} values but the dataset has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("group '{group}' has no rows to read column '{column}' from")]
    EmptyGroup { column: String, group: String },

    #[error(
        "column '{column}' is not constant within group '{group}': found {first} and {conflicting}"
    )]
    NonUniformGroup {
        column: String,
        group: String,
        first: f64,
        conflicting: f64,
    },
}

/// Errors raised by a backend while solving
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid program: {0}")]
    InvalidProgram(String),

    #[error("solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Contract for a solver backend.
///
/// A backend translates the lowered `LinearProgram` into its native variable
/// and constraint objects, applies the soft search limits from `SolveConfig`,
/// runs the solve, and reports a `RawOutcome` with whatever the underlying
/// API exposes. Implementations must not share state across solves: every
/// call builds a fresh solver instance.
pub trait BackendCompiler: Send + Sync {
    /// Compile the program into this backend and solve it.
    fn solve(&self, program: &LinearProgram, config: &SolveConfig) -> Result<RawOutcome>;

    /// Check program shape without solving it.
    fn validate(&self, program: &LinearProgram) -> Result<()> {
        let num_vars = program.variables.len();

        if num_vars == 0 {
            return Err(SolverError::InvalidProgram(
                "program has no variables".to_string(),
            ));
        }

        if program.objective.len() != num_vars {
            return Err(SolverError::InvalidProgram(format!(
                "objective has {} coefficients but program has {} variables",
                program.objective.len(),
                num_vars
            )));
        }

        for constraint in &program.constraints {
            if let Some(&(index, _)) = constraint.terms.iter().find(|(i, _)| *i >= num_vars) {
                return Err(SolverError::InvalidProgram(format!(
                    "constraint '{}' references variable {} but program has {} variables",
                    constraint.name, index, num_vars
                )));
            }
        }

        Ok(())
    }

    /// Name of this solver backend
    fn name(&self) -> &str;

    /// Whether this backend supports mixed-integer programming
    fn supports_mip(&self) -> bool;
}
