// Domain value objects representing core business concepts

use std::fmt;

/// Kind of decision variable created for every dataset row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Continuous real number (x ∈ ℝ, x ≥ 0)
    Continuous,
    /// Integer number (x ∈ ℤ, x ≥ 0)
    Integer,
    /// Binary variable (x ∈ {0, 1})
    Binary,
}

impl VariableKind {
    pub fn is_integer(self) -> bool {
        matches!(self, VariableKind::Integer | VariableKind::Binary)
    }
}

/// Comparison sense of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Less than or equal (≤)
    LessEq,
    /// Greater than or equal (≥)
    GreaterEq,
    /// Equal (=)
    Equal,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::LessEq => write!(f, "<="),
            Relation::GreaterEq => write!(f, ">="),
            Relation::Equal => write!(f, "=="),
        }
    }
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Minimize the objective function
    Minimize,
    /// Maximize the objective function
    Maximize,
}

/// Backend-neutral status of a solve attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Found a proven optimal solution
    Optimal,
    /// Found a feasible solution but stopped before proving optimality
    /// (time or gap limit reached)
    Feasible,
    /// No solution satisfies all constraints
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// The selected backend is not available in this build
    Unavailable,
}

impl SolveStatus {
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Feasible => write!(f, "Feasible"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::Unavailable => write!(f, "Unavailable"),
        }
    }
}

/// Solver backend to target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// COIN-OR CBC (via good_lp)
    Cbc,
    /// HiGHS
    Highs,
}

impl BackendKind {
    /// All backends this crate knows about, in comparison order.
    pub const ALL: [BackendKind; 2] = [BackendKind::Cbc, BackendKind::Highs];
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Cbc => write!(f, "COIN-OR CBC"),
            BackendKind::Highs => write!(f, "HiGHS"),
        }
    }
}
