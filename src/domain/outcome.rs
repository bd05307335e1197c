// Result normalizer: unifies heterogeneous backend outputs into one contract

use super::value_objects::{BackendKind, SolveStatus};

/// What a backend reports straight from its own API, before normalization.
///
/// `values` covers every program variable (row variables first, then any
/// activation variables); `best_bound` is the proven dual bound when the
/// backend exposes one. `solve_time` is wall-clock seconds measured around
/// the underlying solve call only.
#[derive(Debug, Clone)]
pub struct RawOutcome {
    pub status: SolveStatus,
    pub objective: Option<f64>,
    pub values: Option<Vec<f64>>,
    pub best_bound: Option<f64>,
    pub solve_time: f64,
}

impl RawOutcome {
    /// Outcome with no solution attached (infeasible, unbounded)
    pub fn without_solution(status: SolveStatus, solve_time: f64) -> Self {
        Self {
            status,
            objective: None,
            values: None,
            best_bound: None,
            solve_time,
        }
    }
}

/// Unified result of one solve attempt.
///
/// The caller must check `status` before trusting `objective` or
/// `row_values`: infeasible, unbounded and unavailable results carry
/// neither. A row counts as "selected" when its value is greater than zero;
/// that threshold is the caller's interpretation, not the solver's.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub backend: BackendKind,
    pub status: SolveStatus,
    pub objective: Option<f64>,
    /// Realized decision value per dataset row (not a 0/1 flag)
    pub row_values: Option<Vec<f64>>,
    /// Wall-clock seconds spent inside the backend's solve call
    pub solve_time: f64,
    /// Relative optimality gap; only for integer models with a known bound
    pub gap: Option<f64>,
    pub message: String,
}

impl SolveResult {
    /// Result for a backend that is not available in this build
    pub fn unavailable(backend: BackendKind) -> Self {
        Self {
            backend,
            status: SolveStatus::Unavailable,
            objective: None,
            row_values: None,
            solve_time: 0.0,
            gap: None,
            message: format!("{backend} is not available in this build"),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Indices of rows whose decision value solved above zero
    pub fn selected_rows(&self) -> Vec<usize> {
        match &self.row_values {
            Some(values) => values
                .iter()
                .enumerate()
                .filter(|(_, &v)| v > 0.0)
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Map a raw backend outcome into the unified result contract.
///
/// Activation variables are internal bookkeeping, so the per-row mapping is
/// truncated to the first `rows` values. The relative gap
/// |bound − value| / |value| is computed only for mixed-integer programs
/// where the backend reported a bound; a zero objective value leaves the gap
/// undefined rather than dividing by it, and continuous solves always report
/// `None` (the optimum is exact).
pub fn normalize(
    backend: BackendKind,
    raw: RawOutcome,
    rows: usize,
    mixed_integer: bool,
) -> SolveResult {
    let row_values = raw.values.map(|mut values| {
        values.truncate(rows);
        values
    });

    let gap = if mixed_integer {
        match (raw.best_bound, raw.objective) {
            (Some(bound), Some(value)) if value != 0.0 => Some((bound - value).abs() / value.abs()),
            _ => None,
        }
    } else {
        None
    };

    let message = match raw.status {
        SolveStatus::Optimal => "Optimal solution found".to_string(),
        SolveStatus::Feasible => "Stopped at search limit with a feasible solution".to_string(),
        SolveStatus::Infeasible => {
            "Problem is infeasible: no solution satisfies all constraints".to_string()
        }
        SolveStatus::Unbounded => {
            "Problem is unbounded: objective can be improved infinitely".to_string()
        }
        SolveStatus::Unavailable => format!("{backend} is not available in this build"),
    };

    SolveResult {
        backend,
        status: raw.status,
        objective: raw.objective,
        row_values,
        solve_time: raw.solve_time,
        gap,
        message,
    }
}
