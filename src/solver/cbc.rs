// COIN-OR CBC adapter, via good_lp

use crate::domain::{
    compiler::{BackendCompiler, Result, SolverError},
    model::SolveConfig,
    outcome::RawOutcome,
    program::LinearProgram,
    value_objects::{Direction, Relation, SolveStatus, VariableKind},
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolution, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;

pub struct CbcSolver;

impl CbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendCompiler for CbcSolver {
    fn solve(&self, program: &LinearProgram, config: &SolveConfig) -> Result<RawOutcome> {
        self.validate(program)?;

        // Build variables
        let mut vars = variables!();
        let mut lp_vars: Vec<GoodLpVariable> = Vec::with_capacity(program.variables.len());

        for def in &program.variables {
            let upper = def.upper.unwrap_or(f64::INFINITY);
            let var = match def.kind {
                VariableKind::Binary => vars.add(variable().binary()),
                VariableKind::Integer => {
                    vars.add(variable().integer().min(def.lower).max(upper))
                }
                VariableKind::Continuous => vars.add(variable().min(def.lower).max(upper)),
            };
            lp_vars.push(var);
        }

        // Objective expression
        let mut obj_expr: Expression = 0.into();
        for (i, &coeff) in program.objective.iter().enumerate() {
            if coeff != 0.0 {
                obj_expr += coeff * lp_vars[i];
            }
        }

        let mut lp_model = match program.direction {
            Direction::Minimize => vars.minimise(obj_expr).using(coin_cbc::coin_cbc),
            Direction::Maximize => vars.maximise(obj_expr).using(coin_cbc::coin_cbc),
        };

        // CBC search limits: "sec" is the wall-clock cutoff, "ratio" the
        // allowed relative MIP gap
        lp_model.set_parameter("log", "0");
        if let Some(limit) = config.time_limit {
            lp_model.set_parameter("sec", &limit.to_string());
        }
        if let Some(gap) = config.relative_gap {
            lp_model.set_parameter("ratio", &gap.to_string());
        }

        // Constraint rows
        for constraint in &program.constraints {
            let mut lhs: Expression = 0.into();
            for &(i, coeff) in &constraint.terms {
                if coeff != 0.0 {
                    lhs += coeff * lp_vars[i];
                }
            }

            lp_model = match constraint.relation {
                Relation::LessEq => lp_model.with(lhs.leq(constraint.rhs)),
                Relation::GreaterEq => lp_model.with(lhs.geq(constraint.rhs)),
                Relation::Equal => lp_model.with(lhs.eq(constraint.rhs)),
            };
        }

        // Only the solve itself is timed; model build is excluded
        let start = Instant::now();
        let solved = lp_model.solve();
        let solve_time = start.elapsed().as_secs_f64();

        match solved {
            Ok(sol) => {
                let values: Vec<f64> = lp_vars.iter().map(|&v| sol.value(v)).collect();
                let objective: f64 = program
                    .objective
                    .iter()
                    .zip(&values)
                    .map(|(c, v)| c * v)
                    .sum();

                // good_lp exposes no dual bound and reports a ratio-gap stop
                // the same way as a proven optimum, so the bound is only
                // known to equal the objective when no search limit could
                // have cut the run short
                let proven = config.time_limit.is_none() && config.relative_gap.is_none();

                Ok(RawOutcome {
                    status: SolveStatus::Optimal,
                    objective: Some(objective),
                    values: Some(values),
                    best_bound: proven.then_some(objective),
                    solve_time,
                })
            }
            Err(error) => map_failure(error, solve_time),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}

/// Map a good_lp resolution failure onto the outcome contract.
///
/// CBC reports a search-limit stop (time limit hit) as `Other("Stopped")`,
/// and good_lp exposes no incumbent on that path, so the stop becomes a
/// `Feasible` outcome without values rather than an error. Only genuinely
/// unexpected resolution failures stay errors.
fn map_failure(error: ResolutionError, solve_time: f64) -> Result<RawOutcome> {
    match error {
        ResolutionError::Infeasible => Ok(RawOutcome::without_solution(
            SolveStatus::Infeasible,
            solve_time,
        )),
        ResolutionError::Unbounded => Ok(RawOutcome::without_solution(
            SolveStatus::Unbounded,
            solve_time,
        )),
        ResolutionError::Other("Stopped") => Ok(RawOutcome::without_solution(
            SolveStatus::Feasible,
            solve_time,
        )),
        other => Err(SolverError::ExecutionFailed(format!("{other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_limit_stop_is_feasible_data_not_an_error() {
        let outcome = map_failure(ResolutionError::Other("Stopped"), 0.5).unwrap();
        assert_eq!(outcome.status, SolveStatus::Feasible);
        assert_eq!(outcome.objective, None);
        assert_eq!(outcome.values, None);
        assert_eq!(outcome.solve_time, 0.5);
    }

    #[test]
    fn infeasible_and_unbounded_map_to_statuses() {
        let outcome = map_failure(ResolutionError::Infeasible, 0.1).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);

        let outcome = map_failure(ResolutionError::Unbounded, 0.1).unwrap();
        assert_eq!(outcome.status, SolveStatus::Unbounded);
    }

    #[test]
    fn unexpected_failures_stay_errors() {
        let result = map_failure(ResolutionError::Other("NumericalIssues"), 0.1);
        assert!(matches!(result, Err(SolverError::ExecutionFailed(_))));
    }
}
