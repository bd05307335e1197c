// HiGHS adapter, via the highs crate's RowProblem API

use crate::domain::{
    compiler::{BackendCompiler, Result, SolverError},
    model::SolveConfig,
    outcome::RawOutcome,
    program::LinearProgram,
    value_objects::{Direction, Relation, SolveStatus},
};
use highs::{HighsModelStatus, RowProblem, Sense};
use std::time::Instant;

/// Tolerance for vetting a limit-stop incumbent against the program
const FEASIBILITY_TOL: f64 = 1e-6;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendCompiler for HighsSolver {
    fn solve(&self, program: &LinearProgram, config: &SolveConfig) -> Result<RawOutcome> {
        self.validate(program)?;

        // Variables first, then constraint rows
        let mut pb = RowProblem::default();
        let mut cols = Vec::with_capacity(program.variables.len());

        for (def, &obj_coeff) in program.variables.iter().zip(&program.objective) {
            let upper = def.upper.unwrap_or(f64::INFINITY);
            let col = if def.kind.is_integer() {
                pb.add_integer_column(obj_coeff, def.lower..upper)
            } else {
                pb.add_column(obj_coeff, def.lower..upper)
            };
            cols.push(col);
        }

        for constraint in &program.constraints {
            let terms: Vec<_> = constraint
                .terms
                .iter()
                .filter(|&&(_, coeff)| coeff != 0.0)
                .map(|&(i, coeff)| (cols[i], coeff))
                .collect();

            match constraint.relation {
                Relation::LessEq => {
                    pb.add_row(..=constraint.rhs, &terms);
                }
                Relation::GreaterEq => {
                    pb.add_row(constraint.rhs.., &terms);
                }
                Relation::Equal => {
                    pb.add_row(constraint.rhs..=constraint.rhs, &terms);
                }
            }
        }

        let sense = match program.direction {
            Direction::Maximize => Sense::Maximise,
            Direction::Minimize => Sense::Minimise,
        };

        let mut model = pb.optimise(sense);
        model.set_option("output_flag", false);
        if let Some(limit) = config.time_limit {
            model.set_option("time_limit", limit);
        }
        if let Some(gap) = config.relative_gap {
            model.set_option("mip_rel_gap", gap);
        }

        // Only the solve itself is timed; model build is excluded
        let start = Instant::now();
        let solved = model.solve();
        let solve_time = start.elapsed().as_secs_f64();

        let extract = |status: SolveStatus, bound_known: bool| {
            let values = solved.get_solution().columns().to_vec();
            let objective: f64 = program
                .objective
                .iter()
                .zip(&values)
                .map(|(c, v)| c * v)
                .sum();

            RawOutcome {
                status,
                objective: Some(objective),
                values: Some(values),
                best_bound: bound_known.then_some(objective),
                solve_time,
            }
        };

        match solved.status() {
            HighsModelStatus::Optimal => Ok(extract(SolveStatus::Optimal, true)),
            // Search limit reached. HiGHS hands back a col-value array either
            // way and its Rust API does not say whether a primal incumbent
            // exists, so the values are vetted against the program itself:
            // a point that satisfies bounds, integrality and every constraint
            // row is a usable incumbent, anything else is reported without a
            // solution
            HighsModelStatus::ReachedTimeLimit | HighsModelStatus::ReachedIterationLimit => {
                let values = solved.get_solution().columns().to_vec();
                if program.satisfied_by(&values, FEASIBILITY_TOL) {
                    Ok(extract(SolveStatus::Feasible, false))
                } else {
                    Ok(RawOutcome::without_solution(
                        SolveStatus::Feasible,
                        solve_time,
                    ))
                }
            }
            HighsModelStatus::Infeasible => Ok(RawOutcome::without_solution(
                SolveStatus::Infeasible,
                solve_time,
            )),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => Ok(
                RawOutcome::without_solution(SolveStatus::Unbounded, solve_time),
            ),
            status => Err(SolverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {status:?}"
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
