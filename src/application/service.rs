// Orchestration: lower the model once, dispatch to a backend, normalize

use log::{debug, info};

use crate::domain::{
    compiler::Result,
    dataset::Dataset,
    model::{ConstraintModel, SolveConfig},
    outcome::{normalize, SolveResult},
    program::LinearProgram,
    value_objects::BackendKind,
};
use crate::solver::SolverFactory;

/// Entry point for solving a constraint model against a dataset.
///
/// Every solve builds a fresh backend instance and a fresh set of solver
/// objects; nothing is shared or pooled across calls, and compare mode runs
/// its solves sequentially and independently.
pub struct OptimizationService;

impl OptimizationService {
    pub fn new() -> Self {
        Self
    }

    /// Solve with one backend. A backend missing from this build yields a
    /// result with `SolveStatus::Unavailable`, not an error.
    pub fn solve(
        &self,
        data: &Dataset,
        model: &ConstraintModel,
        backend: BackendKind,
        config: &SolveConfig,
    ) -> Result<SolveResult> {
        let program = model.lower(data)?;
        self.dispatch(&program, backend, config)
    }

    /// Run every known backend once per supplied config, in order.
    ///
    /// Passing one config gives the plain side-by-side comparison; passing
    /// two (say, a tight time limit and no limit) gives the early-stop
    /// versus full-optimal comparison.
    pub fn compare(
        &self,
        data: &Dataset,
        model: &ConstraintModel,
        configs: &[SolveConfig],
    ) -> Result<Vec<SolveResult>> {
        let program = model.lower(data)?;
        let mut results = Vec::with_capacity(BackendKind::ALL.len() * configs.len());

        for backend in BackendKind::ALL {
            for config in configs {
                results.push(self.dispatch(&program, backend, config)?);
            }
        }
        Ok(results)
    }

    fn dispatch(
        &self,
        program: &LinearProgram,
        backend: BackendKind,
        config: &SolveConfig,
    ) -> Result<SolveResult> {
        let Some(solver) = SolverFactory::create(backend) else {
            debug!("backend {backend} not compiled in, reporting unavailable");
            return Ok(SolveResult::unavailable(backend));
        };

        info!(
            "solving {} variables / {} constraints with {}",
            program.variables.len(),
            program.constraints.len(),
            solver.name()
        );

        let raw = solver.solve(program, config)?;
        let result = normalize(backend, raw, program.rows, program.is_mixed_integer());
        info!(
            "{}: {} in {:.3}s",
            solver.name(),
            result.status,
            result.solve_time
        );
        Ok(result)
    }
}

impl Default for OptimizationService {
    fn default() -> Self {
        Self::new()
    }
}
