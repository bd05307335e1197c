use crate::domain::{compiler::BackendCompiler, value_objects::BackendKind};
use std::sync::Arc;

/// Factory for creating solver instances from a backend selection
pub struct SolverFactory;

impl SolverFactory {
    /// Create the solver for `backend`, or `None` when that backend was
    /// compiled out of this build. Callers report the latter as an
    /// `Unavailable` result rather than an error.
    pub fn create(backend: BackendKind) -> Option<Arc<dyn BackendCompiler>> {
        match backend {
            #[cfg(feature = "cbc")]
            BackendKind::Cbc => Some(Arc::new(super::CbcSolver::new())),
            #[cfg(feature = "highs")]
            BackendKind::Highs => Some(Arc::new(super::HighsSolver::new())),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Backends available in this build
    pub fn available() -> Vec<BackendKind> {
        BackendKind::ALL
            .into_iter()
            .filter(|&backend| Self::create(backend).is_some())
            .collect()
    }
}
