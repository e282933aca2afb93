use crate::domain::{
    models::SolverConfig,
    solver_service::{Result, SolverService},
    value_objects::SolverBackend,
};
use crate::solver::HighsSolver;
use std::sync::Arc;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create the solver described by the configuration
    pub fn from_config(config: &SolverConfig) -> Result<Arc<dyn SolverService>> {
        Self::create_from_backend(config.backend, config.verbose)
    }

    /// Create a solver for a specific backend
    pub fn create_from_backend(
        backend: SolverBackend,
        verbose: bool,
    ) -> Result<Arc<dyn SolverService>> {
        match backend {
            SolverBackend::Auto | SolverBackend::Highs => {
                Ok(Arc::new(HighsSolver::new().with_verbose(verbose)))
            }
            SolverBackend::CoinCbc => Self::coin_cbc(verbose),
        }
    }

    #[cfg(feature = "coin_cbc")]
    fn coin_cbc(verbose: bool) -> Result<Arc<dyn SolverService>> {
        Ok(Arc::new(crate::solver::CoinCbcSolver::new().with_verbose(verbose)))
    }

    #[cfg(not(feature = "coin_cbc"))]
    fn coin_cbc(_verbose: bool) -> Result<Arc<dyn SolverService>> {
        Err(crate::domain::SolverError::SolverNotAvailable(
            "COIN-OR CBC support is not compiled in (build with the `coin_cbc` feature)"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(not(feature = "coin_cbc"))]
    use crate::domain::SolverError;

    #[test]
    fn auto_selects_highs() {
        let solver = SolverFactory::create_from_backend(SolverBackend::Auto, false).unwrap();
        assert_eq!(solver.name(), "HiGHS");
        assert!(solver.supports_duals());
    }

    #[test]
    fn explicit_highs_backend() {
        let config = SolverConfig {
            backend: SolverBackend::Highs,
            verbose: true,
        };
        let solver = SolverFactory::from_config(&config).unwrap();
        assert_eq!(solver.name(), "HiGHS");
        assert!(solver.supports_mip());
    }

    #[cfg(not(feature = "coin_cbc"))]
    #[test]
    fn cbc_without_feature_is_unavailable() {
        let result = SolverFactory::from_config(&SolverConfig {
            backend: SolverBackend::CoinCbc,
            verbose: false,
        });
        assert!(matches!(result, Err(SolverError::SolverNotAvailable(_))));
    }
}
