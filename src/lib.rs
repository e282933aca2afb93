// Domain layer: problem families, formulation and plot geometry
pub mod domain;

// Application layer: wire types and use-case orchestration
pub mod application;

// Infrastructure layer: HTTP server, configuration and logging
#[cfg(feature = "server")]
pub mod infrastructure;

// Solver adapters: Concrete implementations of SolverService
#[cfg(feature = "server")]
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintType, Formulation, ObjectiveFunction, OptimizationProblem,
    OptimizationType, Solution, SolutionStatus, SolverBackend, SolverConfig, SolverError,
    SolverService, Variable, VariableType,
};

pub use application::{OptimizationService, ServiceError};

#[cfg(feature = "server")]
pub use infrastructure::{create_router, start_server, AppConfig, ServerConfig};

#[cfg(feature = "server")]
pub use solver::{HighsSolver, SolverFactory};

#[cfg(feature = "coin_cbc")]
pub use solver::CoinCbcSolver;
