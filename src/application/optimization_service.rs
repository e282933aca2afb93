// Use cases: formulate -> solve -> interpret, one per problem family
// Every call is independent; the only shared value is the stateless solver.

use std::sync::Arc;

use tracing::{debug, info, info_span};

use super::dto::{
    AssignmentRequest, AssignmentResponse, AvailableSolversResponse, CustomProblemRequest,
    CustomProblemResponse, GraphicalRequest, GraphicalResponse, SimplexProblemRequest,
    SimplexProblemResponse, SolverInfoDto, TransportRequest, TransportResponse,
};
use super::mappers;
use crate::domain::{
    Formulation, FormulationError, InterpretationError, SolverError, SolverService,
};

/// Anything that can stop a request from producing a result bundle
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    Formulation(#[from] FormulationError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Inconsistent solver output: {0}")]
    Interpretation(#[from] InterpretationError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

pub struct OptimizationService {
    solver: Arc<dyn SolverService>,
}

impl OptimizationService {
    pub fn new(solver: Arc<dyn SolverService>) -> Self {
        Self { solver }
    }

    /// Formulate, solve and interpret one problem
    pub fn run<F: Formulation>(&self, formulation: &F) -> Result<F::Report> {
        let problem = formulation.formulate();

        let span = info_span!(
            "solve",
            problem = %problem.name,
            solver = self.solver.name(),
            variables = problem.num_variables(),
            constraints = problem.constraints.len(),
        );
        let _guard = span.enter();

        debug!("model formulated");
        let solution = self.solver.solve(&problem)?;
        let stats = &solution.statistics;
        info!(
            status = %solution.status,
            objective = ?solution.optimal_value,
            solve_time_ms = stats.solve_time_ms,
            binary_vars = stats.num_binary_vars,
            "{}",
            solution.message
        );

        Ok(formulation.interpret(&solution)?)
    }

    pub fn solve_custom(&self, request: CustomProblemRequest) -> Result<CustomProblemResponse> {
        let program = mappers::custom_request_to_program(request)?;
        let report = self.run(&program)?;
        Ok(mappers::linear_report_to_custom_response(report))
    }

    pub fn solve_simplex(&self, request: SimplexProblemRequest) -> Result<SimplexProblemResponse> {
        let program = mappers::simplex_request_to_program(request)?;
        let report = self.run(&program)?;
        Ok(mappers::linear_report_to_simplex_response(report))
    }

    pub fn solve_transport(&self, request: TransportRequest) -> Result<TransportResponse> {
        let problem = mappers::transport_request_to_problem(request)?;
        let report = self.run(&problem)?;
        Ok(mappers::transport_report_to_response(report))
    }

    pub fn solve_assignment(&self, request: AssignmentRequest) -> Result<AssignmentResponse> {
        let problem = mappers::assignment_request_to_problem(request)?;
        let report = self.run(&problem)?;
        Ok(mappers::assignment_report_to_response(report))
    }

    pub fn solve_graphical(&self, request: GraphicalRequest) -> Result<GraphicalResponse> {
        let problem = mappers::graphical_request_to_problem(request)?;
        let report = self.run(&problem)?;
        Ok(mappers::graphical_report_to_response(report))
    }

    pub fn available_solvers(&self) -> AvailableSolversResponse {
        AvailableSolversResponse {
            solvers: vec![SolverInfoDto {
                name: self.solver.name().to_string(),
                active: true,
                supports_mip: self.solver.supports_mip(),
                supports_duals: self.solver.supports_duals(),
            }],
        }
    }
}
