// Infrastructure: HTTP routing and server lifecycle
// Handlers hand each request to a blocking task; the solver never runs on the async workers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use crate::application::dto::{
    AssignmentRequest, AssignmentResponse, AvailableSolversResponse, CustomProblemRequest,
    CustomProblemResponse, GraphicalRequest, GraphicalResponse, SimplexProblemRequest,
    SimplexProblemResponse, TransportRequest, TransportResponse,
};
use crate::application::{OptimizationService, ServiceError};
use crate::domain::solver_service::SolverService;

pub struct ServerConfig {
    pub address: SocketAddr,
    pub solver: Arc<dyn SolverService>,
}

impl ServerConfig {
    pub fn new(address: SocketAddr, solver: Arc<dyn SolverService>) -> Self {
        Self { address, solver }
    }
}

type SharedService = Arc<OptimizationService>;

/// Build the API router around a solver
pub fn create_router(solver: Arc<dyn SolverService>) -> Router {
    let service: SharedService = Arc::new(OptimizationService::new(solver));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/solvers", get(handle_solvers))
        .route("/api/solve_custom", post(handle_solve_custom))
        .route("/api/solve_simplex", post(handle_solve_simplex))
        .route("/api/solve_transport", post(handle_solve_transport))
        .route("/api/solve_assignment", post(handle_solve_assignment))
        .route("/api/solve_graphical", post(handle_solve_graphical))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let solver_name = config.solver.name().to_string();
    let router = create_router(config.solver);
    let listener = tokio::net::TcpListener::bind(config.address).await?;

    print_banner(&config.address, &solver_name);
    tracing::info!(address = %config.address, solver = %solver_name, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Run a use case on the blocking pool
async fn run_blocking<T, F>(service: SharedService, job: F) -> Result<Json<T>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&OptimizationService) -> Result<T, ServiceError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || job(&service)).await?;
    Ok(Json(result?))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn handle_solvers(State(service): State<SharedService>) -> Json<AvailableSolversResponse> {
    Json(service.available_solvers())
}

async fn handle_solve_custom(
    State(service): State<SharedService>,
    payload: Result<Json<CustomProblemRequest>, JsonRejection>,
) -> Result<Json<CustomProblemResponse>, ApiError> {
    let Json(request) = payload?;
    run_blocking(service, move |s| s.solve_custom(request)).await
}

async fn handle_solve_simplex(
    State(service): State<SharedService>,
    payload: Result<Json<SimplexProblemRequest>, JsonRejection>,
) -> Result<Json<SimplexProblemResponse>, ApiError> {
    let Json(request) = payload?;
    run_blocking(service, move |s| s.solve_simplex(request)).await
}

async fn handle_solve_transport(
    State(service): State<SharedService>,
    payload: Result<Json<TransportRequest>, JsonRejection>,
) -> Result<Json<TransportResponse>, ApiError> {
    let Json(request) = payload?;
    run_blocking(service, move |s| s.solve_transport(request)).await
}

async fn handle_solve_assignment(
    State(service): State<SharedService>,
    payload: Result<Json<AssignmentRequest>, JsonRejection>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let Json(request) = payload?;
    run_blocking(service, move |s| s.solve_assignment(request)).await
}

async fn handle_solve_graphical(
    State(service): State<SharedService>,
    payload: Result<Json<GraphicalRequest>, JsonRejection>,
) -> Result<Json<GraphicalResponse>, ApiError> {
    let Json(request) = payload?;
    run_blocking(service, move |s| s.solve_graphical(request)).await
}

fn print_banner(address: &SocketAddr, solver: &str) {
    println!("\n+-----------------------------------------------------------+");
    println!("|  opsolve - Operations Research Solver API                 |");
    println!("+-----------------------------------------------------------+");
    println!("|  Powered by: {:44} |", solver);
    println!("|  Listening on: http://{:35} |", address);
    println!("+-----------------------------------------------------------+");
    println!("|  Endpoints:                                               |");
    println!("|    POST /api/solve_custom      Linear programming         |");
    println!("|    POST /api/solve_simplex     LP sensitivity report      |");
    println!("|    POST /api/solve_transport   Transportation problem     |");
    println!("|    POST /api/solve_assignment  Assignment problem         |");
    println!("|    POST /api/solve_graphical   Two-variable graphical LP  |");
    println!("|    GET  /api/solvers           Active solver backend      |");
    println!("+-----------------------------------------------------------+\n");
}
