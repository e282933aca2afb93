use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use opsolve::{start_server, AppConfig, ServerConfig, SolverFactory};

#[derive(Parser, Debug)]
#[command(name = "opsolve-server", version, about = "Operations research solver API")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind host, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Solver backend: auto, highs or coin_cbc
    #[arg(short, long)]
    solver: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    }
    .with_env_overrides()?;

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(solver) = cli.solver {
        config.solver.backend = solver;
    }

    config.logging.init();

    let solver = SolverFactory::from_config(&config.solver_config()?)?;
    tracing::info!(solver = solver.name(), "solver ready");

    start_server(ServerConfig::new(config.address()?, solver)).await
}
