//! Project Evaluation dashboard server
//!
//! Serves the NPV/IRR dashboard on a local address until interrupted.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;

use project_evaluation::server::{Server, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};

#[derive(Parser, Debug)]
#[command(name = "project_evaluation", version, about = "NPV/IRR project evaluation dashboard")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Debug logging and a state dump on the page
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ServerConfig::new(args.host, args.port, args.debug)
        .context("Invalid server configuration")?;

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level())).init();

    log::info!("Project Evaluation v{}", project_evaluation::VERSION);

    let server = Server::new(config)?;
    server.run().await.context("Server stopped")
}
