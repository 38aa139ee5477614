use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use lookout_core::LookoutConfig;
use lookout_review::github::GitHubClient;
use lookout_review::handler::ReviewHandler;
use lookout_review::llm::LlmClient;
use lookout_server::AppState;
use miette::{Context, IntoDiagnostic, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lookout",
    version,
    about = "Webhook-triggered AI reviews for GitHub pull requests",
    long_about = "Lookout reviews GitHub pull requests with an LLM.\n\n\
                   It listens for pull_request webhook deliveries, fetches the diff of a\n\
                   newly opened PR, asks the reasoning service for a review, and posts the\n\
                   result back as a PR comment.\n\n\
                   Credentials come from lookout.toml or the GITHUB_TOKEN and\n\
                   ANTHROPIC_API_KEY environment variables; the server refuses to start\n\
                   without them.\n\n\
                   Examples:\n  \
                     lookout                         Serve on the configured port (default 8080)\n  \
                     lookout --port 3000             Override the listen port\n  \
                     lookout --config /etc/lookout.toml"
)]
struct Cli {
    /// Path to configuration file (default: lookout.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LookoutConfig::from_file(path)
            .into_diagnostic()
            .wrap_err(format!("failed to load {}", path.display()))?,
        None => {
            let default_path = std::path::Path::new("lookout.toml");
            if default_path.exists() {
                LookoutConfig::from_file(default_path)
                    .into_diagnostic()
                    .wrap_err("failed to load lookout.toml")?
            } else {
                LookoutConfig::default()
            }
        }
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // Credentials resolve once here; missing ones keep the server from starting.
    let github = GitHubClient::new(&config.github)
        .into_diagnostic()
        .wrap_err("GitHub client setup failed")?;
    let llm = LlmClient::new(&config.llm)
        .into_diagnostic()
        .wrap_err("LLM client setup failed")?;

    let handler = ReviewHandler::new(Arc::new(github), Arc::new(llm));
    let state = AppState {
        handler: Arc::new(handler),
    };

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server.port));
    tracing::info!(model = %config.llm.model, port = config.server.port, "starting lookout");

    lookout_server::serve(state, addr).await.into_diagnostic()?;

    Ok(())
}
