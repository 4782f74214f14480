use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedloom::app::AppContext;
use feedloom::cli::{commands, Cli, Commands};
use feedloom::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path.clone())?,
        None => Config::load()?,
    };
    cli.apply(&mut config);

    let ctx = AppContext::new(config)?;

    match &cli.command {
        Commands::Feed { pages, .. } => {
            commands::show_feed(&ctx, cli.command.post_filter(), *pages, cli.json).await?;
        }
        Commands::Post { id } => {
            commands::show_post(&ctx, *id, cli.json).await?;
        }
        Commands::Comments { post_id } => {
            commands::show_comments(&ctx, *post_id, cli.json).await?;
        }
    }

    Ok(())
}
