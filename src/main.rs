//! CLI entry point for the arxiv-saver tool.

use anyhow::Result;
use arxiv_saver_core::{App, notify};
use clap::Parser;
use tracing::debug;

mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    if let Err(error) = run(args).await {
        notify::notify_failure(&error);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let app = App::new()?;

    match args.command {
        Command::Pdf(cmd) => {
            app.save_pdf(&cmd.url, cmd.title.as_deref(), &cmd.output_dir)
                .await
        }
        Command::Refs(cmd) => {
            app.save_references(
                &cmd.url,
                cmd.title.as_deref(),
                cmd.format.as_format(),
                &cmd.output_dir,
            )
            .await
        }
        Command::Info(cmd) => app.probe(&cmd.url).await,
        Command::Stats(cmd) => {
            app.show_stats(&cmd.output_dir);
            Ok(())
        }
    }
}
