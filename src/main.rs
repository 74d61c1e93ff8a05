//! drvup - NVIDIA GPU driver update checker and downloader CLI tool
//!
//! Checks whether the installed driver is outdated relative to the
//! latest published release and, if so, streams the installer to a
//! predictable local path with a textual progress bar.

use clap::Parser;
use drvup::cli::CliArgs;
use drvup::client::HttpClient;
use drvup::download::HttpDownloader;
use drvup::oracle::SmiOracle;
use drvup::orchestrator::UpdateOrchestrator;
use drvup::output;
use drvup::resolver::FeedResolver;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", output::failure_line(&e));
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("drvup v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Feed: {}", args.feed_url);
        eprintln!("Target: {}", args.resolve_download_dir()?.display());
        if args.check {
            eprintln!("Mode: check-only");
        }
    }

    let client = HttpClient::with_timeout(args.http_timeout())?;
    let oracle = SmiOracle::new(&args.query_cmd);
    let resolver = FeedResolver::new(client.clone(), &args.feed_url);
    let downloader = HttpDownloader::new(client, args.chunk_size)?;

    let orchestrator = UpdateOrchestrator::new(
        args.orchestrator_config()?,
        Box::new(oracle),
        Box::new(resolver),
        Box::new(downloader),
    );

    let outcome = orchestrator.run().await?;
    println!("{}", output::outcome_line(&outcome));

    Ok(ExitCode::SUCCESS)
}
