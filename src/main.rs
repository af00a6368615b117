mod cli;
mod client;
mod download;
mod error;
mod query;
mod timestamp;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{Cli, Command};
use crate::client::BoardsClient;
use crate::download::{DownloadRequest, StopReason};
use crate::query::SearchFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    // Failures are reported but do not change the exit status.
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = BoardsClient::new(cli.client_config())?;
    tracing::debug!("using endpoint {}", client.endpoint());

    match cli.command {
        Command::SearchBoards {
            nickname,
            filters,
            page,
            page_size,
            output,
        } => {
            let filter = SearchFilter {
                nickname,
                board_type: filters.board_type,
                created_from: filters.created_from,
                created_to: filters.created_to,
                page,
                page_size,
            };
            let content = client.search_boards(&filter).await?;

            if let Some(path) = output {
                tokio::fs::write(&path, &content)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("File saved to: {}", path.display());
            } else {
                println!("{}", String::from_utf8_lossy(&content));
            }
        }
        Command::DownloadAllBoards {
            nickname,
            output_dir,
            filters,
            page_size,
        } => {
            let request = DownloadRequest {
                nickname,
                output_dir,
                board_type: filters.board_type,
                created_from: filters.created_from,
                created_to: filters.created_to,
                page_size,
            };

            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
            pb.enable_steady_tick(std::time::Duration::from_millis(120));

            let summary = download::download_all_boards(&client, &request, &pb).await?;

            if let StopReason::Interrupted { page, error } = &summary.stop {
                tracing::warn!(
                    "download stopped at page {page} before reaching the end of results: {error}"
                );
                if let Some(path) = summary.pages.last() {
                    tracing::warn!("last saved page: {}", path.display());
                }
            }

            println!(
                "Downloaded {} files to {}",
                summary.files_written,
                request.output_dir.display()
            );
        }
    }

    Ok(())
}
