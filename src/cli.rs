use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::client::{ClientConfig, DEFAULT_BASE_URL};
use crate::query::BoardType;
use crate::timestamp::Timestamp;

/// Boards API client
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "BOARDS_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API key sent as a bearer token
    #[arg(long, global = true, env = "BOARDS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a single page of boards
    SearchBoards {
        /// Filter by user nickname
        #[arg(long)]
        nickname: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page number
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
        page_size: u32,

        /// Write the response to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download every page of boards for a user
    DownloadAllBoards {
        /// User nickname
        #[arg(long)]
        nickname: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page size
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
        page_size: u32,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Filter by board type
    #[arg(long, value_enum)]
    pub board_type: Option<BoardType>,

    /// Boards created at or after this time (ISO-8601)
    #[arg(long)]
    pub created_from: Option<Timestamp>,

    /// Boards created at or before this time (ISO-8601)
    #[arg(long)]
    pub created_to: Option<Timestamp>,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            ..Default::default()
        }
    }
}
