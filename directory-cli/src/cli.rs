use std::path::PathBuf;

use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "directory-cli")]
#[clap(about = "Browse the user directory", long_about = None)]
pub struct Cli {
    #[clap(
        long,
        short,
        global = true,
        help = "JSON file with `url` and `api_key`; defaults to DIRECTORY_URL and DIRECTORY_API_KEY"
    )]
    pub config: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Commands,
}
