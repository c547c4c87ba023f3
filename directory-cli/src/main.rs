use clap::Parser;

use crate::cli::Cli;
use crate::commands::Commands;
use crate::error::AppError;

mod cli;
mod commands;
mod error;
mod util;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Cli::parse();

    if let Err(err) = run(args).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<(), AppError> {
    match &args.command {
        Commands::Users(users) => users.run(&args.config).await,
        Commands::Link(link) => link.run(&args.config).await,
    }
}
