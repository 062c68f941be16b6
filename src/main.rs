//! scm-onboarder - bulk-import source control hierarchies into Sonatype Lifecycle

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod hierarchy;
mod logging;
mod output;
mod reconcile;
mod sanitize;
mod scm;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.debug);

    match cli.command {
        Commands::Import(args) => cli::import::run(&args, cli.config.as_deref()).await,
        Commands::Completion { shell } => {
            cli::completions::print_completions(shell);
            Ok(())
        }
        Commands::Version => {
            println!("scm-onboarder version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
