use moor_cli::commands::{self, Cli};
use moor_cli::logger;

use clap::Parser;
use log::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = logger::level_from_verbosity(cli.verbose);
    if let Err(error) = logger::initialize(level, cli.log_file.as_deref()) {
        eprintln!("{error}");
        std::process::exit(1);
    }

    debug!("Logger initialized with level: {level:?}");

    if let Err(error) = commands::run(cli.command).await {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
