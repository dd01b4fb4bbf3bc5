use clap::Parser;
use unclutter::cli::{Cli, run_cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_cli(&cli.source, cli.config.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
