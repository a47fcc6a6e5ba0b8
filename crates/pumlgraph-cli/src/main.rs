//! Pumlgraph CLI - Parse PlantUML class diagrams into a JSON entity tree

mod cli;

use clap::Parser;
use pumlgraph::core::logging::init_logging;

fn main() {
    let cli_args = cli::Cli::parse();

    // Initialize logging early; the app reinitializes with CLI flags if needed
    if let Err(e) = init_logging(None, None) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let app = cli::PumlgraphApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
