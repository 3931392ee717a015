//! # NovaTime Entry Point
//!
//! Parses the command line, initializes logging and hands off to
//! [`storefront::run`].

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = storefront::Cli::parse();
    storefront::init_tracing();

    if let Err(e) = storefront::run(cli).await {
        tracing::error!("Command failed: {e}");
        eprintln!("novatime: {e}");
        std::process::exit(1);
    }
}
