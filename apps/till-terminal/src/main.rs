//! # Till Terminal Entry Point
//!
//! ```text
//! till [--config till.toml] [--tax-rate 8.25]
//! ```
//!
//! Exit code 0 after `quit` or end of input, 1 if startup fails.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "till", version, about = "Point-of-sale cart and inventory terminal")]
struct Cli {
    /// TOML config file (store name, tax rate, catalog)
    #[arg(long, env = "TILL_CONFIG")]
    config: Option<PathBuf>,

    /// Tax rate as a percentage, e.g. 13 or 8.25
    #[arg(long, env = "TILL_TAX_RATE")]
    tax_rate: Option<f64>,
}

fn main() {
    let cli = Cli::parse();
    till_terminal::init_tracing();

    if let Err(err) = till_terminal::run(cli.config.as_deref(), cli.tax_rate) {
        error!(error = %err, "Till terminal stopped");
        eprintln!("till: {}", err);
        process::exit(1);
    }
}
