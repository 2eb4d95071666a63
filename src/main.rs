//! Command-line tool for generating an OpenAPI document from JSON:API resources.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-resources [OPTIONS] <RESOURCE_DIR> [ROUTES_FILE]
//! ```
//!
//! # Examples
//!
//! Scan `app/resources` against the default `config/routes.rb`:
//! ```bash
//! openapi-from-resources app/resources
//! ```
//!
//! Write YAML to a custom file with debug logging:
//! ```bash
//! openapi-from-resources app/resources config/routes.rb -f yaml -o openapi.yaml -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_from_resources::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    // Initialize logger based on verbose flag
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI generator starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
