use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use model::FilterGroup;
use query_filter::{Dialect, FilterBuilder};
use std::{io::Read, str::FromStr};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "filterc", version = "0.1.0", about = "Filter tree compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            file,
            dialect,
            named,
            output,
        } => {
            let dialect = parse_dialect(&dialect)?;
            info!("Compiling filter: {}, dialect: {}", file, dialect);

            let tree = load_filter(&file)?;
            let builder = FilterBuilder::new(dialect)?;
            let compiled = builder.build(&tree)?;

            let json = output::render_json(&compiled, builder.format(), named)?;
            output::write_output(&json, output.as_deref())?;
        }
        Commands::Operators { dialect } => {
            let dialect = parse_dialect(&dialect)?;
            for operator in dialect.default_transformers()?.operators() {
                println!("{operator}");
            }
        }
    }

    Ok(())
}

fn parse_dialect(name: &str) -> Result<Dialect, CliError> {
    Dialect::from_str(name).map_err(|_| CliError::InvalidDialect(name.to_string()))
}

fn load_filter(path: &str) -> Result<FilterGroup, CliError> {
    let source = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&source)?)
}
