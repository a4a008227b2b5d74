use std::fs;
use std::path::PathBuf;

use clap::{Parser as ClapParser, ValueEnum};

use josd::parse;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Decodes a Java Object Serialization Stream (version 5) and prints its
/// top-level content items.
#[derive(ClapParser, Debug)]
#[command(name = "josd", version, about)]
struct Args {
    /// Path to the serialized stream to decode.
    path: PathBuf,

    /// Output rendering.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let data = fs::read(&args.path)?;
    let items = parse(&data)?;

    match args.format {
        OutputFormat::Text => {
            for item in &items {
                println!("{:#?}", item);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    Ok(())
}
