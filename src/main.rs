use anyhow::Context;
use clap::{Parser, Subcommand};
use patient_mapper::config::Config;
use patient_mapper::{logging, AccessorSet, Mapper, TargetField};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "patient-map",
    about = "Map FHIR Patient resources onto tracked entity fields"
)]
struct Cli {
    /// TOML config file; built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Map a Patient JSON file and print the output record
    Map {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// List the output fields
    Fields,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    logging::init(&config.logging)?;

    match cli.cmd {
        Cmd::Map { input } => {
            tracing::info!("🔧 Mapping patient from {}", input.display());
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not JSON", input.display()))?;

            let accessors = AccessorSet::from_config(&config);
            let record = Mapper::new().map_json(&value, &accessors)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Cmd::Fields => {
            for field in TargetField::ALL {
                let kind = if field.is_attribute() { "attribute" } else { "slot" };
                println!("{}\t{}", field.name(), kind);
            }
            Ok(())
        }
    }
}
