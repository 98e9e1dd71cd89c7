//! Garden Validator CLI
//!
//! Validates garden and plant files against the embedded contracts.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use garden_schemas::config::OutputFormat;
use garden_schemas::{ContractKind, ContractValidator, GardenConfig, ValidationReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "garden-validator")]
#[command(about = "Validate garden and plant records against their contracts")]
struct Cli {
    /// Path to a config file (garden.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a garden record file
    Garden {
        /// Garden file (defaults to data.garden_file from config)
        file: Option<PathBuf>,
    },

    /// Validate plant files
    Plants {
        /// Plant files to validate
        files: Vec<PathBuf>,
        /// Validate every *.json file under a directory instead
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Generate a machine-readable validation report
    Report {
        /// Garden file (defaults to data.garden_file from config)
        #[arg(short, long)]
        garden: Option<PathBuf>,
        /// Plants directory (defaults to data.plants_dir from config)
        #[arg(short, long)]
        plants: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print an embedded contract document
    Contract {
        /// Which contract (garden or plant)
        kind: ContractKind,
        /// Print only the SHA256 fingerprint
        #[arg(long)]
        fingerprint: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = GardenConfig::load_from(cli.config.as_deref())?;
    let validator = ContractValidator::new()?;

    match cli.command {
        Commands::Garden { file } => {
            let path = file
                .or_else(|| config.data.garden_file.clone())
                .context("No garden file given and none configured")?;

            let instance: serde_json::Value = serde_json::from_str(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
            )?;
            let report = validator.validate_garden(&instance);

            print_file_report(&path, &report);
            if !report.is_valid() {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Plants { files, dir } => {
            let paths = match dir {
                Some(dir) => plant_paths(&dir)?,
                None => files,
            };
            if paths.is_empty() {
                bail!("No plant files to validate");
            }

            let mut all_valid = true;
            for path in &paths {
                let instance: serde_json::Value =
                    serde_json::from_str(&std::fs::read_to_string(path)?)?;
                let report = validator.validate_plant(&instance);

                print_file_report(path, &report);
                if !report.is_valid() {
                    all_valid = false;
                    if config.validation.fail_fast {
                        break;
                    }
                }
            }

            if !all_valid {
                std::process::exit(1);
            }
            println!();
            println!("✅ {} plant file(s) valid", paths.len());
            Ok(())
        }

        Commands::Report {
            garden,
            plants,
            output,
        } => {
            let garden_file = garden.or_else(|| config.data.garden_file.clone());
            let plants_dir = plants.unwrap_or_else(|| config.data.plants_dir.clone());

            let mut files = serde_json::Map::new();
            let mut all_valid = true;

            if let Some(path) = &garden_file {
                let instance: serde_json::Value =
                    serde_json::from_str(&std::fs::read_to_string(path)?)?;
                let report = validator.validate_garden(&instance);
                all_valid &= report.is_valid();
                files.insert(path.display().to_string(), serde_json::to_value(&report)?);
            }

            for path in plant_paths(&plants_dir)? {
                let instance: serde_json::Value =
                    serde_json::from_str(&std::fs::read_to_string(&path)?)?;
                let report = validator.validate_plant(&instance);
                all_valid &= report.is_valid();
                files.insert(path.display().to_string(), serde_json::to_value(&report)?);
            }

            let report = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "contracts": {
                    "garden": validator.contract(ContractKind::Garden).fingerprint().to_string(),
                    "plant": validator.contract(ContractKind::Plant).fingerprint().to_string(),
                },
                "valid": all_valid,
                "files": files,
            });

            let report_json = match config.validation.output_format {
                OutputFormat::Pretty => serde_json::to_string_pretty(&report)?,
                OutputFormat::Compact => serde_json::to_string(&report)?,
            };

            if let Some(path) = output {
                std::fs::write(&path, &report_json)?;
                println!("✅ Report written to {:?}", path);
            } else {
                println!("{}", report_json);
            }

            if !all_valid {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Contract { kind, fingerprint } => {
            let contract = validator.contract(kind);
            if fingerprint {
                println!("{}", contract.fingerprint());
            } else {
                println!("{}", serde_json::to_string_pretty(&contract.document)?);
            }
            Ok(())
        }
    }
}

fn print_file_report(path: &std::path::Path, report: &ValidationReport) {
    if report.is_valid() {
        println!("✅ {} - valid", path.display());
    } else {
        println!(
            "❌ {} - {} violation(s)",
            path.display(),
            report.violations.len()
        );
        for violation in &report.violations {
            println!("   └─ {}", violation);
        }
    }
}

fn plant_paths(dir: &std::path::Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths: Vec<_> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    paths.sort();
    Ok(paths)
}
