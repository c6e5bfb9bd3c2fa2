//! TemplateCheck CLI - validation driver
//!
//! Commands: templates, validate
//! Prints a human-readable report (JSON with --json)
//! Returns non-zero when any template fails validation

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use templatecheck_core::{report, TemplateCollection, Validator, ENGINE_VERSION};

#[derive(Parser)]
#[command(name = "templatecheck-cli")]
#[command(about = "TemplateCheck CLI - Environment Template Validator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the templates JSON file
    #[arg(short, long, default_value = "templates.json")]
    templates_file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List template names found in the collection
    Templates,

    /// Validate every template in the collection
    Validate {
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let collection = match TemplateCollection::load_from_file(&cli.templates_file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load templates: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Templates => {
            println!("Found {} templates:", collection.len());
            for template in collection.templates() {
                println!("  - {}", template.display_name());
            }
            ExitCode::SUCCESS
        }

        Commands::Validate { json } => {
            let mut validator = Validator::new();
            validator.validate_all(collection.templates());
            let result = validator.report();

            if json {
                println!("{}", serde_json::to_string_pretty(&result).unwrap());
            } else {
                println!("=== TemplateCheck v{} ===", ENGINE_VERSION);
                print!("{}", report::render(&result));
            }

            ExitCode::from(result.exit_code())
        }
    }
}
