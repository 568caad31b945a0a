mod config;
mod dataset;
mod llm_client;
mod suggestion;

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dataset::append::append_resources;
use crate::dataset::filter::filter_resources;
use crate::dataset::risk::RiskLevel;
use crate::dataset::{
    load_resources, Row, Table, CONTACT_COLUMN, LOCATION_COLUMN, NAME_COLUMN, RISK_COLUMN,
    SPECIALTY_COLUMN,
};
use crate::llm_client::LlmClient;
use crate::suggestion::{generate_suggestion, stamp_records, Suggestion};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first: a missing OPENAI_API_KEY ends the run here
    // with a non-zero exit, before any other work.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Resource finder v{}", env!("CARGO_PKG_VERSION"));

    // Dataset must load before the user is asked anything; a missing or
    // corrupt file aborts the run gracefully.
    let path = Path::new(&config.resource_file);
    let resources = match load_resources(path) {
        Ok(table) => table,
        Err(e) => {
            error!("Resource file could not be loaded: {e}");
            return Ok(());
        }
    };
    info!(
        "Loaded {} resources from {}",
        resources.rows.len(),
        config.resource_file
    );

    let llm = LlmClient::new(config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let location = prompt("Enter your location (e.g., city or state): ")?;
    let specialty = prompt(
        "Enter the type of support you need (e.g., Anxiety, Depression, Crisis Intervention): ",
    )?;

    match dispatch(&resources, &location, &specialty) {
        Action::Display(matches) => {
            for row in &matches {
                println!("{}", format_resource(row));
            }
        }
        Action::Suggest { risk_level } => {
            println!("No resources found for the specified criteria in your area.");

            match generate_suggestion(&llm, &location, &specialty, risk_level).await {
                Suggestion::Structured(mut records) => {
                    println!("{}", serde_json::to_string_pretty(&records)?);

                    if !records.is_empty() {
                        stamp_records(&mut records, &location, &specialty, risk_level);
                        match append_resources(path, &records) {
                            Ok(()) => {
                                println!("Appended new resources to {}.", config.resource_file)
                            }
                            Err(e) => {
                                error!("Failed to append data to {}: {e}", config.resource_file);
                                println!(
                                    "Note: the suggested resources could not be saved to {}.",
                                    config.resource_file
                                );
                            }
                        }
                    }
                }
                Suggestion::Unstructured(text) => println!("{text}"),
            }
        }
    }

    Ok(())
}

/// What the driver does after filtering: show the matches, or fall back to
/// one suggestion request.
#[derive(Debug, Clone, PartialEq)]
enum Action {
    Display(Vec<Row>),
    Suggest { risk_level: RiskLevel },
}

/// Decides between displaying local matches and requesting a suggestion.
/// With no matching row there is no personalized data value, so the
/// suggestion carries the default band.
fn dispatch(resources: &Table, location: &str, specialty: &str) -> Action {
    let matches = filter_resources(resources, location, specialty);
    if matches.is_empty() {
        Action::Suggest {
            risk_level: RiskLevel::Normal,
        }
    } else {
        Action::Display(matches)
    }
}

/// Formats one matching resource as a labeled block.
fn format_resource(row: &Row) -> String {
    let mut block = String::new();
    for column in [
        NAME_COLUMN,
        "Type",
        LOCATION_COLUMN,
        SPECIALTY_COLUMN,
        CONTACT_COLUMN,
        RISK_COLUMN,
    ] {
        block.push_str(column);
        block.push_str(": ");
        block.push_str(row.get(column).map(String::as_str).unwrap_or(""));
        block.push('\n');
    }
    block
}

/// Reads one free-text line from stdin. No validation, no retry.
fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}
