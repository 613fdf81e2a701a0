//! Agreement CLI
//!
//! Runs the form pipeline on a JSON file of raw field values.
//!
//! # Usage
//!
//! ```bash
//! agreement_cli preview form.json
//! agreement_cli payload form.json
//! agreement_cli submit form.json --out ./ALL_AGREEMENTS
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use rental_agreement::form::{build_payload, render_preview, FormRecord};
use rental_agreement::submission::{DirectorySink, SubmissionClient};
use rental_agreement::{FormConfig, FormSession, SubmitOutcome};

#[derive(Parser)]
#[command(name = "agreement_cli")]
#[command(about = "Rental agreement form pipeline", long_about = None)]
struct Cli {
    /// Generation endpoint URL
    #[arg(long, env = "GENERATOR_URL")]
    generator_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the raw values as they would appear in the preview
    Preview { form: PathBuf },
    /// Print the payload that would be submitted
    Payload { form: PathBuf },
    /// Validate, submit and save the generated agreement
    Submit {
        form: PathBuf,
        /// Directory to save the file in
        #[arg(long, env = "DOWNLOAD_DIR")]
        out: Option<PathBuf>,
    },
}

fn read_form(path: &Path) -> Result<FormRecord> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a flat JSON object of strings", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = FormConfig::from_env()?;
    if let Some(url) = cli.generator_url {
        config.generator_url = url;
    }

    match cli.command {
        Commands::Preview { form } => {
            let record = read_form(&form)?;
            println!("{}", render_preview(&record).to_text());
        }
        Commands::Payload { form } => {
            let record = read_form(&form)?;
            println!("{}", serde_json::to_string_pretty(&build_payload(&record))?);
        }
        Commands::Submit { form, out } => {
            let record = read_form(&form)?;
            let sink = DirectorySink::new(out.unwrap_or_else(|| config.download_dir.clone()));
            let client = SubmissionClient::new(config.generator_url.clone(), reqwest::Client::new());
            let mut session = FormSession::with_record(&config, record);

            match session.submit(&client, &sink).await {
                SubmitOutcome::Delivered { location, .. } => {
                    if let Some(toast) = session.toast().current() {
                        println!("{}", toast.message);
                    }
                    println!("{}", location);
                }
                SubmitOutcome::Invalid(errors) => bail!("form is invalid:\n{}", errors.summary()),
                SubmitOutcome::Busy => bail!("a submission is already in progress"),
                SubmitOutcome::Failed(e) => bail!(e.user_message()),
            }
        }
    }

    Ok(())
}
