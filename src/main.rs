use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use company_financials::{PipelineConfig, process_financial_data, run};

#[derive(Parser)]
#[command(name = "company-financials", version, about = "Collect and consolidate company financial statements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve every company in INPUT (.xlsx/.xls/.ods or .csv) and write
    /// OUTPUT_DIR/consolidated_financial_data.csv.
    Collect {
        #[arg(default_value = "cleaned_state_data.xlsx")]
        input: PathBuf,
        #[arg(default_value = "financial_data_output")]
        output_dir: PathBuf,
    },
    /// Drop rows without figures from a consolidated CSV and sort it by company and date.
    Process {
        #[arg(default_value = "financial_data_output/consolidated_financial_data.csv")]
        input: PathBuf,
        #[arg(default_value = "processed_financial_data.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("company_financials=info")),
        )
        .init();

    match Cli::parse().command {
        Command::Collect { input, output_dir } => {
            let config = PipelineConfig::from_env().context("loading configuration")?;
            let summary = run(&config, &input, &output_dir)
                .await
                .with_context(|| format!("collecting financials for {}", input.display()))?;
            match summary.output {
                Some(path) => info!(
                    companies = summary.companies,
                    rows = summary.rows_written,
                    "wrote {}",
                    path.display()
                ),
                None => info!(companies = summary.companies, "no data to write"),
            }
        }
        Command::Process { input, output } => {
            let summary = process_financial_data(&input, &output)
                .with_context(|| format!("processing {}", input.display()))?;
            println!("Processed data has been written to {}", output.display());
            println!("\nCompanies with financial data:");
            for company in &summary.companies_with_data {
                println!("{company}");
            }
            println!("\nCompanies without financial data:");
            for company in &summary.companies_without_data {
                println!("{company}");
            }
        }
    }
    Ok(())
}
