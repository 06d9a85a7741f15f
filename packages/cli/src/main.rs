#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! One-shot CLI for the carbon fleet toolchain.
//!
//! Fetches the published survey sheet or reads a local spreadsheet,
//! prints the fleet summary, or starts the dashboard server.

use std::path::PathBuf;
use std::time::Instant;

use carbon_fleet_analytics::summarize;
use carbon_fleet_analytics_models::FleetSummary;
use carbon_fleet_footprint::enrich_all;
use carbon_fleet_source::sheet::PublishedSheet;
use carbon_fleet_source::workbook;
use carbon_fleet_survey_models::SurveyColumn;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "carbon_fleet_cli", about = "Carbon fleet survey toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the published survey sheet and print the fleet summary
    Fetch {
        /// Published CSV export URL (defaults to `SHEET_URL` or the
        /// built-in export)
        #[arg(long)]
        url: Option<String>,
    },
    /// Read a local spreadsheet and print the fleet summary
    Inspect {
        /// Path to an `.xlsx` / `.xls` file
        file: PathBuf,
    },
    /// List the required survey columns
    Columns,
    /// Start the dashboard API server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { url } => {
            let sheet = url.map_or_else(PublishedSheet::from_env, PublishedSheet::new);

            let start = Instant::now();
            let rows = sheet.fetch().await?;
            let vehicles = enrich_all(&rows);
            let elapsed = start.elapsed();

            log::info!(
                "Fetched {} vehicles in {:.1}s",
                vehicles.len(),
                elapsed.as_secs_f64()
            );
            print_summary(&summarize(&vehicles));
        }
        Commands::Inspect { file } => {
            let rows = workbook::read_spreadsheet_file(&file)?;
            let vehicles = enrich_all(&rows);

            log::info!("Read {} vehicles from {}", vehicles.len(), file.display());
            print_summary(&summarize(&vehicles));
        }
        Commands::Columns => {
            println!("Required survey columns:");
            for column in SurveyColumn::all() {
                println!("  {}", column.header());
            }
        }
        Commands::Serve => {
            // The server uses actix-web's runtime, so run it in a
            // blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(carbon_fleet_server::run_server())
            })
            .await??;
        }
    }

    Ok(())
}

fn print_summary(summary: &FleetSummary) {
    let ratio = |value: Option<f64>| {
        value.map_or_else(|| "n/a".to_owned(), |value| format!("{value:.2}"))
    };

    println!("Vehicles:               {}", summary.vehicle_count);
    println!(
        "Total footprint:        {:.2} kg CO2/month",
        summary.total_footprint_kg
    );
    println!(
        "Total distance:         {:.0} km/month",
        summary.total_monthly_distance_km
    );
    println!(
        "Avg monthly footprint:  {} kg CO2",
        ratio(summary.avg_monthly_footprint_kg)
    );
    println!(
        "Avg daily footprint:    {} kg CO2",
        ratio(summary.avg_daily_footprint_kg)
    );
    println!(
        "Environmental talks:    {}",
        summary
            .environmental_talk_share
            .map_or_else(|| "n/a".to_owned(), |share| format!("{:.1}%", share * 100.0))
    );

    if !summary.footprint_by_category.is_empty() {
        println!();
        println!("{:<24} KG CO2/MONTH", "CATEGORY");
        println!("{}", "-".repeat(40));
        for entry in &summary.footprint_by_category {
            println!("{:<24} {:.2}", entry.category, entry.footprint_kg);
        }
    }

    if !summary.footprint_by_fuel.is_empty() {
        println!();
        println!("{:<24} KG CO2/MONTH", "FUEL");
        println!("{}", "-".repeat(40));
        for entry in &summary.footprint_by_fuel {
            println!("{:<24} {:.2}", entry.fuel, entry.footprint_kg);
        }
    }
}
