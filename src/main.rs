//! ChurnForge: Telco customer churn ETL pipeline
//!
//! This is the main entrypoint that orchestrates loading, merging,
//! cleaning, feature engineering, and export.

use anyhow::Result;
use churnforge::{clean, engineer_features, load_tables, merge_tables, write_table, Args};
use clap::Parser;
use polars::prelude::*;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if args.verbose {
        println!("ChurnForge - Telco Customer Churn ETL");
        println!("=====================================\n");
    }

    run_pipeline(&args)?;

    Ok(())
}

/// Run the full ETL pipeline: load, merge, clean, engineer, export
fn run_pipeline(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Load the four source datasets
    println!("Step 1: Loading source tables from: {}", args.base_path);
    let load_start = Instant::now();
    let tables = load_tables(Path::new(&args.base_path))?;
    println!("✓ Loaded 4 tables ({} rows total)", tables.total_rows());
    if args.verbose {
        println!("  Loading time: {:.2}s", load_start.elapsed().as_secs_f64());
        println!("  demographics: {} rows", tables.demographics.height());
        println!("  location:     {} rows", tables.location.height());
        println!("  services:     {} rows", tables.services.height());
        println!("  status:       {} rows", tables.status.height());
    }

    // Step 2: Merge into one customer-level table
    println!("\nStep 2: Merging on \"Customer ID\"");
    let merged = merge_tables(&tables)?;
    println!(
        "✓ Merged table: {} rows x {} columns",
        merged.height(),
        merged.width()
    );

    // Step 3: Clean and validate
    println!("\nStep 3: Cleaning and validating");
    let cleaned = clean(merged)?;
    println!("✓ Cleaned table validated ({} customers)", cleaned.height());

    // Step 4: Engineer analytical features
    println!("\nStep 4: Engineering features");
    let mut engineered = engineer_features(cleaned)?;
    println!("✓ Derived Revenue Per Month, High Value Customer, Engagement Score");

    // Step 5: Export the processed table
    println!("\nStep 5: Exporting to: {}", args.output);
    write_table(&mut engineered, Path::new(&args.output))?;
    println!("✓ Processed dataset written");

    // Summary statistics
    println!("\n=== Customer Statistics ===");
    let total = engineered.height();
    let churned = engineered
        .column("Churn Value")?
        .i32()?
        .sum()
        .unwrap_or(0);
    let high_value = engineered
        .column("High Value Customer")?
        .bool()?
        .sum()
        .unwrap_or(0);
    println!(
        "Churned customers:    {churned} ({:.1}%)",
        percentage(churned as usize, total)
    );
    println!(
        "High value customers: {high_value} ({:.1}%)",
        percentage(high_value as usize, total)
    );

    println!("\n=== Pipeline Complete ===");
    println!(
        "Total processing time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    println!("Output saved to: {}", args.output);

    Ok(())
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64) * 100.0
}
