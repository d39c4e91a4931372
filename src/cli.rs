//! Command-line interface definitions and argument parsing

use clap::Parser;

/// Telco churn ETL pipeline: merge, clean, and feature-engineer customer data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing the four input CSV datasets
    #[arg(short, long, default_value = "data")]
    pub base_path: String,

    /// Output path for the processed customer table
    #[arg(short, long, default_value = "data/customer_churn_processed.csv")]
    pub output: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let args = Args::parse_from(["churnforge"]);
        assert_eq!(args.base_path, "data");
        assert_eq!(args.output, "data/customer_churn_processed.csv");
        assert!(!args.verbose);
    }

    #[test]
    fn test_explicit_arguments() {
        let args = Args::parse_from([
            "churnforge",
            "--base-path",
            "/tmp/telco",
            "--output",
            "/tmp/out.csv",
            "--verbose",
        ]);
        assert_eq!(args.base_path, "/tmp/telco");
        assert_eq!(args.output, "/tmp/out.csv");
        assert!(args.verbose);
    }
}
