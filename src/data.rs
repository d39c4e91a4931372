//! Source table loading and customer-level merging using Polars

use polars::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::EtlError;

/// Join key shared by all four source datasets
pub const JOIN_KEY: &str = "Customer ID";

/// Logical dataset names, in merge order (demographics is the join root)
pub const DATASETS: [&str; 4] = ["demographics", "location", "services", "status"];

/// The four segmented source datasets, loaded and keyed by `Customer ID`
#[derive(Debug)]
pub struct SourceTables {
    pub demographics: DataFrame,
    pub location: DataFrame,
    pub services: DataFrame,
    pub status: DataFrame,
}

impl SourceTables {
    /// Total rows across all four tables
    pub fn total_rows(&self) -> usize {
        self.demographics.height()
            + self.location.height()
            + self.services.height()
            + self.status.height()
    }
}

/// Resolve the on-disk path of a logical dataset under the base directory
pub fn resource_path(base_path: &Path, dataset: &str) -> PathBuf {
    base_path.join(format!("Telco_customer_churn_{dataset}.csv"))
}

/// Load the four input CSVs from the base directory
///
/// Fails with `ResourceNotFound` when a file is missing and `MalformedTable`
/// when a file cannot be parsed or lacks the `Customer ID` column.
pub fn load_tables(base_path: &Path) -> crate::Result<SourceTables> {
    Ok(SourceTables {
        demographics: read_table(&resource_path(base_path, "demographics"))?,
        location: read_table(&resource_path(base_path, "location"))?,
        services: read_table(&resource_path(base_path, "services"))?,
        status: read_table(&resource_path(base_path, "status"))?,
    })
}

fn read_table(path: &Path) -> crate::Result<DataFrame> {
    if !path.exists() {
        return Err(EtlError::ResourceNotFound(path.to_path_buf()));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| EtlError::MalformedTable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !df.get_column_names().iter().any(|name| name.as_str() == JOIN_KEY) {
        return Err(EtlError::MalformedTable {
            path: path.to_path_buf(),
            reason: format!("missing required column {JOIN_KEY:?}"),
        });
    }

    Ok(df)
}

/// Merge the four tables into one customer-level table
///
/// Performs three successive left outer joins on `Customer ID`, in fixed
/// order: demographics ⟕ location ⟕ services ⟕ status. Every demographics
/// row survives; columns from an absent right-side key are left null.
/// Non-key column names colliding with the accumulated left side are
/// suffixed with `_<dataset>`.
pub fn merge_tables(tables: &SourceTables) -> crate::Result<DataFrame> {
    let mut merged = tables.demographics.clone();

    for (dataset, right) in [
        ("location", &tables.location),
        ("services", &tables.services),
        ("status", &tables.status),
    ] {
        let mut args =
            JoinArgs::new(JoinType::Left).with_suffix(Some(format!("_{dataset}").into()));
        args.maintain_order = MaintainOrderJoin::Left;

        merged = merged
            .lazy()
            .join(right.clone().lazy(), [col(JOIN_KEY)], [col(JOIN_KEY)], args)
            .collect()?;
    }

    Ok(merged)
}
