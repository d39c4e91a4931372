//! Processed-table export

use polars::prelude::*;
use std::fs;
use std::path::Path;

use crate::error::EtlError;

/// Write the final table as headered CSV, preserving column order
///
/// The write is all-or-nothing: the table is serialized to a staging file
/// next to the destination and renamed into place, so a failed run never
/// leaves a partial artifact at `path`. No synthetic row index is emitted.
pub fn write_table(df: &mut DataFrame, path: &Path) -> crate::Result<()> {
    let staging = path.with_extension("tmp");

    let result = fs::File::create(&staging)
        .map_err(|e| e.to_string())
        .and_then(|file| {
            CsvWriter::new(file)
                .include_header(true)
                .finish(df)
                .map_err(|e| e.to_string())
        })
        .and_then(|_| fs::rename(&staging, path).map_err(|e| e.to_string()));

    if let Err(reason) = result {
        let _ = fs::remove_file(&staging);
        return Err(EtlError::Write {
            path: path.to_path_buf(),
            reason,
        });
    }

    Ok(())
}
