//! ChurnForge: a Rust CLI pipeline for telco customer churn analysis
//!
//! This library unifies four segmented customer datasets into one
//! customer-level table, applies business-rule cleaning, and derives the
//! analytical features used for churn modeling.

pub mod cli;
pub mod data;
pub mod error;
pub mod export;
pub mod transform;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{load_tables, merge_tables, SourceTables};
pub use error::EtlError;
pub use export::write_table;
pub use transform::{clean, engineer_features};

/// Common result type used throughout the application
pub type Result<T> = std::result::Result<T, EtlError>;
