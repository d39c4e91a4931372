//! Business-rule cleaning and analytical feature derivation

use polars::prelude::*;

use crate::data::JOIN_KEY;
use crate::error::EtlError;

/// Business defaults applied to null cells, column by column
pub const DEFAULT_FILLS: [(&str, &str); 4] = [
    ("Churn Reason", "Not Churned"),
    ("Churn Category", "Not Churned"),
    ("Offer", "No Offer"),
    ("Internet Type", "No Internet"),
];

/// Optional service offerings counted into the engagement score
pub const SERVICE_COLUMNS: [&str; 7] = [
    "Online Security",
    "Online Backup",
    "Device Protection Plan",
    "Premium Tech Support",
    "Streaming TV",
    "Streaming Movies",
    "Streaming Music",
];

/// Validate and clean the merged customer table
///
/// Asserts `Customer ID` uniqueness, validates the `Churn Label` domain,
/// applies the business default fills, and derives the numeric
/// `Churn Value` column (1 for "Yes", 0 for "No").
pub fn clean(df: DataFrame) -> crate::Result<DataFrame> {
    let unique_ids = df.column(JOIN_KEY)?.as_materialized_series().n_unique()?;
    if unique_ids != df.height() {
        return Err(EtlError::Integrity(format!(
            "duplicate {JOIN_KEY:?} values in merged table: {} rows, {unique_ids} unique",
            df.height(),
        )));
    }

    // An unmapped churn label must fail loudly rather than become a null
    let labels = df.column("Churn Label")?.str()?;
    for label in labels.into_iter() {
        match label {
            Some("Yes") | Some("No") => {}
            Some(other) => {
                return Err(EtlError::UnexpectedCategory {
                    column: "Churn Label".to_string(),
                    value: other.to_string(),
                })
            }
            None => {
                return Err(EtlError::UnexpectedCategory {
                    column: "Churn Label".to_string(),
                    value: "<missing>".to_string(),
                })
            }
        }
    }

    let fills: Vec<Expr> = DEFAULT_FILLS
        .iter()
        .map(|(column, default)| col(*column).fill_null(lit(*default)))
        .collect();

    let cleaned = df
        .lazy()
        .with_columns(fills)
        .with_column(
            when(col("Churn Label").eq(lit("Yes")))
                .then(lit(1i32))
                .otherwise(lit(0i32))
                .alias("Churn Value"),
        )
        .collect()?;

    Ok(cleaned)
}

/// Derive the three analytical feature columns
///
/// - `Revenue Per Month`: total revenue over tenure, with a zero tenure
///   counting as one month.
/// - `High Value Customer`: revenue per month strictly above the
///   whole-table median.
/// - `Engagement Score`: count of "Yes" cells among the seven service
///   columns; a null cell counts zero.
pub fn engineer_features(df: DataFrame) -> crate::Result<DataFrame> {
    let tenure_floor = when(col("Tenure in Months").eq(lit(0)))
        .then(lit(1))
        .otherwise(col("Tenure in Months"))
        .cast(DataType::Float64);

    let engagement = SERVICE_COLUMNS.iter().fold(lit(0i32), |score, column| {
        score
            + col(*column)
                .eq(lit("Yes"))
                .fill_null(lit(false))
                .cast(DataType::Int32)
    });

    let engineered = df
        .lazy()
        .with_column(
            (col("Total Revenue").cast(DataType::Float64) / tenure_floor)
                .alias("Revenue Per Month"),
        )
        .with_column(
            col("Revenue Per Month")
                .gt(col("Revenue Per Month").median())
                .alias("High Value Customer"),
        )
        .with_column(engagement.alias("Engagement Score"))
        .collect()?;

    Ok(engineered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_column(name: &str, values: &[Option<&str>]) -> Column {
        Series::new(name.into(), values).into()
    }

    /// A merged-shape table covering the columns `clean` touches
    fn merged_fixture(ids: &[Option<&str>], labels: &[Option<&str>]) -> DataFrame {
        let nulls = vec![None; ids.len()];
        DataFrame::new(vec![
            string_column(JOIN_KEY, ids),
            string_column("Churn Label", labels),
            string_column("Churn Reason", &nulls),
            string_column("Churn Category", &nulls),
            string_column("Offer", &nulls),
            string_column("Internet Type", &nulls),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_customer_ids_fail() {
        let df = merged_fixture(
            &[Some("A"), Some("A")],
            &[Some("Yes"), Some("No")],
        );
        let err = clean(df).unwrap_err();
        assert!(matches!(err, EtlError::Integrity(_)));
    }

    #[test]
    fn test_unexpected_churn_label_fails() {
        let df = merged_fixture(&[Some("A")], &[Some("Maybe")]);
        let err = clean(df).unwrap_err();
        assert!(matches!(
            err,
            EtlError::UnexpectedCategory { ref column, .. } if column == "Churn Label"
        ));
    }

    #[test]
    fn test_missing_churn_label_fails() {
        let df = merged_fixture(&[Some("A"), Some("B")], &[Some("Yes"), None]);
        let err = clean(df).unwrap_err();
        assert!(matches!(err, EtlError::UnexpectedCategory { .. }));
    }

    #[test]
    fn test_null_fills_are_total() {
        let df = merged_fixture(
            &[Some("A"), Some("B")],
            &[Some("Yes"), Some("No")],
        );
        let cleaned = clean(df).unwrap();

        for (column, default) in DEFAULT_FILLS {
            let filled = cleaned.column(column).unwrap();
            assert_eq!(filled.null_count(), 0, "{column} still has nulls");
            assert_eq!(filled.str().unwrap().get(0), Some(default));
        }
    }

    #[test]
    fn test_churn_value_derivation() {
        let df = merged_fixture(
            &[Some("A"), Some("B")],
            &[Some("Yes"), Some("No")],
        );
        let cleaned = clean(df).unwrap();

        let values: Vec<Option<i32>> = cleaned
            .column("Churn Value")
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(values, vec![Some(1), Some(0)]);
    }

    /// A cleaned-shape table covering the columns `engineer_features` touches
    fn cleaned_fixture(
        revenue: &[f64],
        tenure: &[i64],
        services: &[Option<&str>],
    ) -> DataFrame {
        let n = revenue.len();
        let mut columns = vec![
            Column::from(Series::new("Total Revenue".into(), revenue)),
            Column::from(Series::new("Tenure in Months".into(), tenure)),
        ];
        for name in SERVICE_COLUMNS {
            columns.push(string_column(name, &services[..n.min(services.len())]));
        }
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_revenue_per_month_zero_tenure_guard() {
        let df = cleaned_fixture(&[120.0], &[0], &[Some("No")]);
        let engineered = engineer_features(df).unwrap();

        let rpm = engineered
            .column("Revenue Per Month")
            .unwrap()
            .f64()
            .unwrap()
            .get(0);
        assert_eq!(rpm, Some(120.0));
    }

    #[test]
    fn test_high_value_strictly_above_median() {
        // One month of tenure each, so revenue per month mirrors revenue
        let df = cleaned_fixture(
            &[10.0, 20.0, 30.0, 40.0, 50.0],
            &[1, 1, 1, 1, 1],
            &[Some("No"), Some("No"), Some("No"), Some("No"), Some("No")],
        );
        let engineered = engineer_features(df).unwrap();

        let flags: Vec<Option<bool>> = engineered
            .column("High Value Customer")
            .unwrap()
            .bool()
            .unwrap()
            .into_iter()
            .collect();
        // Median is 30; the median row itself is not high value
        assert_eq!(
            flags,
            vec![Some(false), Some(false), Some(false), Some(true), Some(true)]
        );
    }

    #[test]
    fn test_engagement_score_bounds() {
        let all_yes = cleaned_fixture(&[100.0], &[10], &[Some("Yes")]);
        let engineered = engineer_features(all_yes).unwrap();
        assert_eq!(
            engineered.column("Engagement Score").unwrap().i32().unwrap().get(0),
            Some(7)
        );

        let all_no = cleaned_fixture(&[100.0], &[10], &[Some("No")]);
        let engineered = engineer_features(all_no).unwrap();
        assert_eq!(
            engineered.column("Engagement Score").unwrap().i32().unwrap().get(0),
            Some(0)
        );
    }

    #[test]
    fn test_engagement_score_counts_nulls_as_zero() {
        let df = cleaned_fixture(&[100.0], &[10], &[None]);
        let engineered = engineer_features(df).unwrap();
        assert_eq!(
            engineered.column("Engagement Score").unwrap().i32().unwrap().get(0),
            Some(0)
        );
    }
}
