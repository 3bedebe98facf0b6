//! Tabular export of variance results.

use std::io;

use thiserror::Error;

use crate::variance::VarianceResult;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to encode csv row: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush report: {0}")]
    Io(#[from] io::Error),
}

/// Keep results whose category contains `needle`, ignoring case.
///
/// An empty needle keeps everything.
pub fn filter_categories<'a>(
    results: &'a [VarianceResult],
    needle: &str,
) -> Vec<&'a VarianceResult> {
    let needle = needle.trim().to_lowercase();
    results
        .iter()
        .filter(|r| needle.is_empty() || r.category.to_lowercase().contains(&needle))
        .collect()
}

/// Write results as CSV with a header row
/// (`category,budgeted_amount,executed_amount,difference,alert`).
pub fn write_csv<'a, W, I>(results: I, writer: W) -> Result<(), ReportError>
where
    W: io::Write,
    I: IntoIterator<Item = &'a VarianceResult>,
{
    let mut out = csv::Writer::from_writer(writer);
    for result in results {
        out.serialize(result)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(category: &str, budgeted: f64, executed: f64, alert: bool) -> VarianceResult {
        VarianceResult {
            category: category.to_string(),
            budgeted_amount: budgeted,
            executed_amount: executed,
            difference: budgeted - executed,
            alert,
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let results = vec![
            result("Fertilizer purchase", 10.0, 5.0, true),
            result("Milk sales", 0.0, 0.0, false),
            result("Organic FERTILIZER", 1.0, 1.0, false),
        ];
        let kept: Vec<_> = filter_categories(&results, "fertilizer")
            .into_iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(kept, vec!["Fertilizer purchase", "Organic FERTILIZER"]);
        assert_eq!(filter_categories(&results, "  ").len(), 3);
    }

    #[test]
    fn writes_header_and_rows() {
        let results = vec![result("Fertilizer", 1000.0, 200.0, true)];
        let mut buf = Vec::new();
        write_csv(&results, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "category,budgeted_amount,executed_amount,difference,alert\nFertilizer,1000.0,200.0,800.0,true\n"
        );
    }

    #[test]
    fn empty_input_writes_nothing() {
        let mut buf = Vec::new();
        let none: Vec<VarianceResult> = Vec::new();
        write_csv(&none, &mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
