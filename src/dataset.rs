//! Validation and ordering of the frames handed to the chart renderer.
//!
//! A chart consumes exactly two columns: the first column holds the category
//! labels and the second holds the numeric values. Anything after that is
//! ignored.

use polars::prelude::*;
use tracing::debug;

use crate::ChartError;

/// Returns the category and value columns, checking that the frame can be
/// charted.
pub fn leading_columns(df: &DataFrame) -> Result<(&Column, &Column), ChartError> {
  let columns = df.get_columns();
  if columns.len() < 2 {
    return Err(ChartError::MissingColumns { found: columns.len() });
  }
  if df.height() == 0 {
    return Err(ChartError::EmptyDataset);
  }

  let (category, value) = (&columns[0], &columns[1]);
  let column = value.name().to_string();

  if !value.dtype().is_primitive_numeric() {
    return Err(ChartError::NonNumeric { column, dtype: value.dtype().clone() });
  }
  if value.null_count() > 0 {
    return Err(ChartError::NullValue { column });
  }
  let values = value.as_materialized_series().cast(&DataType::Float64)?;
  if values.f64()?.into_iter().flatten().any(|v| !v.is_finite()) {
    return Err(ChartError::NonFinite { column });
  }

  Ok((category, value))
}

/// A copy of the two leading columns sorted by value, largest first. Rows with
/// equal values keep their input order.
pub fn sorted_descending(df: &DataFrame) -> Result<DataFrame, ChartError> {
  let (category, value) = leading_columns(df)?;

  let sorted = df.select([category.name().clone(), value.name().clone()])?.sort(
    [value.name().clone()],
    SortMultipleOptions::default().with_order_descending(true).with_maintain_order(true),
  )?;

  debug!(
    rows = sorted.height(),
    category = %category.name(),
    value = %value.name(),
    "sorted dataset"
  );
  Ok(sorted)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn values(df: &DataFrame) -> Vec<f64> {
    df.get_columns()[1]
      .as_materialized_series()
      .cast(&DataType::Float64)
      .unwrap()
      .f64()
      .unwrap()
      .into_no_null_iter()
      .collect()
  }

  fn labels(df: &DataFrame) -> Vec<String> {
    df.get_columns()[0]
      .as_materialized_series()
      .str()
      .unwrap()
      .into_no_null_iter()
      .map(str::to_string)
      .collect()
  }

  #[test]
  fn sorts_largest_first() {
    let df = df! {
      "Industry" => &["Tech", "Retail", "Energy"],
      "totalNetWorths" => &[900, 950, 120],
    }
    .unwrap();

    let sorted = sorted_descending(&df).unwrap();
    assert_eq!(values(&sorted), vec![950.0, 900.0, 120.0]);
    assert_eq!(labels(&sorted), vec!["Retail", "Tech", "Energy"]);
  }

  #[test]
  fn ties_keep_input_order() {
    let df = df! {
      "countries" => &["A", "B", "C", "D"],
      "totalNetWorths" => &[1.0, 2.0, 1.0, 2.0],
    }
    .unwrap();

    let sorted = sorted_descending(&df).unwrap();
    assert_eq!(labels(&sorted), vec!["B", "D", "A", "C"]);
  }

  #[test]
  fn leaves_input_untouched_and_drops_extra_columns() {
    let df = df! {
      "countries" => &["China", "USA"],
      "totalNetWorths" => &[300, 500],
      "billionaires" => &[400, 700],
    }
    .unwrap();

    let sorted = sorted_descending(&df).unwrap();
    assert_eq!(sorted.width(), 2);
    assert_eq!(values(&df), vec![300.0, 500.0]);
  }

  #[test]
  fn rejects_empty_frames() {
    let df = df! {
      "countries" => Vec::<&str>::new(),
      "totalNetWorths" => Vec::<f64>::new(),
    }
    .unwrap();
    assert!(matches!(leading_columns(&df), Err(ChartError::EmptyDataset)));
  }

  #[test]
  fn rejects_missing_value_column() {
    let df = df! { "countries" => &["USA"] }.unwrap();
    assert!(matches!(leading_columns(&df), Err(ChartError::MissingColumns { found: 1 })));
  }

  #[test]
  fn rejects_non_numeric_values() {
    let df = df! {
      "countries" => &["USA"],
      "totalNetWorths" => &["lots"],
    }
    .unwrap();
    assert!(matches!(leading_columns(&df), Err(ChartError::NonNumeric { .. })));
  }

  #[test]
  fn rejects_nulls_and_nan() {
    let nulls = df! {
      "countries" => &["USA", "China"],
      "totalNetWorths" => &[Some(1.0), None],
    }
    .unwrap();
    assert!(matches!(leading_columns(&nulls), Err(ChartError::NullValue { .. })));

    let nan = df! {
      "countries" => &["USA", "China"],
      "totalNetWorths" => &[1.0, f64::NAN],
    }
    .unwrap();
    assert!(matches!(leading_columns(&nan), Err(ChartError::NonFinite { .. })));
  }

  #[test]
  fn rejects_infinite_values() {
    let inf = df! {
      "countries" => &["a", "b"],
      "totalNetWorths" => &[f64::INFINITY, 1.0],
    }
    .unwrap();
    assert!(matches!(leading_columns(&inf), Err(ChartError::NonFinite { .. })));

    let neg_inf = df! {
      "Industry" => &["Tech", "Retail"],
      "YTD_change" => &[2.0, f64::NEG_INFINITY],
    }
    .unwrap();
    assert!(matches!(sorted_descending(&neg_inf), Err(ChartError::NonFinite { .. })));
  }
}
