use polars::prelude::{DataType, PolarsError};
use thiserror::Error;

/// Everything that can go wrong between receiving a frame and closing the
/// chart window.
#[derive(Debug, Error)]
pub enum ChartError {
  #[error("dataset has no rows")]
  EmptyDataset,

  #[error("dataset needs a category and a value column, found {found} column(s)")]
  MissingColumns { found: usize },

  #[error("value column '{column}' has non-numeric type {dtype}")]
  NonNumeric { column: String, dtype: DataType },

  #[error("value column '{column}' contains null values")]
  NullValue { column: String },

  #[error("value column '{column}' contains NaN or infinite values")]
  NonFinite { column: String },

  #[error("polars error: {0}")]
  Polars(#[from] PolarsError),

  #[error("failed to parse chart style: {0}")]
  Config(#[from] serde_yaml::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid chart style: {0}")]
  InvalidStyle(String),

  #[error("event loop error: {0}")]
  EventLoop(#[from] winit::error::EventLoopError),

  #[error("failed to create window: {0}")]
  Window(#[from] winit::error::OsError),

  #[error("gpu error: {0}")]
  Gpu(String),
}

impl ChartError {
  pub(crate) fn gpu(err: impl std::fmt::Display) -> Self { ChartError::Gpu(err.to_string()) }
}
