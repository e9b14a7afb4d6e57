mod bar_chart;

pub use bar_chart::{Bar, BarChartAxes, BarOptions};

use polars::prelude::*;

use crate::{ChartError, Plot};

impl Plot {
  /// Adds a bar per row, in row order, replacing any previous bars.
  pub fn bar_chart(
    &mut self,
    labels: &Column,
    values: &Column,
  ) -> Result<&mut BarChartAxes, ChartError> {
    let bars = Bar::from_columns(labels, values)?;
    Ok(self.bars.insert(BarChartAxes::new(values.name().to_string(), bars)))
  }
}
