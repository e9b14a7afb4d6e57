use kurbo::{Affine, BezPath, Line, Point, Rect, Shape, Stroke};
use peniko::Color;
use polars::prelude::*;

use crate::{Bounds, ChartError, Range, render::Render, theme};

/// One bar: the category label and the value it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
  pub label: String,
  pub value: f64,
}

pub struct BarChartAxes {
  name:    String,
  bars:    Vec<Bar>,
  options: BarOptions,
}

pub struct BarOptions {
  /// Width in index units; neighbouring bars sit 1.0 apart.
  pub width: f64,
  pub color: Color,
}

impl Default for BarOptions {
  fn default() -> Self { BarOptions { width: 0.6, color: theme::ROCKET.sample(0.0) } }
}

impl Bar {
  /// Pairs each label with its value, in row order.
  pub fn from_columns(labels: &Column, values: &Column) -> Result<Vec<Bar>, ChartError> {
    let labels = labels.as_materialized_series().cast(&DataType::String)?;
    let values = values.as_materialized_series().cast(&DataType::Float64)?;

    labels
      .str()?
      .into_iter()
      .zip(values.f64()?)
      .map(|(label, value)| {
        let value =
          value.ok_or_else(|| ChartError::NullValue { column: values.name().to_string() })?;
        Ok(Bar { label: label.unwrap_or_default().to_string(), value })
      })
      .collect()
  }
}

impl BarChartAxes {
  pub(crate) fn new(name: String, bars: Vec<Bar>) -> Self {
    BarChartAxes { name, bars, options: BarOptions::default() }
  }

  pub fn width(&mut self, width: f64) -> &mut Self {
    self.options.width = width;
    self
  }

  pub fn color(&mut self, color: Color) -> &mut Self {
    self.options.color = color;
    self
  }

  /// Name of the value column, shown in the legend.
  pub fn name(&self) -> &str { &self.name }
  pub fn bars(&self) -> &[Bar] { &self.bars }
  pub fn options(&self) -> &BarOptions { &self.options }

  /// The rectangle of every bar in data space, centred on its index.
  pub fn layout(&self) -> Vec<Rect> {
    let half = self.options.width / 2.0;
    self
      .bars
      .iter()
      .enumerate()
      .map(|(i, bar)| Rect::new(i as f64 - half, 0.0, i as f64 + half, bar.value))
      .collect()
  }

  pub fn data_bounds(&self) -> Bounds {
    let x = Range::new(-0.5, self.bars.len() as f64 - 0.5);

    let y = self
      .bars
      .iter()
      .fold(Range::empty(), |r, bar| Range::new(r.min.min(bar.value), r.max.max(bar.value)))
      .including_zero();
    let y = if y.size() == 0.0 { Range::new(0.0, 1.0) } else { y.pad_away_from_zero(0.05) };

    Bounds::new(x, y)
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    let mut fill = BezPath::new();
    for rect in self.layout() {
      fill.extend(rect.path_elements(0.1));
    }
    render.fill(&fill, transform, self.options.color);

    if self.bars.iter().any(|bar| bar.value < 0.0) {
      let bounds = self.data_bounds();
      let zero = Line::new(Point::new(bounds.x.min, 0.0), Point::new(bounds.x.max, 0.0));
      render.stroke(&(transform * zero), Affine::IDENTITY, theme::LINE_COLOR, &Stroke::new(1.0));
    }
  }
}
