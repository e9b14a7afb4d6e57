//! The billionaire net-worth charts.
//!
//! Both charts share one layout: rows sorted by value (largest first), one
//! translucent bar per row and one rotated tick label per category. They only
//! differ in which column they expect and how the axes are labelled.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Canvas, ChartError, ChartStyle, Plot, dataset};

/// What the category column groups billionaires by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingKind {
  Country,
  Industry,
}

/// Which quantity the value column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
  /// Total net worth of each group.
  NetWorth,
  /// Period-over-period change in net worth.
  Change,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
  pub title:         String,
  pub category_axis: &'static str,
  pub value_axis:    &'static str,
}

impl GroupingKind {
  /// Grouping implied by the category column of a net-worth frame:
  /// `countries` means countries, anything else is an industry breakdown.
  pub fn from_magnitude_column(name: &str) -> Self {
    if name == "countries" { GroupingKind::Country } else { GroupingKind::Industry }
  }

  /// Grouping implied by the category column of a change frame, where the
  /// per-country frames are keyed by `Last_change`.
  pub fn from_change_column(name: &str) -> Self {
    if name == "Last_change" { GroupingKind::Country } else { GroupingKind::Industry }
  }

  pub fn noun(self) -> &'static str {
    match self {
      GroupingKind::Country => "Country",
      GroupingKind::Industry => "Industry",
    }
  }
}

impl ChartLabels {
  pub fn new(measure: Measure, grouping: GroupingKind) -> Self {
    let value_axis = match (measure, grouping) {
      (Measure::NetWorth, _) => "Net Worth",
      (Measure::Change, GroupingKind::Country) => "Last Change",
      (Measure::Change, GroupingKind::Industry) => "YTD Change",
    };

    ChartLabels {
      title: format!("Total Billionaires Net Worth By {}", grouping.noun()),
      category_axis: grouping.noun(),
      value_axis,
    }
  }
}

/// Draws net-worth charts onto a [`Canvas`] with a fixed [`ChartStyle`].
pub struct ChartRenderer<C> {
  canvas: C,
  style:  ChartStyle,
}

impl<C: Canvas> ChartRenderer<C> {
  pub fn new(canvas: C) -> Self { ChartRenderer { canvas, style: ChartStyle::default() } }

  pub fn with_style(canvas: C, style: ChartStyle) -> Result<Self, ChartError> {
    style.validate()?;
    Ok(ChartRenderer { canvas, style })
  }

  pub fn style(&self) -> &ChartStyle { &self.style }
  pub fn canvas(&self) -> &C { &self.canvas }
  pub fn into_canvas(self) -> C { self.canvas }

  /// Shows total net worth per group, largest first.
  pub fn render_magnitude(
    &mut self,
    df: &DataFrame,
    grouping: GroupingKind,
  ) -> Result<(), ChartError> {
    self.render(df, Measure::NetWorth, grouping)
  }

  /// Shows the change in net worth per group, largest gain first.
  pub fn render_change(
    &mut self,
    df: &DataFrame,
    grouping: GroupingKind,
  ) -> Result<(), ChartError> {
    self.render(df, Measure::Change, grouping)
  }

  fn render(
    &mut self,
    df: &DataFrame,
    measure: Measure,
    grouping: GroupingKind,
  ) -> Result<(), ChartError> {
    let plot = build_plot(df, measure, grouping, &self.style)?;
    info!(?measure, ?grouping, bars = df.height(), "showing chart");
    self.canvas.show(&plot)
  }
}

/// Builds the total net-worth chart without showing it.
pub fn magnitude_plot(
  df: &DataFrame,
  grouping: GroupingKind,
  style: &ChartStyle,
) -> Result<Plot, ChartError> {
  build_plot(df, Measure::NetWorth, grouping, style)
}

/// Builds the net-worth change chart without showing it.
pub fn change_plot(
  df: &DataFrame,
  grouping: GroupingKind,
  style: &ChartStyle,
) -> Result<Plot, ChartError> {
  build_plot(df, Measure::Change, grouping, style)
}

fn build_plot(
  df: &DataFrame,
  measure: Measure,
  grouping: GroupingKind,
  style: &ChartStyle,
) -> Result<Plot, ChartError> {
  let sorted = dataset::sorted_descending(df)?;
  let columns = sorted.get_columns();
  let labels = ChartLabels::new(measure, grouping);
  debug!(?labels, "building chart");

  let mut plot = Plot::new();
  plot.title(&labels.title).legend(style.legend);
  plot.x.title(labels.category_axis).tick_rotation(style.label_rotation);
  plot.y.title(labels.value_axis);
  plot.bar_chart(&columns[0], &columns[1])?.width(style.bar_width).color(style.bar_color());

  Ok(plot)
}
