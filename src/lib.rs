//! Bar charts of billionaire net worth, grouped by country or industry.
//!
//! [`ChartRenderer`] is the entry point: hand it a [`polars::prelude::DataFrame`]
//! whose first column holds category labels and whose second column holds
//! values, and it shows a sorted bar chart on its [`Canvas`].

use kurbo::{Affine, Cap, Line, Point, Size, Stroke};
use parley::{FontWeight, Layout};
use peniko::Brush;
use tracing::{debug, warn};

pub use axes::{Bar, BarChartAxes, BarOptions};
pub use bounds::{Bounds, NiceTicksIter, Range};
pub use error::ChartError;
pub use networth::{ChartLabels, ChartRenderer, GroupingKind, Measure};
pub use render::{Canvas, window::WindowCanvas};
pub use style::{ChartStyle, WindowStyle};

use crate::render::{Align, DrawText, Render};

mod axes;
mod bounds;
pub mod dataset;
mod error;
mod legend;
pub mod networth;
mod render;
mod style;
mod theme;

#[derive(Default)]
pub struct Plot {
  title:  Option<String>,
  pub x:  Axis,
  pub y:  Axis,
  legend: bool,

  bars: Option<BarChartAxes>,
}

#[derive(Default)]
pub struct Axis {
  title:         Option<String>,
  tick_rotation: f64,
}

impl Plot {
  pub fn new() -> Plot { Plot::default() }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn legend(&mut self, show: bool) -> &mut Self {
    self.legend = show;
    self
  }

  pub fn title_text(&self) -> Option<&str> { self.title.as_deref() }
  pub fn has_legend(&self) -> bool { self.legend }
  pub fn bars(&self) -> Option<&BarChartAxes> { self.bars.as_ref() }
}

impl Axis {
  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  /// Rotates tick labels counter-clockwise by `degrees`.
  pub fn tick_rotation(&mut self, degrees: f64) -> &mut Self {
    self.tick_rotation = degrees;
    self
  }

  pub fn title_text(&self) -> Option<&str> { self.title.as_deref() }
  pub fn rotation(&self) -> f64 { self.tick_rotation }
}

const TEXT_BRUSH: Brush = Brush::Solid(theme::TEXT_COLOR);
const LINE_BRUSH: Brush = Brush::Solid(theme::LINE_COLOR);

const MARGIN_LEFT: f64 = 110.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 80.0;
/// Room below the category labels for the tick marks and the axis title.
const MARGIN_BELOW_LABELS: f64 = 70.0;
/// Share of the height the bottom margin may take at most.
const MAX_BOTTOM_SHARE: f64 = 0.45;
const TICK_FONT: f32 = 12.0;

/// Where the last [`Plot::draw`] put things, in logical pixels.
#[derive(Debug)]
pub(crate) struct Frame {
  pub(crate) viewport:      Bounds,
  pub(crate) margin_bottom: f64,
  pub(crate) label_extent:  f64,
  /// Category labels as drawn, after shortening.
  pub(crate) labels:        Vec<String>,
}

/// Height a label takes below the axis once rotated by `angle`.
fn rotated_extent(layout: &Layout<Brush>, angle: f64) -> f64 {
  let (w, h) = (f64::from(layout.width()), f64::from(layout.height()));
  (w * angle.sin()).abs() + (h * angle.cos()).abs()
}

/// Lays out a category label, cutting characters off the end behind an
/// ellipsis until its rotated extent fits in `max_extent`.
fn fit_label(
  render: &mut Render,
  label: &str,
  angle: f64,
  max_extent: f64,
) -> (String, Layout<Brush>, f64) {
  let mut text = label.to_string();
  let mut keep = label.chars().count();
  loop {
    let layout = render.layout_text(&DrawText {
      text: &text,
      size: TICK_FONT,
      brush: TEXT_BRUSH,
      ..Default::default()
    });
    let extent = rotated_extent(&layout, angle);
    if extent <= max_extent || keep == 0 {
      return (text, layout, extent);
    }

    let estimate = (keep as f64 * max_extent / extent).floor() as usize;
    keep = estimate.min(keep - 1);
    text = if keep == 0 {
      String::new()
    } else {
      label.chars().take(keep).chain(std::iter::once('…')).collect()
    };
  }
}

impl Plot {
  /// Draws the plot into a `size` area measured in logical pixels. Returns
  /// `None` when there is nothing to draw or the area is too small.
  pub(crate) fn draw(&self, render: &mut Render, size: Size) -> Option<Frame> {
    let bars = self.bars.as_ref()?;

    // Lay the category labels out first: the bottom margin has to fit the
    // longest one once it is rotated. Labels that would push the margin past
    // its share of the height are shortened.
    let angle = -self.x.rotation().to_radians();
    let (label_transform, horizontal_align, vertical_align) = if angle == 0.0 {
      (Affine::IDENTITY, Align::Center, Align::Start)
    } else {
      (Affine::rotate(angle), Align::End, Align::Center)
    };
    let max_extent = (size.height * MAX_BOTTOM_SHARE - MARGIN_BELOW_LABELS).max(0.0);
    let mut labels = vec![];
    let mut layouts = vec![];
    let mut label_extent = 0.0_f64;
    for bar in bars.bars() {
      let (text, layout, extent) = fit_label(render, &bar.label, angle, max_extent);
      if text != bar.label {
        debug!(label = %bar.label, shortened = %text, "shortened category label");
      }
      label_extent = label_extent.max(extent);
      labels.push(text);
      layouts.push(layout);
    }
    let margin_bottom = label_extent + MARGIN_BELOW_LABELS;

    let viewport = Bounds::new(
      Range::new(MARGIN_LEFT, size.width - MARGIN_RIGHT),
      Range::new(size.height - margin_bottom, MARGIN_TOP),
    );
    if viewport.x.size() <= 0.0 || viewport.y.size() >= 0.0 {
      return None;
    }

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        size: 24.0,
        weight: FontWeight::BOLD,
        brush: TEXT_BRUSH,
        position: Point { x: size.width / 2.0, y: MARGIN_TOP / 2.0 },
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    if let Some(x_label) = &self.x.title {
      render.draw_text(DrawText {
        text: x_label,
        size: 18.0,
        position: Point { x: (viewport.x.min + viewport.x.max) / 2.0, y: size.height - 15.0 },
        brush: TEXT_BRUSH,
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    if let Some(y_label) = &self.y.title {
      render.draw_text(DrawText {
        text: y_label,
        size: 18.0,
        position: Point { x: 25.0, y: (viewport.y.min + viewport.y.max) / 2.0 },
        brush: TEXT_BRUSH,
        transform: Affine::rotate(-std::f64::consts::FRAC_PI_2),
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    let border_stroke = Stroke::new(2.0);
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.max, viewport.y.min),
      ),
      Affine::IDENTITY,
      &LINE_BRUSH,
      &border_stroke,
    );
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.min, viewport.y.max),
      ),
      Affine::IDENTITY,
      &LINE_BRUSH,
      &border_stroke,
    );

    let data_bounds = bars.data_bounds();
    let transform = data_bounds.transform_to(viewport);
    let tick_stroke = border_stroke.clone().with_start_cap(Cap::Butt);

    let iter = data_bounds.y.nice_ticks(10);
    let decimals = iter.decimals();
    for (y, vy) in iter
      .map(|v| (v, (transform * Point::new(0.0, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      render.stroke(
        &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 10.0, vy)),
        Affine::IDENTITY,
        &LINE_BRUSH,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{y:.decimals$}"),
        size: TICK_FONT,
        position: Point { x: viewport.x.min - 15.0, y: vy },
        brush: TEXT_BRUSH,
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    for (i, (label, layout)) in labels.iter().zip(layouts).enumerate() {
      let vx = (transform * Point::new(i as f64, 0.0)).x;
      render.stroke(
        &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 10.0)),
        Affine::IDENTITY,
        &LINE_BRUSH,
        &tick_stroke,
      );
      render.draw_text_layout(layout, DrawText {
        text: label,
        size: TICK_FONT,
        brush: TEXT_BRUSH,
        position: Point { x: vx, y: viewport.y.min + 15.0 },
        transform: label_transform,
        horizontal_align,
        vertical_align,
        ..Default::default()
      });
    }

    bars.draw(render, transform);

    if self.legend {
      self.draw_legend(render, viewport);
    }

    Some(Frame { viewport, margin_bottom, label_extent, labels })
  }
}

/// Logs and discards errors that should not stop drawing.
pub(crate) trait ResultExt<T> {
  fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(value) => Some(value),
      Err(e) => {
        warn!("{e}");
        None
      }
    }
  }
}
