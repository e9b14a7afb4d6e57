use kurbo::{Affine, Point, Rect, RoundedRect, Size, Stroke, Vec2};
use peniko::{Brush, Color};

use crate::{
  Bounds, Plot,
  render::{Align, DrawText, Render},
  theme,
};

struct LegendItem {
  label: String,
  color: Color,
}

impl Plot {
  /// Draws the legend box in the top right corner of `viewport`.
  pub(crate) fn draw_legend(&self, render: &mut Render, viewport: Bounds) {
    let items: Vec<LegendItem> = self
      .bars
      .iter()
      .map(|bars| LegendItem { label: bars.name().to_string(), color: bars.options().color })
      .collect();
    if items.is_empty() {
      return;
    }

    const MARGIN: f64 = 20.0;
    const PADDING: f64 = 10.0;
    const FONT_SIZE: f64 = 16.0;
    const LINE_HEIGHT: f64 = 22.0;
    const MARKER_WIDTH: f64 = 30.0;

    let mut inner_width = 0.0_f64;
    let mut layouts = vec![];
    for item in &items {
      let text = DrawText {
        text: &item.label,
        size: FONT_SIZE as f32,
        brush: Brush::Solid(theme::TEXT_COLOR),
        vertical_align: Align::Center,
        ..Default::default()
      };
      let layout = render.layout_text(&text);
      inner_width = inner_width.max(f64::from(layout.width()));
      layouts.push((layout, text));
    }

    inner_width += MARKER_WIDTH;
    let inner_height = items.len() as f64 * LINE_HEIGHT;

    // The viewport's y axis points up, so `y.max` is the top edge on screen.
    let rect = Rect::new(
      viewport.x.max - inner_width - MARGIN - PADDING * 2.0,
      viewport.y.max + MARGIN,
      viewport.x.max - MARGIN,
      viewport.y.max + MARGIN + inner_height + PADDING * 2.0,
    );
    let background = RoundedRect::from_rect(rect, 5.0);
    render.fill(&background, Affine::IDENTITY, Color::from_rgba8(255, 255, 255, 200));
    render.stroke(&background, Affine::IDENTITY, theme::LINE_COLOR, &Stroke::new(1.0));

    for (i, (layout, mut text)) in layouts.into_iter().enumerate() {
      let pos = Point::new(
        rect.x0 + PADDING,
        rect.y0 + i as f64 * LINE_HEIGHT + PADDING + LINE_HEIGHT / 2.0,
      );

      let marker_rect =
        Rect::from_origin_size(pos - Vec2::new(0.0, 6.0), Size::new(MARKER_WIDTH - 8.0, 12.0));
      render.fill(&marker_rect, Affine::IDENTITY, items[i].color);

      text.position = pos + Vec2::new(MARKER_WIDTH, 0.0);
      render.draw_text_layout(layout, text);
    }
  }
}
