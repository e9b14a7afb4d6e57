use kurbo::{Affine, Point, Shape, Stroke};
use parley::{Alignment, FontWeight, Layout, PositionedLayoutItem, StyleProperty};
use peniko::{Brush, BrushRef, Color, Fill};
use vello::wgpu;

use crate::{ChartError, Plot};

pub mod window;

/// Somewhere a finished [`Plot`] can be shown. Implementations own whatever
/// drawing context they need, so nothing about the display is global.
pub trait Canvas {
  /// Shows the plot, returning once it has been dismissed.
  fn show(&mut self, plot: &Plot) -> Result<(), ChartError>;
}

pub(crate) struct Render {
  pub(crate) scene:      vello::Scene,
  pub(crate) background: Color,

  /// Maps logical pixels to physical pixels.
  base:   Affine,
  font:   parley::FontContext,
  layout: parley::LayoutContext<Brush>,
}

pub(crate) struct GpuHandle {
  pub(crate) device: wgpu::Device,
  pub(crate) queue:  wgpu::Queue,
  /// Storage texture vello renders into, blitted to the window surface.
  pub(crate) view:   wgpu::TextureView,
}

#[derive(Clone, Copy)]
pub(crate) struct RenderConfig {
  pub(crate) width:  u32,
  pub(crate) height: u32,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub(crate) enum Align {
  #[default]
  Start,
  Center,
  End,
}

pub(crate) struct DrawText<'a> {
  pub text:             &'a str,
  pub size:             f32,
  pub weight:           FontWeight,
  pub brush:            Brush,
  pub position:         Point,
  /// Applied around `position`, after alignment.
  pub transform:        Affine,
  pub horizontal_align: Align,
  pub vertical_align:   Align,
}

impl Default for DrawText<'_> {
  fn default() -> Self {
    DrawText {
      text:             "",
      size:             16.0,
      weight:           FontWeight::NORMAL,
      brush:            Brush::Solid(Color::BLACK),
      position:         Point::ZERO,
      transform:        Affine::IDENTITY,
      horizontal_align: Align::Start,
      vertical_align:   Align::Start,
    }
  }
}

impl Align {
  fn offset(self, extent: f64) -> f64 {
    match self {
      Align::Start => 0.0,
      Align::Center => -extent / 2.0,
      Align::End => -extent,
    }
  }
}

impl Render {
  pub(crate) fn new(scale: f64) -> Self {
    Render {
      scene:      vello::Scene::new(),
      background: Color::WHITE,
      base:       Affine::scale(scale),
      font:       parley::FontContext::new(),
      layout:     parley::LayoutContext::new(),
    }
  }

  pub(crate) fn set_scale(&mut self, scale: f64) { self.base = Affine::scale(scale); }

  pub(crate) fn fill<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
  ) {
    self.scene.fill(Fill::NonZero, self.base * transform, brush, None, shape);
  }

  pub(crate) fn stroke<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
    stroke: &Stroke,
  ) {
    self.scene.stroke(stroke, self.base * transform, brush, None, shape);
  }

  pub(crate) fn layout_text(&mut self, text: &DrawText) -> Layout<Brush> {
    let mut builder = self.layout.ranged_builder(&mut self.font, text.text, 1.0, true);

    builder.push_default(StyleProperty::FontSize(text.size));
    builder.push_default(StyleProperty::FontWeight(text.weight));
    builder.push_default(StyleProperty::Brush(text.brush.clone()));

    let mut layout = builder.build(text.text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, Default::default());
    layout
  }

  pub(crate) fn draw_text(&mut self, text: DrawText) {
    let layout = self.layout_text(&text);
    self.draw_text_layout(layout, text);
  }

  pub(crate) fn draw_text_layout(&mut self, layout: Layout<Brush>, text: DrawText) {
    let offset = (
      text.horizontal_align.offset(f64::from(layout.width())),
      text.vertical_align.offset(f64::from(layout.height())),
    );
    let transform = self.base
      * Affine::translate(text.position.to_vec2())
      * text.transform
      * Affine::translate(offset);

    for line in layout.lines() {
      for item in line.items() {
        let PositionedLayoutItem::GlyphRun(glyph_run) = item else { continue };

        let run = glyph_run.run();
        let mut x = glyph_run.offset();
        let baseline = glyph_run.baseline();

        self
          .scene
          .draw_glyphs(run.font())
          .brush(&glyph_run.style().brush)
          .transform(transform)
          .glyph_transform(
            run.synthesis().skew().map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0)),
          )
          .font_size(run.font_size())
          .normalized_coords(run.normalized_coords())
          .draw(
            Fill::NonZero,
            glyph_run.glyphs().map(|glyph| {
              let gx = x + glyph.x;
              let gy = baseline + glyph.y;
              x += glyph.advance;
              vello::Glyph { id: glyph.id.into(), x: gx, y: gy }
            }),
          );
      }
    }
  }
}

impl GpuHandle {
  pub(crate) fn new(adapter: &wgpu::Adapter, config: &RenderConfig) -> Result<Self, ChartError> {
    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
      label: Some("networth-plot device"),
      ..Default::default()
    }))
    .map_err(ChartError::gpu)?;

    let view = Self::create_target(&device, config);
    Ok(GpuHandle { device, queue, view })
  }

  pub(crate) fn resize(&mut self, config: &RenderConfig) {
    self.view = Self::create_target(&self.device, config);
  }

  fn create_target(device: &wgpu::Device, config: &RenderConfig) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
      label:           Some("Render Texture"),
      size:            config.extent_3d(),
      mip_level_count: 1,
      sample_count:    1,
      dimension:       wgpu::TextureDimension::D2,
      format:          wgpu::TextureFormat::Rgba8Unorm,
      usage:           wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
      view_formats:    &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
  }
}

impl RenderConfig {
  fn extent_3d(&self) -> wgpu::Extent3d {
    wgpu::Extent3d {
      width:                 self.width,
      height:                self.height,
      depth_or_array_layers: 1,
    }
  }
}
