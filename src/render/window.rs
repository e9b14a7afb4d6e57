use std::sync::Arc;

use kurbo::Size;
use tracing::{debug, info};
use vello::wgpu;
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::{KeyEvent, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  keyboard::{Key, NamedKey},
  platform::run_on_demand::EventLoopExtRunOnDemand,
  window::{Window, WindowId},
};

use crate::{
  ChartError, Plot, ResultExt, WindowStyle,
  render::{Canvas, GpuHandle, Render, RenderConfig},
};

/// Shows each plot in its own window and blocks until that window is closed,
/// either with the close button, `q` or `Escape`.
///
/// winit allows a single event loop per process, so keep one `WindowCanvas`
/// around and reuse it for every chart.
pub struct WindowCanvas {
  event_loop: EventLoop<()>,
  style:      WindowStyle,
}

impl WindowCanvas {
  pub fn new(style: WindowStyle) -> Result<Self, ChartError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    Ok(WindowCanvas { event_loop, style })
  }
}

impl Canvas for WindowCanvas {
  fn show(&mut self, plot: &Plot) -> Result<(), ChartError> {
    let mut app =
      App { plot, style: &self.style, stale: true, render: None, init: None, error: None };
    self.event_loop.run_app_on_demand(&mut app)?;
    info!("chart window closed");

    match app.error.take() {
      Some(e) => Err(e),
      None => Ok(()),
    }
  }
}

struct App<'a> {
  plot:   &'a Plot,
  style:  &'a WindowStyle,
  stale:  bool,
  render: Option<Render>,

  init:  Option<Init>,
  error: Option<ChartError>,
}

struct Init {
  surface: wgpu::Surface<'static>,
  config:  wgpu::SurfaceConfiguration,
  handle:  GpuHandle,

  blit:   wgpu::util::TextureBlitter,
  vello:  vello::Renderer,
  window: Arc<Window>,
}

impl App<'_> {
  fn open_window(&self, event_loop: &ActiveEventLoop) -> Result<Init, ChartError> {
    let window = Arc::new(
      event_loop.create_window(
        Window::default_attributes()
          .with_title(self.style.title.clone())
          .with_inner_size(LogicalSize::new(self.style.width, self.style.height))
          .with_min_inner_size(LogicalSize::new(100, 100)),
      )?,
    );
    let size = window.inner_size();

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let surface = instance.create_surface(window.clone()).map_err(ChartError::gpu)?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
      compatible_surface: Some(&surface),
      ..Default::default()
    }))
    .map_err(ChartError::gpu)?;

    // vello renders into a linear texture, so blit onto a linear surface.
    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
      .formats
      .iter()
      .copied()
      .find(|f| !f.is_srgb())
      .or_else(|| surface_caps.formats.first().copied())
      .ok_or_else(|| ChartError::Gpu("surface supports no texture formats".into()))?;

    let render_config = RenderConfig { width: size.width.max(1), height: size.height.max(1) };
    let handle = GpuHandle::new(&adapter, &render_config)?;

    let config = wgpu::SurfaceConfiguration {
      usage:                         wgpu::TextureUsages::RENDER_ATTACHMENT,
      format:                        surface_format,
      width:                         render_config.width,
      height:                        render_config.height,
      present_mode:                  wgpu::PresentMode::AutoVsync,
      alpha_mode:                    surface_caps.alpha_modes[0],
      view_formats:                  vec![],
      desired_maximum_frame_latency: 2,
    };
    surface.configure(&handle.device, &config);

    let vello = vello::Renderer::new(&handle.device, vello::RendererOptions::default())
      .map_err(ChartError::gpu)?;
    let blit = wgpu::util::TextureBlitter::new(&handle.device, config.format);

    debug!(width = config.width, height = config.height, format = ?config.format, "window ready");
    Ok(Init { surface, config, handle, blit, vello, window })
  }

  fn fail(&mut self, event_loop: &ActiveEventLoop, error: ChartError) {
    self.error = Some(error);
    self.close(event_loop);
  }

  fn close(&mut self, event_loop: &ActiveEventLoop) {
    // Surfaces must go before the window they draw into.
    self.init = None;
    event_loop.exit();
  }

  fn redraw(&mut self) -> Result<(), ChartError> {
    let Some(init) = &mut self.init else { return Ok(()) };

    if self.stale {
      self.stale = false;

      let scale = init.window.scale_factor();
      let render = self.render.get_or_insert_with(|| Render::new(scale));
      render.set_scale(scale);
      render.scene.reset();

      let logical = Size::new(
        f64::from(init.config.width) / scale,
        f64::from(init.config.height) / scale,
      );
      if let Some(frame) = self.plot.draw(render, logical) {
        debug!(
          viewport = ?frame.viewport,
          margin_bottom = frame.margin_bottom,
          label_extent = frame.label_extent,
          labels = frame.labels.len(),
          "plot drawn"
        );
      }

      init
        .vello
        .render_to_texture(
          &init.handle.device,
          &init.handle.queue,
          &render.scene,
          &init.handle.view,
          &vello::RenderParams {
            base_color:          render.background,
            width:               init.config.width,
            height:              init.config.height,
            antialiasing_method: vello::AaConfig::Msaa16,
          },
        )
        .map_err(ChartError::gpu)?;
    }

    init.present();
    Ok(())
  }
}

impl ApplicationHandler for App<'_> {
  fn resumed(&mut self, event_loop: &ActiveEventLoop) {
    if self.init.is_some() {
      return;
    }

    match self.open_window(event_loop) {
      Ok(init) => {
        init.window.request_redraw();
        self.init = Some(init);
        self.stale = true;
      }
      Err(e) => self.fail(event_loop, e),
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
    match event {
      WindowEvent::CloseRequested => self.close(event_loop),

      WindowEvent::KeyboardInput {
        event: KeyEvent { logical_key: Key::Character(c), .. }, ..
      } if c == "q" => self.close(event_loop),

      WindowEvent::KeyboardInput {
        event: KeyEvent { logical_key: Key::Named(NamedKey::Escape), .. },
        ..
      } => self.close(event_loop),

      WindowEvent::Resized(new_size) => {
        if let Some(init) = &mut self.init {
          if new_size.width > 0 && new_size.height > 0 {
            init.config.width = new_size.width;
            init.config.height = new_size.height;
            init
              .handle
              .resize(&RenderConfig { width: init.config.width, height: init.config.height });
            init.surface.configure(&init.handle.device, &init.config);

            self.stale = true;
            init.window.request_redraw();
          }
        }
      }

      WindowEvent::ScaleFactorChanged { .. } => {
        self.stale = true;
        if let Some(init) = &self.init {
          init.window.request_redraw();
        }
      }

      WindowEvent::RedrawRequested => {
        if let Err(e) = self.redraw() {
          self.fail(event_loop, e);
        }
      }

      _ => (),
    }
  }
}

impl Init {
  fn present(&mut self) {
    let frame = match self.surface.get_current_texture() {
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
        self.surface.configure(&self.handle.device, &self.config);
        self.window.request_redraw();
        return;
      }
      frame => frame,
    };
    let Some(frame) = frame.log_err() else { return };

    let surface_view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .handle
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    self.blit.copy(&self.handle.device, &mut encoder, &self.handle.view, &surface_view);

    self.handle.queue.submit(std::iter::once(encoder.finish()));

    self.window.pre_present_notify();
    frame.present();
  }
}
