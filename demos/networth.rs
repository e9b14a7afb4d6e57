use networth_plot::{ChartError, ChartRenderer, ChartStyle, GroupingKind, WindowCanvas};
use polars::prelude::*;
use tracing_subscriber::EnvFilter;

/// Shows total net worth by country, then by industry. Pass a YAML style file
/// as the first argument to override the default look.
fn main() -> Result<(), ChartError> {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let style = match std::env::args().nth(1) {
    Some(path) => ChartStyle::load_from_path(path)?,
    None => ChartStyle::default(),
  };

  let by_country = df! {
    "countries" => &["China", "United States", "Germany", "India", "Russia", "France"],
    "totalNetWorths" => &[1_550.0, 3_400.0, 587.4, 718.6, 419.1, 541.5],
  }?;

  let by_industry = df! {
    "Industry" => &["Technology", "Retail", "Finance", "Energy", "Media", "Healthcare"],
    "totalNetWorths" => &[2_300.0, 1_050.5, 1_480.0, 612.3, 535.0, 720.8],
  }?;

  let canvas = WindowCanvas::new(style.window.clone())?;
  let mut charts = ChartRenderer::with_style(canvas, style)?;
  charts.render_magnitude(&by_country, GroupingKind::Country)?;
  charts.render_magnitude(&by_industry, GroupingKind::Industry)?;

  Ok(())
}
