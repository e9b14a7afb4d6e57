use networth_plot::{ChartError, ChartRenderer, GroupingKind, WindowCanvas, WindowStyle};
use polars::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ChartError> {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let last_change = df! {
    "Last_change" => &["United States", "China", "India", "Mexico", "Brazil"],
    "change" => &[12.4, -8.75, 3.1, -1.2, 0.6],
  }?;

  let ytd = df! {
    "Industry" => &["Technology", "Retail", "Energy", "Finance"],
    "YTD_change" => &[182.0, -35.5, 20.25, 64.0],
  }?;

  let mut charts = ChartRenderer::new(WindowCanvas::new(WindowStyle::default())?);
  charts.render_change(&last_change, GroupingKind::from_change_column("Last_change"))?;
  charts.render_change(&ytd, GroupingKind::Industry)?;

  Ok(())
}
