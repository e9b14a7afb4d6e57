use networth_plot::{
  Bar, Canvas, ChartError, ChartRenderer, ChartStyle, GroupingKind, Plot, networth,
};
use polars::prelude::*;

/// What a recorded plot looked like when it was shown.
#[derive(Debug, Clone, PartialEq)]
struct Shown {
  title:      Option<String>,
  x_title:    Option<String>,
  y_title:    Option<String>,
  bars:       Vec<Bar>,
  rect_count: usize,
}

#[derive(Default)]
struct RecordingCanvas {
  shown: Vec<Shown>,
}

impl Canvas for RecordingCanvas {
  fn show(&mut self, plot: &Plot) -> Result<(), ChartError> {
    let bars = plot.bars().expect("plot has bars");
    self.shown.push(Shown {
      title:      plot.title_text().map(String::from),
      x_title:    plot.x.title_text().map(String::from),
      y_title:    plot.y.title_text().map(String::from),
      bars:       bars.bars().to_vec(),
      rect_count: bars.layout().len(),
    });
    Ok(())
  }
}

fn labels(shown: &Shown) -> Vec<&str> { shown.bars.iter().map(|b| b.label.as_str()).collect() }

#[test_log::test]
fn country_net_worth_chart() {
  let df = df! {
    "countries" => &["USA", "China"],
    "totalNetWorths" => &[500, 300],
  }
  .unwrap();

  let mut charts = ChartRenderer::new(RecordingCanvas::default());
  charts.render_magnitude(&df, GroupingKind::Country).unwrap();

  let shown = &charts.canvas().shown[0];
  assert_eq!(labels(shown), vec!["USA", "China"]);
  assert_eq!(shown.rect_count, 2);
  assert_eq!(shown.title.as_deref(), Some("Total Billionaires Net Worth By Country"));
  assert_eq!(shown.x_title.as_deref(), Some("Country"));
}

#[test_log::test]
fn industry_net_worth_chart() {
  let df = df! {
    "Industry" => &["Tech", "Retail"],
    "totalNetWorths" => &[900, 950],
  }
  .unwrap();

  let mut charts = ChartRenderer::new(RecordingCanvas::default());
  charts.render_magnitude(&df, GroupingKind::Industry).unwrap();

  let shown = &charts.canvas().shown[0];
  assert_eq!(labels(shown), vec!["Retail", "Tech"]);
  assert_eq!(shown.bars[0].value, 950.0);
  assert_eq!(shown.title.as_deref(), Some("Total Billionaires Net Worth By Industry"));
}

#[test_log::test]
fn change_charts_pick_framing_from_grouping() {
  let country = df! {
    "Last_change" => &["USA", "China", "India"],
    "change" => &[-4.5, 10.0, 2.25],
  }
  .unwrap();
  let industry = df! {
    "Industry" => &["Tech", "Energy"],
    "YTD_change" => &[1.5, 7.0],
  }
  .unwrap();

  let mut charts = ChartRenderer::new(RecordingCanvas::default());
  let grouping = GroupingKind::from_change_column(country.get_column_names()[0]);
  charts.render_change(&country, grouping).unwrap();
  charts.render_change(&industry, GroupingKind::Industry).unwrap();

  let shown = &charts.canvas().shown;
  assert_eq!(labels(&shown[0]), vec!["China", "India", "USA"]);
  assert_eq!(shown[0].x_title.as_deref(), Some("Country"));
  assert_eq!(shown[0].y_title.as_deref(), Some("Last Change"));
  assert_eq!(shown[1].x_title.as_deref(), Some("Industry"));
  assert_eq!(shown[1].y_title.as_deref(), Some("YTD Change"));
}

#[test_log::test]
fn bars_are_sorted_and_counted() {
  let values = [3.0, 14.0, 15.0, 9.0, 26.0, 5.0, 35.0, 8.0, 9.0, 79.0];
  let names: Vec<String> = (0..values.len()).map(|i| format!("group {i}")).collect();
  let df = DataFrame::new(vec![
    Column::new("Industry".into(), names),
    Column::new("totalNetWorths".into(), values.to_vec()),
  ])
  .unwrap();

  let plot =
    networth::magnitude_plot(&df, GroupingKind::Industry, &ChartStyle::default()).unwrap();
  let bars = plot.bars().unwrap().bars();

  assert_eq!(bars.len(), values.len());
  assert!(bars.windows(2).all(|w| w[0].value >= w[1].value));
}

#[test_log::test]
fn rendering_twice_is_identical_and_leaves_input_alone() {
  let df = df! {
    "countries" => &["France", "USA", "China", "Germany"],
    "totalNetWorths" => &[541.5, 3400.0, 1550.0, 587.4],
  }
  .unwrap();
  let before = df.clone();

  let mut charts = ChartRenderer::new(RecordingCanvas::default());
  charts.render_magnitude(&df, GroupingKind::Country).unwrap();
  charts.render_magnitude(&df, GroupingKind::Country).unwrap();

  let shown = charts.into_canvas().shown;
  assert_eq!(shown[0], shown[1]);
  assert!(df.equals(&before));
}

#[test_log::test]
fn invalid_frames_are_reported() {
  let mut charts = ChartRenderer::new(RecordingCanvas::default());

  let text_values = df! {
    "countries" => &["USA"],
    "totalNetWorths" => &["a lot"],
  }
  .unwrap();
  assert!(matches!(
    charts.render_magnitude(&text_values, GroupingKind::Country),
    Err(ChartError::NonNumeric { .. })
  ));

  let one_column = df! { "countries" => &["USA"] }.unwrap();
  assert!(matches!(
    charts.render_change(&one_column, GroupingKind::Country),
    Err(ChartError::MissingColumns { found: 1 })
  ));

  assert!(charts.canvas().shown.is_empty());
}

#[test_log::test]
fn style_flows_into_bars() {
  let style = ChartStyle::from_yaml_str("bar_width: 0.8\ncolor: [0, 128, 255]\nopacity: 1.0\n")
    .unwrap();
  let df = df! {
    "Industry" => &["Tech", "Retail"],
    "totalNetWorths" => &[1.0, 2.0],
  }
  .unwrap();

  let plot = networth::magnitude_plot(&df, GroupingKind::Industry, &style).unwrap();
  let layout = plot.bars().unwrap().layout();
  assert!((layout[0].width() - 0.8).abs() < 1e-12);
  assert_eq!(plot.bars().unwrap().options().color, style.bar_color());

  assert!(matches!(
    ChartRenderer::with_style(RecordingCanvas::default(), ChartStyle {
      opacity: 2.0,
      ..ChartStyle::default()
    }),
    Err(ChartError::InvalidStyle(_))
  ));
}
