use std::{fs, path::Path};

use color::{AlphaColor, Srgb};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ChartError;

/// Visual settings shared by every chart a renderer draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
  /// Bar width in index units, where adjacent bars are 1.0 apart.
  pub bar_width:      f64,
  pub opacity:        f32,
  /// Bar colour as `[r, g, b]`.
  pub color:          [u8; 3],
  /// Rotation of the category tick labels, in degrees counter-clockwise.
  pub label_rotation: f64,
  pub legend:         bool,
  pub window:         WindowStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowStyle {
  pub width:  u32,
  pub height: u32,
  pub title:  String,
}

impl Default for ChartStyle {
  fn default() -> Self {
    ChartStyle {
      bar_width:      0.35,
      opacity:        0.4,
      color:          [255, 0, 0],
      label_rotation: 90.0,
      legend:         true,
      window:         WindowStyle::default(),
    }
  }
}

impl Default for WindowStyle {
  fn default() -> Self { WindowStyle { width: 1200, height: 800, title: "Billionaires".into() } }
}

impl ChartStyle {
  pub fn from_yaml_str(s: &str) -> Result<Self, ChartError> {
    let style: ChartStyle = serde_yaml::from_str(s)?;
    style.validate()?;
    Ok(style)
  }

  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ChartError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading chart style");
    ChartStyle::from_yaml_str(&fs::read_to_string(path)?)
  }

  pub fn validate(&self) -> Result<(), ChartError> {
    if !(self.bar_width > 0.0 && self.bar_width <= 1.0) {
      return Err(ChartError::InvalidStyle(format!(
        "bar_width must be in (0, 1], got {}",
        self.bar_width
      )));
    }
    if !(0.0..=1.0).contains(&self.opacity) {
      return Err(ChartError::InvalidStyle(format!(
        "opacity must be in [0, 1], got {}",
        self.opacity
      )));
    }
    if self.window.width == 0 || self.window.height == 0 {
      return Err(ChartError::InvalidStyle("window size must be non-zero".into()));
    }
    Ok(())
  }

  /// The bar colour with the configured translucency applied.
  pub fn bar_color(&self) -> AlphaColor<Srgb> {
    let [r, g, b] = self.color;
    AlphaColor::from_rgb8(r, g, b).with_alpha(self.opacity)
  }
}
