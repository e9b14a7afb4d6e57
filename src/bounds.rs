use kurbo::Affine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

/// A span along one axis. `min` may be larger than `max`, which is how the
/// viewport flips the y axis to point up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Bounds {
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl Default for Range {
  fn default() -> Self { Range::empty() }
}

impl Range {
  pub const fn empty() -> Self { Range { min: 0.0, max: 0.0 } }
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  /// Smallest range holding both ends of `self` and zero.
  pub fn including_zero(&self) -> Range { Range { min: self.min.min(0.0), max: self.max.max(0.0) } }

  /// Pads whichever ends sit away from zero by `fract` of the size.
  pub fn pad_away_from_zero(self, fract: f64) -> Range {
    let pad = self.size() * fract;
    Range {
      min: if self.min < 0.0 { self.min - pad } else { self.min },
      max: if self.max > 0.0 { self.max + pad } else { self.max },
    }
  }

  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let step = (self.max - self.min) / f64::from(count);
    let k = step.log10().floor();
    let base = step / 10f64.powf(k);

    let nice_base = match base {
      b if b < 1.0 => 1.0,
      b if b < 2.0 => 2.0,
      b if b < 2.5 => 2.5,
      b if b < 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powf(k);
    let lo = (self.min / step).floor() * step;
    let hi = (self.max / step).ceil() * step;

    let precision = (-k as i32 + 4).max(0) as usize;
    NiceTicksIter::new(lo, hi, step, precision, step_decimals(step))
  }
}

/// Fewest decimals that print every multiple of `step` exactly.
fn step_decimals(step: f64) -> usize {
  const MAX: i32 = 12;
  (0..=MAX)
    .find(|&d| {
      let scaled = step * 10f64.powi(d);
      (scaled - scaled.round()).abs() < 1e-9 * scaled.abs().max(1.0)
    })
    .unwrap_or(MAX) as usize
}

pub struct NiceTicksIter {
  current:   f64,
  step:      f64,
  hi:        f64,
  precision: usize,
  decimals:  usize,
}

impl NiceTicksIter {
  fn new(lo: f64, hi: f64, step: f64, precision: usize, decimals: usize) -> Self {
    NiceTicksIter { current: lo, step, hi, precision, decimals }
  }

  /// Number of decimals needed to print every tick without noise.
  pub fn decimals(&self) -> usize { self.decimals }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.current < self.hi + self.step * 0.5 {
      let p = 10f64.powi(self.precision as i32);
      let result = (self.current * p).round() / p;
      self.current += self.step;
      Some(result)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use kurbo::Point;

  use super::*;

  #[test]
  fn nice_ticks_cover_range() {
    let ticks: Vec<f64> = Range::new(0.0, 950.0).nice_ticks(10).collect();
    assert_eq!(ticks.first(), Some(&0.0));
    assert_eq!(ticks.last(), Some(&1000.0));
    assert_eq!(ticks[1], 100.0);
    assert_eq!(Range::new(0.0, 950.0).nice_ticks(10).decimals(), 0);
  }

  #[test]
  fn negative_ranges_tick_through_zero() {
    let iter = Range::new(-30.0, 20.0).nice_ticks(10);
    assert_eq!(iter.decimals(), 0);
    let ticks: Vec<f64> = iter.collect();
    assert_eq!(ticks, vec![-30.0, -20.0, -10.0, 0.0, 10.0, 20.0]);
  }

  #[test]
  fn decimals_follow_the_rounded_step() {
    // Raw step 5.5 rounds up to 10, which prints without decimals.
    assert_eq!(Range::new(-32.5, 22.5).nice_ticks(10).decimals(), 0);
    // Raw step 0.2 rounds up to 0.25.
    assert_eq!(Range::new(0.0, 2.0).nice_ticks(10).decimals(), 2);
    assert_eq!(Range::new(0.0, 5.0).nice_ticks(10).decimals(), 1);
  }

  #[test]
  fn huge_ranges_do_not_underflow_decimals() {
    assert_eq!(Range::new(0.0, 9.0e11).nice_ticks(10).decimals(), 0);
  }

  #[test]
  fn padding_only_grows_away_from_zero() {
    assert_eq!(Range::new(0.0, 100.0).pad_away_from_zero(0.05), Range::new(0.0, 105.0));
    assert_eq!(Range::new(-100.0, 0.0).pad_away_from_zero(0.05), Range::new(-105.0, 0.0));
    assert_eq!(Range::new(5.0, 10.0).including_zero(), Range::new(0.0, 10.0));
  }

  #[test]
  fn transform_flips_y() {
    let data = Bounds::new(Range::new(0.0, 10.0), Range::new(0.0, 100.0));
    let viewport = Bounds::new(Range::new(100.0, 1100.0), Range::new(900.0, 100.0));
    let t = data.transform_to(viewport);

    assert_eq!(t * Point::new(0.0, 0.0), Point::new(100.0, 900.0));
    assert_eq!(t * Point::new(10.0, 100.0), Point::new(1100.0, 100.0));
    assert!(viewport.y.contains(&500.0));
  }
}
