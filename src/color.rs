use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

use crate::query::Metric;

// ---------------------------------------------------------------------------
// Fixed chart colours
// ---------------------------------------------------------------------------

pub const BAR_COLOR: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);
pub const TREND_COLOR: Color32 = Color32::RED;
pub const MISSING_COLOR: Color32 = Color32::GRAY;

/// Line colour of each time-series metric.
pub fn metric_color(metric: Metric) -> Color32 {
    match metric {
        Metric::TripCount => Color32::from_rgb(0xe7, 0x4c, 0x3c),
        Metric::AvgFare => Color32::from_rgb(0x27, 0xae, 0x60),
        Metric::AvgDistance => Color32::from_rgb(0x29, 0x80, 0xb9),
    }
}

// ---------------------------------------------------------------------------
// Continuous precipitation scale (Viridis)
// ---------------------------------------------------------------------------

/// Viridis anchor colours, low to high.
const VIRIDIS: [(f32, f32, f32); 5] = [
    (0.267, 0.005, 0.329),
    (0.231, 0.322, 0.545),
    (0.129, 0.569, 0.549),
    (0.369, 0.788, 0.384),
    (0.993, 0.906, 0.144),
];

/// Colour at position `t` in `[0, 1]` along the Viridis ramp, interpolated
/// in linear RGB.
pub fn viridis(t: f32) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f32;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - i as f32;

    let anchor = |(r, g, b): (f32, f32, f32)| -> LinSrgb { Srgb::new(r, g, b).into_linear() };
    let mixed = anchor(VIRIDIS[i]).mix(anchor(VIRIDIS[i + 1]), frac);
    let rgb: Srgb = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

/// Maps precipitation values onto a fixed number of Viridis steps so the
/// scatter plot can draw one point series per step.
#[derive(Debug, Clone)]
pub struct PrecipitationScale {
    min: f64,
    max: f64,
    steps: usize,
}

impl PrecipitationScale {
    pub fn new(range: Option<(f64, f64)>, steps: usize) -> Self {
        let (min, max) = range.unwrap_or((0.0, 0.0));
        PrecipitationScale {
            min,
            max,
            steps: steps.max(1),
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step index of a value; `None` for a missing value.
    pub fn step_for(&self, value: Option<f64>) -> Option<usize> {
        let v = value?;
        let span = self.max - self.min;
        if span <= 0.0 {
            return Some(0);
        }
        let t = ((v - self.min) / span).clamp(0.0, 1.0);
        Some(((t * self.steps as f64) as usize).min(self.steps - 1))
    }

    pub fn color_for_step(&self, step: usize) -> Color32 {
        if self.steps == 1 {
            return viridis(0.0);
        }
        viridis(step as f32 / (self.steps - 1) as f32)
    }

    /// Lower bound of the values in `step`.
    pub fn step_lower(&self, step: usize) -> f64 {
        self.min + (self.max - self.min) * step as f64 / self.steps as f64
    }

    /// Legend entries (value label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        (0..self.steps)
            .map(|s| (format!("≥ {:.2}", self.step_lower(s)), self.color_for_step(s)))
            .collect()
    }
}
