use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Maps segment speeds onto a two-color gradient, normalized per movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedColorMap {
    pub low: Rgb,
    pub high: Rgb,
}

impl Default for SpeedColorMap {
    fn default() -> Self {
        Self {
            low: Rgb::new(0, 0, 255),
            high: Rgb::new(255, 0, 0),
        }
    }
}

impl SpeedColorMap {
    pub fn new(low: Rgb, high: Rgb) -> Self {
        Self { low, high }
    }

    /// One color per speed. When every speed is equal all segments get `low`.
    pub fn colors(&self, speeds: &[f64]) -> Vec<Rgb> {
        let finite = speeds.iter().copied().filter(|s| s.is_finite());
        let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s), hi.max(s))
        });
        let range = max - min;

        speeds
            .iter()
            .map(|s| {
                if range.is_nan() || range <= 0.0 || !s.is_finite() {
                    self.low
                } else {
                    self.low.lerp(self.high, (s - min) / range)
                }
            })
            .collect()
    }
}
