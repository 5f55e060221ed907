//! Quantized value → color mapping for the choropleth and bars.

/// Nine-step sequential blues, light to dark.
pub const BLUES: [&str; 9] = [
    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
    "#08306b",
];

/// Qualitative palette for distinguishing trend lines.
pub const SERIES: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

/// Fill for regions without a mapped value.
pub const NEUTRAL_FILL: &str = "#cccccc";

/// Fill for bars when no color mapping is available.
pub const FALLBACK_BAR_FILL: &str = "steelblue";

/// Headroom applied to the observed maximum so it never sits on the top edge.
pub const DOMAIN_HEADROOM: f64 = 1.05;

pub fn series_color(index: usize) -> &'static str {
    SERIES[index % SERIES.len()]
}

/// Step function splitting `[min, max * 1.05]` into equal buckets, one per
/// palette entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMapping {
    domain: (f64, f64),
    palette: Vec<&'static str>,
}

impl ColorMapping {
    /// `None` when there is no finite value to map.
    pub fn build<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        Self::with_palette(values, &BLUES)
    }

    pub fn with_palette<I>(values: I, palette: &[&'static str]) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        if palette.is_empty() {
            return None;
        }
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        Some(Self {
            domain: (min, max * DOMAIN_HEADROOM),
            palette: palette.to_vec(),
        })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn palette(&self) -> &[&'static str] {
        &self.palette
    }

    /// Bucket index for `value`, clamped to the palette.
    pub fn bucket(&self, value: f64) -> usize {
        let last = self.palette.len() - 1;
        let (lo, hi) = self.domain;
        let span = hi - lo;
        if !value.is_finite() {
            return 0;
        }
        if span == 0.0 || !span.is_finite() {
            return if value < lo { 0 } else { last };
        }
        let t = (value - lo) / span;
        let index = (t * self.palette.len() as f64).floor();
        if index <= 0.0 {
            0
        } else {
            (index as usize).min(last)
        }
    }

    pub fn color(&self, value: f64) -> &'static str {
        self.palette[self.bucket(value)]
    }

    /// Inner bucket boundaries (`palette.len() - 1` of them).
    pub fn thresholds(&self) -> Vec<f64> {
        let (lo, hi) = self.domain;
        let n = self.palette.len();
        (1..n)
            .map(|i| lo + (hi - lo) * i as f64 / n as f64)
            .collect()
    }
}
