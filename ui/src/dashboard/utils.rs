//! Small chart scales shared by the dashboard components.

/// Maps `[d0, d1]` linearly onto `[r0, r1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub(crate) fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub(crate) fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub(crate) fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// Evenly spaced bands with equal inner and outer padding, centred in the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub(crate) fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let n = count as f64;
        let span = range.1 - range.0;
        let step = span / (n - padding + 2.0 * padding).max(1.0);
        let start = range.0 + (span - step * (n - padding)) * 0.5;
        Self {
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub(crate) fn position(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }

    pub(crate) fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

/// Discrete points spread across the range; a single point sits in the middle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PointScale {
    start: f64,
    step: f64,
}

impl PointScale {
    pub(crate) fn new(count: usize, range: (f64, f64)) -> Self {
        let span = range.1 - range.0;
        let gaps = count.saturating_sub(1) as f64;
        let step = span / gaps.max(1.0);
        Self {
            start: range.0 + (span - step * gaps) * 0.5,
            step,
        }
    }

    pub(crate) fn position(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }
}

/// Round tick values covering `[start, stop]`, roughly `count` of them
/// (steps of 1, 2 or 5 times a power of ten).
pub(crate) fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };

    let raw = (hi - lo) / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    let step = factor * power;

    // Sub-unit steps divide by the inverse to keep values like 0.3 exact.
    if step < 1.0 {
        let inverse = (1.0 / step).round();
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        return (first..=last).map(|i| i as f64 / inverse).collect();
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Rough label width in SVG user units for the floating name badges.
pub(crate) fn badge_width(label: &str) -> f64 {
    label.chars().count() as f64 * 10.0
}
