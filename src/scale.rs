//! Axis scales: map a data domain onto a pixel range, linearly or in log10 space.
//!
//! - "Nice" domains extend outward to round tick values
//! - Major ticks use the 1-2-5 step scheme; log axes tick on decades
//! - Minor ticks subdivide the gaps between major ticks

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Mapping applied between domain and range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    Linear,
    Log,
}

/// A monotonic mapping from `domain` to `range`.
///
/// Values outside the domain are not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    kind: ScaleKind,
    domain: (f64, f64),
    range: (f64, f64),
}

impl Scale {
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            kind: ScaleKind::Linear,
            domain,
            range,
        }
    }

    /// Log10 scale. Both domain ends must be positive.
    pub fn log(domain: (f64, f64), range: (f64, f64)) -> PlotResult<Self> {
        let (min, max) = domain;
        if !(min > 0.0 && max > 0.0) {
            return Err(PlotError::NonPositiveLogDomain { min, max });
        }
        Ok(Self {
            kind: ScaleKind::Log,
            domain,
            range,
        })
    }

    pub fn new(kind: ScaleKind, domain: (f64, f64), range: (f64, f64)) -> PlotResult<Self> {
        match kind {
            ScaleKind::Linear => Ok(Self::linear(domain, range)),
            ScaleKind::Log => Self::log(domain, range),
        }
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn forward(&self, v: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => v,
            ScaleKind::Log => v.log10(),
        }
    }

    fn backward(&self, t: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => t,
            ScaleKind::Log => 10f64.powf(t),
        }
    }

    /// Domain value to pixel.
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = (self.forward(self.domain.0), self.forward(self.domain.1));
        let (r0, r1) = self.range;
        let t = if d1 == d0 {
            0.5
        } else {
            (self.forward(v) - d0) / (d1 - d0)
        };
        r0 + t * (r1 - r0)
    }

    /// Pixel to domain value.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = (self.forward(self.domain.0), self.forward(self.domain.1));
        let (r0, r1) = self.range;
        let t = if r1 == r0 { 0.5 } else { (px - r0) / (r1 - r0) };
        self.backward(d0 + t * (d1 - d0))
    }

    /// Extend the domain outward so both ends land on round values.
    pub fn nice(self, count: usize) -> Self {
        let (lo, hi) = sorted_pair(self.domain.0, self.domain.1);
        let domain = match self.kind {
            ScaleKind::Linear => {
                let step = tick_step(lo, hi, count);
                if step > 0.0 {
                    ((lo / step).floor() * step, (hi / step).ceil() * step)
                } else {
                    (lo, hi)
                }
            }
            ScaleKind::Log => (
                10f64.powf(lo.log10().floor()),
                10f64.powf(hi.log10().ceil()),
            ),
        };
        Self { domain, ..self }
    }

    /// Major tick values inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = sorted_pair(self.domain.0, self.domain.1);
        match self.kind {
            ScaleKind::Linear => linear_ticks(lo, hi, count),
            ScaleKind::Log => log_ticks(lo, hi, count),
        }
    }

    /// Unlabeled ticks splitting each gap between `ticks` into `m + 1` parts.
    ///
    /// On linear scales the first gap's width is also used to extend the
    /// subdivision before the first and after the last major tick, as far
    /// as the domain reaches.
    pub fn subdivide(&self, ticks: &[f64], m: usize) -> Vec<f64> {
        if m == 0 || ticks.len() < 2 {
            return Vec::new();
        }
        let (lo, hi) = sorted_pair(self.domain.0, self.domain.1);
        let parts = (m + 1) as f64;
        let mut out = Vec::new();
        match self.kind {
            ScaleKind::Linear => {
                let d = (ticks[1] - ticks[0]) / parts;
                for &t in ticks {
                    for j in (1..=m).rev() {
                        let v = t - j as f64 * d;
                        if v >= lo {
                            out.push(v);
                        }
                    }
                }
                let last = ticks[ticks.len() - 1];
                for j in 1..=m {
                    let v = last + j as f64 * d;
                    if v >= hi {
                        break;
                    }
                    out.push(v);
                }
            }
            ScaleKind::Log => {
                for pair in ticks.windows(2) {
                    let d = (pair[1] - pair[0]) / parts;
                    out.extend((1..=m).map(|j| pair[0] + j as f64 * d));
                }
            }
        }
        out
    }
}

/// Return `(min, max)` for two values.
fn sorted_pair(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Step between ticks for roughly `count` ticks over `[start, stop]`, from the
/// 1-2-5 sequence scaled by a power of ten. Returns 0 for an empty span.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = stop - start;
    if !(span > 0.0) || !span.is_finite() || count == 0 {
        return 0.0;
    }
    let mut step = 10f64.powf((span / count as f64).log10().floor());
    let err = count as f64 / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    step
}

fn linear_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let step = tick_step(lo, hi, count);
    if step <= 0.0 {
        return if lo.is_finite() { vec![lo] } else { Vec::new() };
    }
    // Small tolerance so the upper end survives float noise.
    let k0 = (lo / step).ceil() as i64;
    let k1 = (hi / step + 1e-9).floor() as i64;
    (k0..=k1).map(|k| k as f64 * step).collect()
}

fn log_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let e0 = lo.log10().floor() as i32;
    let e1 = hi.log10().ceil() as i32;
    let within = |v: f64| v >= lo * (1.0 - 1e-12) && v <= hi * (1.0 + 1e-12);
    let decade_multiples = |mults: &[f64]| -> Vec<f64> {
        (e0..=e1)
            .flat_map(|e| mults.iter().map(move |m| m * 10f64.powi(e)))
            .filter(|v| within(*v))
            .collect()
    };

    let limit = 2 * count.max(1);
    let mut ticks = decade_multiples(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    if ticks.len() > limit {
        ticks = decade_multiples(&[1.0, 2.0, 5.0]);
    }
    if ticks.len() > limit {
        ticks = decade_multiples(&[1.0]);
    }
    if ticks.len() < 2 {
        // Narrow domain inside a single decade.
        return linear_ticks(lo, hi, count);
    }
    ticks
}

/// `(min, max)` of finite values, widened when every value is the same.
pub fn padded_extent<I>(values: I, kind: ScaleKind) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return None;
    }
    if min < max {
        return Some((min, max));
    }
    Some(match kind {
        ScaleKind::Log => (min / 10.0, max * 10.0),
        ScaleKind::Linear if min == 0.0 => (-1.0, 1.0),
        ScaleKind::Linear => (min - min.abs() * 0.1, max + max.abs() * 0.1),
    })
}
