//! Utility functions for visualization: data extents, color ramps, intensity bucketing.

use std::f64::consts::FRAC_PI_2;

use crate::models::Sample;
use crate::scene::Rgb;

use super::types::Palette;

/// `[min(x), max(x)]` over the samples.
pub fn x_extent(samples: &[Sample]) -> Option<(f64, f64)> {
    extent(samples.iter().map(|s| s.x), samples.iter().map(|s| s.x))
}

/// `[min(y - error), max(y + error)]`: the vertical extent including error bars.
pub fn y_extent(samples: &[Sample]) -> Option<(f64, f64)> {
    extent(samples.iter().map(Sample::low), samples.iter().map(Sample::high))
}

fn extent<L, H>(lows: L, highs: H) -> Option<(f64, f64)>
where
    L: Iterator<Item = f64>,
    H: Iterator<Item = f64>,
{
    let lo = lows.fold(f64::INFINITY, f64::min);
    let hi = highs.fold(f64::NEG_INFINITY, f64::max);
    (lo <= hi).then_some((lo, hi))
}

/// Color of bucket `i` out of `n` on a four-phase rainbow ramp
/// (blue → cyan → green → yellow → red). Channels stay within `[30, 240]`.
pub fn rainbow_color(i: usize, n: usize) -> Rgb {
    const AMPLITUDE: f64 = 210.0;
    const FLOOR: u8 = 30;
    let n = n.max(1);
    let i = i.min(n - 1);
    let phase = i as f64 / n as f64;
    let angle = FRAC_PI_2 * phase * 4.0;
    let wave = |f: f64| (AMPLITUDE * f.abs()).round() as u8;
    let full = AMPLITUDE as u8;
    let (r, g, b) = if phase < 0.25 {
        (0, wave(angle.sin()), full)
    } else if phase < 0.5 {
        (0, full, wave(angle.cos()))
    } else if phase < 0.75 {
        (wave(angle.sin()), full, 0)
    } else {
        (full, wave(angle.cos()), 0)
    };
    Rgb::new(r + FLOOR, g + FLOOR, b + FLOOR)
}

/// ColorBrewer "Spectral" 11-class scheme, indexed by class `q{i}-11`.
const SPECTRAL11: [Rgb; 11] = [
    Rgb::new(0x9e, 0x01, 0x42),
    Rgb::new(0xd5, 0x3e, 0x4f),
    Rgb::new(0xf4, 0x6d, 0x43),
    Rgb::new(0xfd, 0xae, 0x61),
    Rgb::new(0xfe, 0xe0, 0x8b),
    Rgb::new(0xff, 0xff, 0xbf),
    Rgb::new(0xe6, 0xf5, 0x98),
    Rgb::new(0xab, 0xdd, 0xa4),
    Rgb::new(0x66, 0xc2, 0xa5),
    Rgb::new(0x32, 0x88, 0xbd),
    Rgb::new(0x5e, 0x4f, 0xa2),
];

/// Discretizes intensities into `n` buckets.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantizer {
    /// Equal-width buckets over `[0, max]`.
    Linear { max: f64, n: usize },
    /// Geometrically spaced thresholds `exp(step * i) - 1`, `i = 0..n-1`,
    /// with `step = ln(max + 1) / (n - 1)`. Bucket `i` holds
    /// `thresholds[i - 1] <= v < thresholds[i]`; the last bucket is open above.
    Log { max: f64, thresholds: Vec<f64> },
}

impl Quantizer {
    pub fn linear(max: f64, n: usize) -> Self {
        Quantizer::Linear { max, n: n.max(1) }
    }

    pub fn log(max: f64, n: usize) -> Self {
        let n = n.max(2);
        let step = (max + 1.0).ln() / (n - 1) as f64;
        let thresholds = (0..n - 1).map(|i| (step * i as f64).exp() - 1.0).collect();
        Quantizer::Log { max, thresholds }
    }

    pub fn buckets(&self) -> usize {
        match self {
            Quantizer::Linear { n, .. } => *n,
            Quantizer::Log { thresholds, .. } => thresholds.len() + 1,
        }
    }

    /// Bucket index of `v`, always in `0..buckets()`.
    pub fn bucket(&self, v: f64) -> usize {
        let last = self.buckets() - 1;
        match self {
            Quantizer::Linear { max, n } => {
                if *max <= 0.0 {
                    return 0;
                }
                let x = (v / max * *n as f64).floor();
                if x >= 0.0 { (x as usize).min(last) } else { 0 }
            }
            Quantizer::Log { thresholds, .. } => {
                // Zero (and anything not positive) stays in the first bucket.
                if !(v > 0.0) {
                    return 0;
                }
                thresholds.partition_point(|t| *t <= v).min(last)
            }
        }
    }
}

/// Fill and optional style class for each bucket of a palette.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    quantizer: Quantizer,
    palette: Palette,
}

impl ColorScale {
    pub fn new(palette: Palette, max_intensity: f64, log_scale: bool) -> Self {
        let n = palette.buckets();
        let quantizer = if log_scale {
            Quantizer::log(max_intensity, n)
        } else {
            Quantizer::linear(max_intensity, n)
        };
        Self { quantizer, palette }
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn bucket_style(&self, bucket: usize) -> (Rgb, Option<String>) {
        let n = self.quantizer.buckets();
        match self.palette {
            Palette::Rainbow => (rainbow_color(bucket, n), None),
            Palette::Spectral => {
                let i = bucket.min(SPECTRAL11.len() - 1);
                (SPECTRAL11[i], Some(format!("q{i}-11")))
            }
        }
    }

    pub fn style(&self, v: f64) -> (Rgb, Option<String>) {
        self.bucket_style(self.quantizer.bucket(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rainbow_starts_blue_and_ends_red() {
        assert_eq!(rainbow_color(0, 64), Rgb::new(30, 30, 240));
        let last = rainbow_color(63, 64);
        assert_eq!(last.r, 240);
        assert_eq!(last.b, 30);
    }

    #[test]
    fn linear_buckets_clamp_at_max() {
        let q = Quantizer::linear(100.0, 64);
        assert_eq!(q.bucket(0.0), 0);
        assert_eq!(q.bucket(50.0), 32);
        assert_eq!(q.bucket(100.0), 63);
        assert_eq!(q.bucket(-3.0), 0);
        assert_eq!(q.bucket(f64::NAN), 0);
    }

    #[test]
    fn log_buckets_span_zero_to_max() {
        let (max, n) = (1000.0_f64, 64);
        let q = Quantizer::log(max, n);
        assert_eq!(q.buckets(), n);
        let step = (max + 1.0).ln() / (n - 1) as f64;
        let bin = |i: usize| (step * i as f64).exp() - 1.0;
        for i in 1..n {
            let mid = (bin(i - 1) + bin(i)) / 2.0;
            assert_eq!(q.bucket(mid), i, "midpoint of bucket {i}");
            if i > 1 {
                assert_eq!(q.bucket(bin(i - 1)), i, "lower edge of bucket {i}");
            }
        }
        assert_eq!(q.bucket(0.0), 0);
        assert_eq!(q.bucket(0.999 * max), n - 1);
        assert_eq!(q.bucket(max), n - 1);
        assert_eq!(q.bucket(10.0 * max), n - 1);
        // Low intensities get finer resolution than high ones.
        assert!(q.bucket(10.0) > n / 4);
    }

    #[test]
    fn spectral_uses_named_classes() {
        let cs = ColorScale::new(Palette::Spectral, 10.0, false);
        assert_eq!(cs.style(0.0), (SPECTRAL11[0], Some("q0-11".to_string())));
        assert_eq!(cs.style(10.0).1.as_deref(), Some("q10-11"));
    }
}
