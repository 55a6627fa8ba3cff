use serde::{Deserialize, Serialize};

/// One reduced 1D data point: `I(Q)` with its uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Scattering vector magnitude Q.
    pub x: f64,
    /// Measured intensity.
    pub y: f64,
    /// Uncertainty on `y`.
    pub error: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, error: f64) -> Self {
        Self { x, y, error }
    }

    /// Lower end of the error bar.
    pub fn low(&self) -> f64 {
        self.y - self.error
    }

    /// Upper end of the error bar.
    pub fn high(&self) -> f64 {
        self.y + self.error
    }

    /// Points with non-positive intensity, or an error bar reaching down to
    /// zero, are not plotted.
    pub fn is_plottable(&self) -> bool {
        self.y > 0.0 && self.error < self.y
    }
}

impl From<(f64, f64, f64)> for Sample {
    fn from((x, y, error): (f64, f64, f64)) -> Self {
        Self { x, y, error }
    }
}

/// Keep only plottable samples, preserving input order.
pub fn retain_plottable(samples: &[Sample]) -> Vec<Sample> {
    samples.iter().copied().filter(Sample::is_plottable).collect()
}

/// 2D detector intensities on a rectangular (Qx, Qy) grid.
///
/// `values[row][col]` sits at `(qx[col], qy[row])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub qx: Vec<f64>,
    pub qy: Vec<f64>,
    pub values: Vec<Vec<f64>>,
    pub max_intensity: f64,
}

impl Grid {
    /// Build a grid, taking `max_intensity` from the data.
    pub fn from_values(qx: Vec<f64>, qy: Vec<f64>, values: Vec<Vec<f64>>) -> Self {
        let max_intensity = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);
        Self {
            qx,
            qy,
            values,
            max_intensity,
        }
    }

    pub fn rows(&self) -> usize {
        self.values.len()
    }

    pub fn cols(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }
}
