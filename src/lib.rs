//! sasplot
//!
//! A small Rust library for charting reduced small-angle scattering data.
//! Pairs with the `sasplot` CLI.
//!
//! ### Features
//! - `I(Q)` charts: points with error bars, optional log intensity axis, grid
//!   lines, minor ticks and a nearest-point hover readout
//! - Several `I(Q)` data sets overlaid on one chart, each with its own marker style
//! - `I(Qx, Qy)` heatmaps with quantized rainbow or Spectral color buckets on a
//!   linear or logarithmic intensity scale
//! - Charts are scene graphs mounted on named anchors of a [`Surface`];
//!   re-rendering an anchor replaces its chart
//! - SVG export through plotters, JSON dump of the scene tree
//!
//! ### Example
//! ```no_run
//! use sasplot::{Sample, Surface, viz};
//!
//! let samples = vec![Sample::new(0.01, 120.0, 4.0), Sample::new(0.02, 80.0, 3.5)];
//! let mut surface = Surface::new();
//! let opts = viz::PlotOptions1D { log_scale: true, ..Default::default() };
//! let chart = viz::render_1d(&mut surface, &samples, "plot_anchor", &opts)?;
//! if let Some(s) = chart.probe(0.012) {
//!     println!("nearest: {s:?}");
//! }
//! sasplot::storage::save_svg(chart, "iq.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod models;
pub mod scale;
pub mod scene;
pub mod scene_plotters_adapter;
pub mod storage;
pub mod surface;
pub mod viz;

pub use error::{PlotError, PlotResult};
pub use models::{Grid, Sample};
pub use surface::{Chart, ChartKind, Surface};
