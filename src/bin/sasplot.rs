use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use sasplot::viz::{self, Palette, PlotOptions1D, PlotOptions2D, SeriesStyle};
use sasplot::{Surface, storage};

#[derive(Parser, Debug)]
#[command(
    name = "sasplot",
    version,
    about = "Render reduced small-angle scattering data as SVG charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot I(Q) with error bars from a three-column file (q I dI).
    Iq(IqArgs),
    /// Plot an I(Qx, Qy) heatmap from a JSON grid.
    Iqxy(IqxyArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PaletteArg {
    Rainbow,
    Spectral,
}

impl From<PaletteArg> for Palette {
    fn from(p: PaletteArg) -> Self {
        match p {
            PaletteArg::Rainbow => Palette::Rainbow,
            PaletteArg::Spectral => Palette::Spectral,
        }
    }
}

/// Flags shared by both chart kinds.
#[derive(Args, Debug)]
struct CommonArgs {
    /// Output SVG path.
    #[arg(short, long)]
    out: PathBuf,
    /// JSON file with plot options; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Write the scene tree as JSON to this path.
    #[arg(long)]
    scene: Option<PathBuf>,
    /// Logarithmic intensity scale.
    #[arg(long, default_value_t = false)]
    log: bool,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    x_label: Option<String>,
    #[arg(long)]
    y_label: Option<String>,
}

#[derive(Args, Debug)]
struct IqArgs {
    /// Input file (.txt/.dat whitespace separated, or .csv).
    input: PathBuf,
    #[command(flatten)]
    common: CommonArgs,
    /// Draw grid lines.
    #[arg(long, default_value_t = false)]
    grid: bool,
    /// Logarithmic Q axis.
    #[arg(long, default_value_t = false)]
    log_x: bool,
    /// Marker color (#rrggbb).
    #[arg(long)]
    color: Option<String>,
    /// Marker radius in pixels.
    #[arg(long)]
    marker_size: Option<f64>,
    /// Print the readout of the point nearest to this Q.
    #[arg(long)]
    probe: Option<f64>,
    /// Extra data set drawn over the first one (repeatable).
    #[arg(long = "overlay", value_name = "FILE")]
    overlays: Vec<PathBuf>,
}

/// Marker colors for overlaid data sets, in order.
const OVERLAY_COLORS: [&str; 4] = ["#d62728", "#2ca02c", "#9467bd", "#ff7f0e"];

#[derive(Args, Debug)]
struct IqxyArgs {
    /// Input JSON grid.
    input: PathBuf,
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, value_enum)]
    palette: Option<PaletteArg>,
}

fn read_options<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(p) => {
            let s = std::fs::read_to_string(p)
                .with_context(|| format!("reading options from {}", p.display()))?;
            serde_json::from_str(&s).with_context(|| format!("parsing options in {}", p.display()))
        }
        None => Ok(T::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Iq(args) => cmd_iq(args),
        Command::Iqxy(args) => cmd_iqxy(args),
    }
}

fn cmd_iq(args: IqArgs) -> Result<()> {
    let c = &args.common;
    let mut opts: PlotOptions1D = read_options(c.options.as_deref())?;
    opts.log_scale |= c.log;
    opts.x_log_scale |= args.log_x;
    opts.grid |= args.grid;
    if let Some(w) = c.width {
        opts.width = w;
    }
    if let Some(h) = c.height {
        opts.height = h;
    }
    if let Some(t) = &c.title {
        opts.title = t.clone();
    }
    if let Some(l) = &c.x_label {
        opts.x_label = l.clone();
    }
    if let Some(l) = &c.y_label {
        opts.y_label = l.clone();
    }
    if let Some(col) = &args.color {
        opts.color = col.clone();
    }
    if let Some(ms) = args.marker_size {
        opts.marker_size = ms;
    }

    let samples = storage::load_iq(&args.input)?;
    log::info!("read {} samples from {}", samples.len(), args.input.display());
    let mut sets = vec![(samples, opts.series_style())];
    for (path, color) in args.overlays.iter().zip(OVERLAY_COLORS.iter().cycle()) {
        let extra = storage::load_iq(path)?;
        log::info!("read {} overlay samples from {}", extra.len(), path.display());
        let style = SeriesStyle {
            color: (*color).to_string(),
            ..opts.series_style()
        };
        sets.push((extra, style));
    }
    let series: Vec<_> = sets.iter().map(|(s, style)| (s.as_slice(), style.clone())).collect();

    let mut surface = Surface::new();
    let chart = viz::render_1d_layers(&mut surface, &series, viz::DEFAULT_ANCHOR_1D, &opts)?;
    if let Some(x0) = args.probe
        && let Some(s) = chart.probe(x0)
    {
        println!("{}", viz::text::readout(&s));
    }
    storage::save_svg(chart, &c.out)?;
    eprintln!("Wrote plot to {}", c.out.display());
    if let Some(path) = &c.scene {
        storage::save_scene_json(chart, path)?;
        eprintln!("Wrote scene to {}", path.display());
    }
    Ok(())
}

fn cmd_iqxy(args: IqxyArgs) -> Result<()> {
    let c = &args.common;
    let mut opts: PlotOptions2D = read_options(c.options.as_deref())?;
    opts.log_scale |= c.log;
    if let Some(p) = args.palette {
        opts.palette = p.into();
    }
    if let Some(w) = c.width {
        opts.width = w;
    }
    if let Some(h) = c.height {
        opts.height = h;
    }
    if let Some(t) = &c.title {
        opts.title = t.clone();
    }
    if let Some(l) = &c.x_label {
        opts.x_label = l.clone();
    }
    if let Some(l) = &c.y_label {
        opts.y_label = l.clone();
    }

    let grid = storage::load_grid(&args.input)?;
    log::info!(
        "read {}x{} grid from {} (max intensity {})",
        grid.rows(),
        grid.cols(),
        args.input.display(),
        grid.max_intensity
    );

    let mut surface = Surface::new();
    let chart = viz::render_grid(&mut surface, &grid, &opts)?;
    storage::save_svg(chart, &c.out)?;
    eprintln!("Wrote heatmap to {}", c.out.display());
    if let Some(path) = &c.scene {
        storage::save_scene_json(chart, path)?;
        eprintln!("Wrote scene to {}", path.display());
    }
    Ok(())
}
