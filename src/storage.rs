//! Reading reduced data files and writing rendered charts.
//!
//! - `I(Q)`: three columns `q  I  dI`, whitespace separated (`.txt`, `.dat`, …)
//!   or comma separated (`.csv`). Lines that do not start with three numbers
//!   are skipped.
//! - `I(Qx, Qy)`: JSON `{"qx": [...], "qy": [...], "values": [[...]], "max_intensity": ...}`
//!   with `values[row][col]`; `null` cells read as 0.

use crate::models::{Grid, Sample};
use crate::surface::Chart;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

fn parse_triple<'a, I>(mut tokens: I) -> Option<Sample>
where
    I: Iterator<Item = &'a str>,
{
    let mut next = || tokens.next()?.trim().parse::<f64>().ok();
    Some(Sample::new(next()?, next()?, next()?))
}

/// Parse whitespace-separated `q I dI` lines.
pub fn parse_iq_text(content: &str) -> Vec<Sample> {
    let mut skipped = 0usize;
    let mut out = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_triple(line.split_whitespace()) {
            Some(s) => out.push(s),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} malformed I(Q) line(s)");
    }
    out
}

/// Load `I(Q)` samples; `.csv` files go through the CSV reader.
pub fn load_iq<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let samples = if is_csv {
        load_iq_csv(path)?
    } else {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading I(Q) data from {}", path.display()))?;
        parse_iq_text(&content)
    };
    log::debug!("loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

fn load_iq_csv(path: &Path) -> Result<Vec<Sample>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut skipped = 0usize;
    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record?;
        match parse_triple(record.iter()) {
            Some(s) => out.push(s),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} malformed row(s) in {}", path.display());
    }
    Ok(out)
}

/// On-disk shape of a 2D grid.
#[derive(Debug, Deserialize)]
struct GridFile {
    qx: Vec<f64>,
    qy: Vec<f64>,
    values: Vec<Vec<Option<f64>>>,
    #[serde(default)]
    max_intensity: Option<f64>,
}

/// Parse an `I(Qx, Qy)` JSON document. Missing and non-finite cells become 0;
/// a missing `max_intensity` is taken from the data.
pub fn parse_grid_json(content: &str) -> Result<Grid> {
    let raw: GridFile = serde_json::from_str(content).context("parsing I(Qx, Qy) JSON")?;
    let values: Vec<Vec<f64>> = raw
        .values
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|v| v.filter(|v| v.is_finite()).unwrap_or(0.0))
                .collect()
        })
        .collect();
    let mut grid = Grid::from_values(raw.qx, raw.qy, values);
    if let Some(max) = raw.max_intensity {
        grid.max_intensity = max;
    }
    Ok(grid)
}

pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading I(Qx, Qy) data from {}", path.display()))?;
    parse_grid_json(&content).with_context(|| format!("in {}", path.display()))
}

/// Write the chart as an SVG document.
pub fn save_svg<P: AsRef<Path>>(chart: &Chart, path: P) -> Result<()> {
    let svg = chart.to_svg()?;
    let mut f = File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    f.write_all(svg.as_bytes())?;
    Ok(())
}

/// Write the chart's scene tree as pretty JSON.
pub fn save_scene_json<P: AsRef<Path>>(chart: &Chart, path: P) -> Result<()> {
    let mut f = File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    let s = serde_json::to_string_pretty(&chart.scene())?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn text_parser_skips_headers_and_short_lines() {
        let s = parse_iq_text("# q I dI\nQ I dI\n0.01 12.5 0.3 0.002\n0.02 8\n\n0.03 4.0 0.2\n");
        assert_eq!(s, vec![Sample::new(0.01, 12.5, 0.3), Sample::new(0.03, 4.0, 0.2)]);
    }

    #[test]
    fn csv_and_text_files_load() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("iq.csv");
        let txtp = dir.path().join("iq.txt");
        fs::write(&csvp, "q,I,dI\n0.01, 12.5, 0.3\n0.02,8.0,0.1\n").unwrap();
        fs::write(&txtp, "0.01 12.5 0.3\n").unwrap();
        assert_eq!(load_iq(&csvp).unwrap().len(), 2);
        assert_eq!(load_iq(&txtp).unwrap(), vec![Sample::new(0.01, 12.5, 0.3)]);
        assert!(load_iq(dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn grid_json_nulls_become_zero() {
        let g = parse_grid_json(r#"{"qx":[0,1],"qy":[0,1],"values":[[1,null],[4,2]]}"#).unwrap();
        assert_eq!(g.values, vec![vec![1.0, 0.0], vec![4.0, 2.0]]);
        assert_eq!(g.max_intensity, 4.0);
        let g = parse_grid_json(r#"{"qx":[0],"qy":[0],"values":[[1]],"max_intensity":9.5}"#).unwrap();
        assert_eq!(g.max_intensity, 9.5);
        assert!(parse_grid_json("{}").is_err());
    }
}
