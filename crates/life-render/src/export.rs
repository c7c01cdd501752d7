//! Per-run export of history, potential, and animation artifacts.

use chrono::Local;
use life_core::{Cell, RenderConfig, Result};
use life_world::{RunResults, RunSummary};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::animation::save_gif;
use crate::chart::save_potential_chart;

/// Create the timestamped folder holding one run's artifacts.
pub fn create_run_dir(out_root: &str) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let dir = Path::new(out_root).join(format!("run_{}", stamp));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Write the history as text, one generation per line.
///
/// Coordinates are sorted within each line so the output is deterministic
/// regardless of set iteration order.
pub fn write_history<P: AsRef<Path>>(history: &[HashSet<Cell>], path: P) -> Result<()> {
    let mut file = fs::File::create(path)?;

    for alive in history {
        let mut cells: Vec<&Cell> = alive.iter().collect();
        cells.sort();
        let line = cells
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(file, "{}", line)?;
    }

    Ok(())
}

/// Write the run summary as pretty-printed JSON.
pub fn write_summary<P: AsRef<Path>>(summary: &RunSummary, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}

/// Save every artifact of a completed run into a fresh run folder.
///
/// Produces `history.txt`, `summary.json`, `potential.png`, and
/// `animation.gif` under a timestamped directory below `out_root`.
pub fn save_run(
    results: RunResults<'_>,
    summary: &RunSummary,
    rows: i32,
    cols: i32,
    render: &RenderConfig,
    out_root: &str,
) -> Result<PathBuf> {
    let dir = create_run_dir(out_root)?;

    write_history(results.history, dir.join("history.txt"))?;
    write_summary(summary, dir.join("summary.json"))?;
    save_potential_chart(results.potentials, dir.join("potential.png"))?;
    save_gif(results.history, rows, cols, render, dir.join("animation.gif"))?;

    info!("Saved run artifacts to {}", dir.display());
    Ok(dir)
}
