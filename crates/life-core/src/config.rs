//! Configuration types for the simulation.

use crate::types::Cell;
use serde::{Deserialize, Serialize};

/// Grid configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows in the grid
    pub rows: i32,
    /// Number of columns in the grid
    pub cols: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
        }
    }
}

/// Run-loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum number of transitions before the run stops
    pub max_iterations: u64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Explicit initial live cells; takes precedence over random sampling
    pub initial_cells: Option<Vec<Cell>>,
    /// Number of cells to sample when no explicit cells are given
    pub sample_count: usize,
    /// Consecutive equal-potential steps before stopping early
    pub shutdown_wait: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            seed: 0,
            initial_cells: None,
            sample_count: 1000,
            shutdown_wait: 20,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Playback rate of the animation (frames per second)
    pub fps: u32,
    /// Side length of one cell in pixels
    pub cell_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            cell_size: 6,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Whether to persist run artifacts to disk
    pub save: bool,
    /// Root directory for per-run output folders
    pub out_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save: true,
            out_dir: "output".to_string(),
        }
    }
}

/// Full job configuration for one simulation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobConfig {
    /// Grid configuration
    pub grid: GridConfig,
    /// Run-loop configuration
    pub run: RunConfig,
    /// Rendering configuration
    pub render: RenderConfig,
    /// Output configuration
    pub output: OutputConfig,
}
