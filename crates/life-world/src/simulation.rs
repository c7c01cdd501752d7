//! Simulation engine for running a bounded Game of Life grid.

use life_core::{Cell, Error, GridConfig, Result, RunConfig};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument};

/// Number of cells whose alive/dead state differs between two generations.
///
/// Symmetric difference size of the two live-cell sets; zero means the
/// generations are identical.
pub fn potential(a: &HashSet<Cell>, b: &HashSet<Cell>) -> f64 {
    a.symmetric_difference(b).count() as f64
}

pub struct GameOfLife {
    rows: i32,
    cols: i32,
    alive: HashSet<Cell>,
    history: Vec<HashSet<Cell>>,
    potentials: Vec<f64>,
    config: RunConfig,
    rng: ChaCha8Rng,
}

impl GameOfLife {
    pub fn new(grid: &GridConfig, config: RunConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Self {
            rows: grid.rows,
            cols: grid.cols,
            alive: HashSet::new(),
            history: Vec::new(),
            potentials: Vec::new(),
            config,
            rng,
        }
    }

    /// Run the simulation for up to the configured number of iterations
    #[instrument(skip(self), fields(max_iterations = self.config.max_iterations))]
    pub fn run(&mut self) -> Result<RunSummary> {
        self.set_initial()?;

        self.history.clear();
        self.potentials.clear();
        self.history.push(self.alive.clone());
        // Generation 0 has no predecessor to compare against.
        self.potentials.push(f64::INFINITY);

        info!(
            "Starting simulation: {}x{} grid, {} initial cells",
            self.rows,
            self.cols,
            self.alive.len()
        );

        let mut shutdown_count: u32 = 0;
        let mut early_stopped = false;
        let mut iterations: u64 = 0;

        for iteration in 0..self.config.max_iterations {
            self.step();
            self.history.push(self.alive.clone());

            let pot = potential(
                &self.history[self.history.len() - 1],
                &self.history[self.history.len() - 2],
            );
            let prev = self.potentials[self.potentials.len() - 1];
            self.potentials.push(pot);

            // A run of equal potentials signals a stable or periodic state.
            // The count resets whenever the potential changes, so only
            // consecutive equal-potential steps accumulate.
            if pot == prev {
                shutdown_count += 1;
            } else {
                shutdown_count = 0;
            }

            iterations = iteration + 1;

            if iteration % 100 == 0 {
                info!(
                    "Iteration {}/{}: {} cells alive, potential {}",
                    iteration,
                    self.config.max_iterations,
                    self.alive.len(),
                    pot
                );
            }

            if shutdown_count >= self.config.shutdown_wait {
                early_stopped = true;
                break;
            }
        }

        if early_stopped {
            info!("Early-stopped by the shutdown rule after {} iterations", iterations);
        } else {
            info!("Successfully finished all {} iterations", iterations);
        }

        Ok(RunSummary {
            iterations,
            early_stopped,
            final_population: self.alive.len(),
        })
    }

    /// Compute the next generation from a live-cell set via neighbor voting.
    ///
    /// Each live cell casts one vote on every neighbor in its clipped Moore
    /// neighborhood. A cell is alive next generation iff it received exactly
    /// 3 votes, or exactly 2 votes while already alive. Cells nobody voted
    /// for stay dead, so the cost is proportional to the live-cell count
    /// rather than the grid area.
    pub fn next_generation(&self, alive: &HashSet<Cell>) -> HashSet<Cell> {
        let mut votes: HashMap<Cell, u8> = HashMap::new();

        for cell in alive {
            for neighbor in cell.moore_neighbors(self.rows, self.cols) {
                *votes.entry(neighbor).or_insert(0) += 1;
            }
        }

        votes
            .into_iter()
            .filter(|&(cell, count)| count == 3 || (count == 2 && alive.contains(&cell)))
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Completed-run view of the recorded sequences.
    ///
    /// Fails until `run` has been called at least once.
    pub fn results(&self) -> Result<RunResults<'_>> {
        if self.history.is_empty() {
            return Err(Error::InvalidState(
                "call run() before reading results".to_string(),
            ));
        }

        Ok(RunResults {
            history: &self.history,
            potentials: &self.potentials,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    fn set_initial(&mut self) -> Result<()> {
        self.alive = match &self.config.initial_cells {
            Some(cells) => {
                for &cell in cells {
                    if !cell.in_bounds(self.rows, self.cols) {
                        return Err(Error::InvalidCoordinate {
                            cell,
                            rows: self.rows,
                            cols: self.cols,
                        });
                    }
                }
                cells.iter().copied().collect()
            }
            None => {
                // Row and column indices are sampled independently, with
                // replacement; duplicate coordinates collapse in the set.
                let mut sampled = HashSet::new();
                for _ in 0..self.config.sample_count {
                    let row = self.rng.gen_range(0..self.rows);
                    let col = self.rng.gen_range(0..self.cols);
                    sampled.insert(Cell::new(row, col));
                }
                sampled
            }
        };

        Ok(())
    }

    fn step(&mut self) {
        self.alive = self.next_generation(&self.alive);
    }
}

/// Borrowed view of a completed run's history and potential sequences
#[derive(Debug, Clone, Copy)]
pub struct RunResults<'a> {
    /// Live-cell set per generation, index 0 = initial state
    pub history: &'a [HashSet<Cell>],
    /// Dissimilarity per generation, same length as `history`
    pub potentials: &'a [f64],
}

/// Result of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of transitions actually performed
    pub iterations: u64,
    /// Whether the shutdown rule fired before the iteration cap
    pub early_stopped: bool,
    /// Live-cell count of the final generation
    pub final_population: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine(rows: i32, cols: i32) -> GameOfLife {
        GameOfLife::new(&GridConfig { rows, cols }, RunConfig::default())
    }

    fn cells(coords: &[(i32, i32)]) -> HashSet<Cell> {
        coords.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    #[test]
    fn test_empty_set_stays_empty() {
        let gol = engine(10, 10);
        assert!(gol.next_generation(&HashSet::new()).is_empty());
    }

    #[test]
    fn test_isolated_cell_dies() {
        let gol = engine(10, 10);
        let next = gol.next_generation(&cells(&[(5, 5)]));
        assert!(next.is_empty());
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let gol = engine(11, 11);
        let horizontal = cells(&[(5, 4), (5, 5), (5, 6)]);
        let vertical = cells(&[(4, 5), (5, 5), (6, 5)]);

        let after_one = gol.next_generation(&horizontal);
        assert_eq!(after_one, vertical);

        let after_two = gol.next_generation(&after_one);
        assert_eq!(after_two, horizontal);
    }

    #[test]
    fn test_block_is_stable() {
        let gol = engine(10, 10);
        let block = cells(&[(5, 5), (5, 6), (6, 5), (6, 6)]);
        assert_eq!(gol.next_generation(&block), block);
    }

    #[test]
    fn test_corner_block_is_stable_without_wraparound() {
        let gol = engine(10, 10);
        let block = cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(gol.next_generation(&block), block);
    }

    #[test]
    fn test_potential_of_identical_sets_is_zero() {
        let a = cells(&[(1, 1), (2, 2), (3, 3)]);
        assert_eq!(potential(&a, &a), 0.0);
    }

    #[test]
    fn test_potential_counts_changed_cells() {
        let a = cells(&[(1, 1), (2, 2)]);
        let b = cells(&[(2, 2), (3, 3), (4, 4)]);
        // (1,1) died, (3,3) and (4,4) were born.
        assert_eq!(potential(&a, &b), 3.0);
        assert_eq!(potential(&b, &a), 3.0);
    }

    #[test]
    fn test_run_records_one_potential_per_generation() {
        let mut gol = GameOfLife::new(
            &GridConfig { rows: 30, cols: 30 },
            RunConfig {
                max_iterations: 50,
                seed: 7,
                sample_count: 60,
                ..Default::default()
            },
        );

        let summary = gol.run().unwrap();
        let results = gol.results().unwrap();
        assert_eq!(results.history.len(), results.potentials.len());
        assert_eq!(results.history.len() as u64, summary.iterations + 1);
        assert!(results.potentials[0].is_infinite());
    }

    #[test]
    fn test_stable_pattern_triggers_early_shutdown() {
        let mut gol = GameOfLife::new(
            &GridConfig { rows: 20, cols: 20 },
            RunConfig {
                max_iterations: 100,
                initial_cells: Some(vec![
                    Cell::new(5, 5),
                    Cell::new(5, 6),
                    Cell::new(6, 5),
                    Cell::new(6, 6),
                ]),
                shutdown_wait: 5,
                ..Default::default()
            },
        );

        let summary = gol.run().unwrap();
        assert!(summary.early_stopped);
        assert!(summary.iterations <= 100);
        // The block never changes, so potential is 0 from the first step on
        // and the shutdown rule fires as soon as 5 consecutive equal
        // potentials have been seen.
        assert_eq!(summary.iterations, 6);
        assert_eq!(summary.final_population, 4);

        let results = gol.results().unwrap();
        assert_eq!(results.history.len() as u64, summary.iterations + 1);
    }

    #[test]
    fn test_shutdown_count_resets_when_potential_changes() {
        // A blinker alternates between two states with the same potential
        // (4 cells change every step), so it early-stops; a pattern whose
        // potential keeps changing must not.
        let mut blinker = GameOfLife::new(
            &GridConfig { rows: 11, cols: 11 },
            RunConfig {
                max_iterations: 100,
                initial_cells: Some(vec![Cell::new(5, 4), Cell::new(5, 5), Cell::new(5, 6)]),
                shutdown_wait: 10,
                ..Default::default()
            },
        );

        let summary = blinker.run().unwrap();
        assert!(summary.early_stopped);
        assert_eq!(summary.iterations, 11);
    }

    #[test]
    fn test_run_is_deterministic_for_equal_seeds() {
        let config = RunConfig {
            max_iterations: 30,
            seed: 42,
            sample_count: 80,
            ..Default::default()
        };
        let grid = GridConfig { rows: 25, cols: 25 };

        let mut first = GameOfLife::new(&grid, config.clone());
        let mut second = GameOfLife::new(&grid, config);
        first.run().unwrap();
        second.run().unwrap();

        assert_eq!(
            first.results().unwrap().history,
            second.results().unwrap().history
        );
    }

    #[test]
    fn test_sampled_initial_state_is_in_bounds() {
        let mut gol = GameOfLife::new(
            &GridConfig { rows: 15, cols: 9 },
            RunConfig {
                max_iterations: 1,
                seed: 3,
                sample_count: 200,
                ..Default::default()
            },
        );

        gol.run().unwrap();
        let initial = &gol.results().unwrap().history[0];
        // Duplicates collapse, so the set can be smaller than sample_count.
        assert!(initial.len() <= 200);
        assert!(initial.iter().all(|c| c.in_bounds(15, 9)));
    }

    #[test]
    fn test_explicit_out_of_bounds_cell_is_rejected() {
        let mut gol = GameOfLife::new(
            &GridConfig { rows: 10, cols: 10 },
            RunConfig {
                initial_cells: Some(vec![Cell::new(5, 5), Cell::new(10, 3)]),
                ..Default::default()
            },
        );

        match gol.run() {
            Err(Error::InvalidCoordinate { cell, rows, cols }) => {
                assert_eq!(cell, Cell::new(10, 3));
                assert_eq!((rows, cols), (10, 10));
            }
            other => panic!("expected InvalidCoordinate, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_results_before_run_is_an_error() {
        let gol = engine(10, 10);
        assert!(matches!(gol.results(), Err(Error::InvalidState(_))));
    }

    proptest! {
        #[test]
        fn prop_next_generation_stays_in_bounds(
            coords in proptest::collection::hash_set((0..20i32, 0..20i32), 0..120)
        ) {
            let gol = engine(20, 20);
            let alive: HashSet<Cell> = coords.into_iter().map(|(r, c)| Cell::new(r, c)).collect();

            for cell in gol.next_generation(&alive) {
                prop_assert!(cell.in_bounds(20, 20));
            }
        }

        #[test]
        fn prop_potential_is_symmetric(
            a in proptest::collection::hash_set((0..12i32, 0..12i32), 0..60),
            b in proptest::collection::hash_set((0..12i32, 0..12i32), 0..60)
        ) {
            let a: HashSet<Cell> = a.into_iter().map(|(r, c)| Cell::new(r, c)).collect();
            let b: HashSet<Cell> = b.into_iter().map(|(r, c)| Cell::new(r, c)).collect();

            prop_assert_eq!(potential(&a, &b), potential(&b, &a));
            prop_assert_eq!(potential(&a, &a), 0.0);
        }
    }
}
