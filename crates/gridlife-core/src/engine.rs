//! Simulation engine - owns the grid and advances it one step at a time

use std::io::{Read, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::boundary::BoundaryMode;
use crate::config::{ConfigError, InitialFill, SimConfig};
use crate::grid::{Grid, ALIVE, DEAD};
use crate::kernel::Kernel;
use crate::neighbors::NeighborCounter;
use crate::persistence::{self, SaveError};
use crate::rules::Rule;

/// Birth and death tallies for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Cells that went dead -> alive
    pub births: usize,
    /// Cells that went alive -> dead
    pub deaths: usize,
}

impl StepOutcome {
    /// Whether any cell changed state
    pub fn changed(&self) -> bool {
        self.births > 0 || self.deaths > 0
    }

    /// Population change caused by the step
    pub fn net(&self) -> isize {
        self.births as isize - self.deaths as isize
    }
}

impl std::ops::Add for StepOutcome {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            births: self.births + other.births,
            deaths: self.deaths + other.deaths,
        }
    }
}

/// Main simulation engine
///
/// Holds the current grid plus a scratch buffer of the same shape. A step
/// reads only from the current grid, writes every updated cell into scratch
/// and then swaps the two, so callers only ever see a fully old or fully new
/// grid.
pub struct SimulationEngine {
    grid: Grid,
    scratch: Grid,
    counter: NeighborCounter,
    rule: Rule,
    rng: StdRng,
    generation: u64,
    last_outcome: StepOutcome,

    // Driver state
    paused: bool,
    show_gridlines: bool,
}

impl SimulationEngine {
    /// Create an engine around an initial grid. The engine starts paused
    /// with gridlines shown.
    pub fn new(grid: Grid, kernel: Kernel, boundary: BoundaryMode, rule: Rule) -> Self {
        let (width, height) = grid.dimensions();
        Self {
            scratch: grid.clone(),
            grid,
            counter: NeighborCounter::new(kernel, boundary, width, height),
            rule,
            rng: StdRng::from_entropy(),
            generation: 0,
            last_outcome: StepOutcome::default(),
            paused: true,
            show_gridlines: true,
        }
    }

    /// Build an engine from a validated configuration
    pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let kernel = config.kernel.build()?;
        let rule = config.rule.build(kernel.len())?;

        let mut engine = Self::new(
            Grid::new(config.width, config.height),
            kernel,
            config.boundary,
            rule,
        );
        if let Some(seed) = config.seed {
            engine.reseed(seed);
        }
        if config.initial_fill == InitialFill::Random {
            engine.fill_random();
        }

        log::info!(
            "Engine ready: {}x{} grid, {} neighbors, {:?} boundary",
            config.width,
            config.height,
            engine.kernel().len(),
            config.boundary
        );
        Ok(engine)
    }

    /// Seed the generator used by `fill_random` and probability rules
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Advance the grid by one synchronous step
    pub fn step(&mut self) -> StepOutcome {
        let (width, height) = self.grid.dimensions();
        let domain = self.counter.domain();

        // Cells outside the domain are never written, so scratch starts as
        // a copy of the current grid to carry them over.
        if !domain.covers(width, height) {
            self.scratch.copy_from(&self.grid);
        }

        let mut outcome = StepOutcome::default();
        let current = &self.grid;
        let next = self.scratch.cells_mut();

        for y in domain.ys.clone() {
            for x in domain.xs.clone() {
                let idx = y * width + x;
                let state = current.cells()[idx];
                let count = self.counter.count(current, x, y);
                let new_state = self.rule.evaluate(state, count, &mut self.rng);

                match (state, new_state) {
                    (DEAD, ALIVE) => outcome.births += 1,
                    (ALIVE, DEAD) => outcome.deaths += 1,
                    _ => {}
                }
                next[idx] = new_state;
            }
        }

        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;
        self.last_outcome = outcome;

        log::debug!(
            "Generation {}: {} births, {} deaths",
            self.generation,
            outcome.births,
            outcome.deaths
        );
        outcome
    }

    /// Step once if running; paused engines do nothing.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.paused {
            None
        } else {
            Some(self.step())
        }
    }

    /// Run `steps` steps regardless of pause state, returning the summed tallies
    pub fn run(&mut self, steps: usize) -> StepOutcome {
        (0..steps).fold(StepOutcome::default(), |total, _| total + self.step())
    }

    // ── Grid edits ──────────────────────────────────────────────────────

    /// Flip a cell. Coordinates outside the grid are ignored.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> bool {
        self.grid.toggle(x, y)
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Fill the grid with live cells at 50% density from the engine's generator
    pub fn fill_random(&mut self) {
        self.grid.fill_random(&mut self.rng);
    }

    // ── Driver state ────────────────────────────────────────────────────

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_show_gridlines(&mut self, show: bool) {
        self.show_gridlines = show;
    }

    pub fn show_gridlines(&self) -> bool {
        self.show_gridlines
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Read-only view of the current grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Owned copy of the current grid
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn kernel(&self) -> &Kernel {
        self.counter.kernel()
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.counter.boundary()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Swap the transition rule; takes effect on the next step
    pub fn set_rule(&mut self, rule: Rule) {
        self.rule = rule;
    }

    /// Steps taken since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tallies of the most recent step
    pub fn last_outcome(&self) -> StepOutcome {
        self.last_outcome
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Replace the grid with a snapshot of the same dimensions.
    ///
    /// Mismatched snapshots are rejected and the current grid is left as is.
    pub fn replace_grid(&mut self, grid: Grid) -> Result<(), SaveError> {
        if grid.dimensions() != self.grid.dimensions() {
            log::warn!(
                "Rejected snapshot of {:?}, engine grid is {:?}",
                grid.dimensions(),
                self.grid.dimensions()
            );
            return Err(SaveError::DimensionMismatch {
                expected: self.grid.dimensions(),
                found: grid.dimensions(),
            });
        }
        self.grid = grid;
        Ok(())
    }

    /// Save the current grid to a writer
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_grid(writer, &self.grid)
    }

    /// Load a grid from a reader
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let grid = persistence::load_grid(reader)?;
        self.replace_grid(grid)
    }

    /// Save the current grid to a file, creating parent directories
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        persistence::save_to_path(path, &self.grid)
    }

    /// Load a grid from a file. Missing files report `SaveError::NotFound`
    /// and leave the grid unchanged.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let grid = persistence::load_from_path(path)?;
        self.replace_grid(grid)
    }
}
