//! gridlife core - generalized cellular automaton engine
//!
//! Evolves a fixed-size grid of cell states with a configurable neighborhood
//! kernel and transition rule. Classic Life, Larger-than-Life, the
//! sound-reactive variant and the probabilistic "quantum" variant all run on
//! the same loop: count neighbors over the kernel, evaluate the rule, write
//! into a scratch buffer, swap.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`kernel`] | Neighbor offsets derived from a 0/1 stencil mask |
//! | [`boundary`] | Wrap vs. clamp edge handling and the updated domain |
//! | [`neighbors`] | Neighbor counting over a kernel |
//! | [`rules`] | Threshold (B/S) and probability rules behind one `Rule` enum |
//! | [`grid`] | The cell board itself |
//! | [`engine`] | Double-buffered stepping, birth/death tallies, run state |
//! | [`persistence`] | Binary grid snapshots |
//! | [`config`] | JSON configuration and variant presets |
//! | [`input`] | Commands from the input handler |
//! | [`render`] | Renderer interface and window geometry |
//! | [`audio`] | Birth/death driven tone frequency |
//! | [`patterns`] | Named seed patterns |
//!
//! # Example
//!
//! ```rust
//! use gridlife_core::prelude::*;
//!
//! let mut engine = SimulationEngine::from_config(&SimConfig::conway()).unwrap();
//! let mut grid = engine.snapshot();
//! GLIDER.stamp(&mut grid, 10, 10);
//! engine.replace_grid(grid).unwrap();
//! engine.apply(Command::Resume).unwrap();
//!
//! // One call per frame
//! if let Some(outcome) = engine.tick() {
//!     println!("{} births, {} deaths", outcome.births, outcome.deaths);
//! }
//! ```

pub mod audio;
pub mod boundary;
pub mod config;
pub mod engine;
pub mod grid;
pub mod input;
pub mod kernel;
pub mod neighbors;
pub mod patterns;
pub mod persistence;
pub mod render;
pub mod rules;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::boundary::BoundaryMode;
    pub use crate::config::SimConfig;
    pub use crate::engine::{SimulationEngine, StepOutcome};
    pub use crate::grid::{Cell, Grid, ALIVE, DEAD};
    pub use crate::input::{Command, Flow};
    pub use crate::kernel::{build_kernel, Kernel};
    pub use crate::patterns::{Pattern, GLIDER};
    pub use crate::rules::{ProbabilityParams, ProbabilityRule, Rule, ThresholdRule};
}
