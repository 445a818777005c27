//! Simulation configuration and presets.
//!
//! A [`SimConfig`] names everything needed to build an engine: grid size,
//! kernel, boundary policy, rule and seed. Configs round-trip through JSON so
//! drivers can keep them next to saved snapshots.
//!
//! ```
//! use gridlife_core::config::SimConfig;
//! use gridlife_core::engine::SimulationEngine;
//!
//! let config = SimConfig::larger_than_life();
//! assert!(config.validate().is_ok());
//! let engine = SimulationEngine::from_config(&config).unwrap();
//! assert_eq!(engine.kernel().len(), 120);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryMode;
use crate::grid::cell_count;
use crate::kernel::{build_kernel, Kernel, KernelError};
use crate::rules::{CountSet, ProbabilityParams, ProbabilityRule, Rule, RuleError, ThresholdRule};

/// Frames per second of the interactive driver
pub const DEFAULT_FPS: u32 = 10;

/// Neighborhood shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum KernelSpec {
    /// 8 surrounding cells
    Moore,
    /// `(2r+1)^2 - 1` cells
    Ring { radius: usize },
    /// Explicit 0/1 stencil
    Mask { rows: Vec<Vec<u8>> },
}

impl KernelSpec {
    pub fn build(&self) -> Result<Kernel, KernelError> {
        match self {
            KernelSpec::Moore => Ok(Kernel::moore()),
            KernelSpec::Ring { radius } => Ok(Kernel::ring(*radius)),
            KernelSpec::Mask { rows } => build_kernel(rows),
        }
    }
}

/// Transition rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RuleConfig {
    Threshold { birth: CountSet, survival: CountSet },
    /// `B3/S23` style notation
    Notation { notation: String },
    Probability(ProbabilityParams),
}

impl RuleConfig {
    /// Build the rule for a kernel with `max_count` neighbors
    pub fn build(&self, max_count: usize) -> Result<Rule, RuleError> {
        match self {
            RuleConfig::Threshold { birth, survival } => Ok(Rule::Threshold(ThresholdRule::new(
                birth.clone(),
                survival.clone(),
            ))),
            RuleConfig::Notation { notation } => Ok(Rule::Threshold(ThresholdRule::parse(notation)?)),
            RuleConfig::Probability(params) => {
                Ok(Rule::Probability(ProbabilityRule::new(*params, max_count)?))
            }
        }
    }
}

impl From<ThresholdRule> for RuleConfig {
    fn from(rule: ThresholdRule) -> Self {
        RuleConfig::Threshold {
            birth: rule.birth,
            survival: rule.survival,
        }
    }
}

/// How the grid is populated at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialFill {
    #[default]
    Empty,
    Random,
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub kernel: KernelSpec,
    #[serde(default)]
    pub boundary: BoundaryMode,
    pub rule: RuleConfig,
    /// Random seed (None = from entropy)
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default)]
    pub initial_fill: InitialFill,
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

impl SimConfig {
    /// Classic Life, B3/S23 on a 100x100 board with a frozen 1-cell border
    pub fn conway() -> Self {
        Self {
            width: 100,
            height: 100,
            kernel: KernelSpec::Moore,
            boundary: BoundaryMode::Clamp,
            rule: ThresholdRule::life().into(),
            seed: None,
            fps: DEFAULT_FPS,
            initial_fill: InitialFill::Empty,
        }
    }

    /// Small 30x30 Life board
    pub fn basic() -> Self {
        Self {
            width: 30,
            height: 30,
            ..Self::conway()
        }
    }

    /// Bosco's rule on the 11x11 ring
    pub fn larger_than_life() -> Self {
        Self {
            kernel: KernelSpec::Ring { radius: 5 },
            rule: ThresholdRule::bosco().into(),
            ..Self::conway()
        }
    }

    /// Probabilistic Life with the default 0.34 spread
    pub fn quantum() -> Self {
        Self {
            rule: RuleConfig::Probability(ProbabilityParams::default()),
            ..Self::conway()
        }
    }

    /// 50x50 Life board whose birth/death counts drive the tone
    pub fn music() -> Self {
        Self {
            width: 50,
            height: 50,
            ..Self::conway()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "conway" | "life" => Some(Self::conway()),
            "basic" => Some(Self::basic()),
            "larger_than_life" | "ltl" | "bosco" => Some(Self::larger_than_life()),
            "quantum" => Some(Self::quantum()),
            "music" => Some(Self::music()),
            _ => None,
        }
    }

    /// Check dimensions, kernel and rule without building an engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if cell_count(self.width, self.height).is_err() {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::InvalidFps);
        }

        // Rings are sized before building so a huge radius never allocates
        if let KernelSpec::Ring { radius } = self.kernel {
            self.check_kernel_fits(radius)?;
        }
        let kernel = self.kernel.build()?;
        self.check_kernel_fits(kernel.radius())?;

        self.rule.build(kernel.len())?;
        Ok(())
    }

    /// The kernel's square of side `2r + 1` must fit inside the grid
    fn check_kernel_fits(&self, radius: usize) -> Result<(), ConfigError> {
        let side = radius.checked_mul(2).and_then(|d| d.checked_add(1));
        match side {
            Some(side) if side <= self.width.min(self.height) => Ok(()),
            _ => Err(ConfigError::KernelTooLarge {
                radius,
                width: self.width,
                height: self.height,
            }),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::conway()
    }
}

/// Errors from loading or validating a configuration
#[derive(Debug)]
pub enum ConfigError {
    InvalidDimensions { width: usize, height: usize },
    /// `width * height` overflows
    GridTooLarge { width: usize, height: usize },
    /// Kernel square does not fit inside the grid
    KernelTooLarge { radius: usize, width: usize, height: usize },
    InvalidFps,
    Kernel(KernelError),
    Rule(RuleError),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl From<KernelError> for ConfigError {
    fn from(e: KernelError) -> Self {
        ConfigError::Kernel(e)
    }
}

impl From<RuleError> for ConfigError {
    fn from(e: RuleError) -> Self {
        ConfigError::Rule(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDimensions { width, height } => {
                write!(f, "Grid dimensions must be non-zero, got {}x{}", width, height)
            }
            ConfigError::GridTooLarge { width, height } => {
                write!(f, "Grid of {}x{} cells is too large", width, height)
            }
            ConfigError::KernelTooLarge {
                radius,
                width,
                height,
            } => write!(
                f,
                "Kernel of radius {} does not fit a {}x{} grid",
                radius, width, height
            ),
            ConfigError::InvalidFps => write!(f, "fps must be at least 1"),
            ConfigError::Kernel(e) => write!(f, "Kernel error: {}", e),
            ConfigError::Rule(e) => write!(f, "Rule error: {}", e),
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Kernel(e) => Some(e),
            ConfigError::Rule(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}
