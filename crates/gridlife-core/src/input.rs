//! Input commands for the grid owner.
//!
//! Drivers translate key presses and pointer clicks into [`Command`]s and hand
//! them to [`SimulationEngine::apply`]. Every command takes effect
//! immediately, between steps. File names for save/load are resolved by the
//! driver; the engine never prompts.
//!
//! | Key     | Command |
//! |---------|---------|
//! | `space` | pause / resume |
//! | `g`     | toggle gridlines |
//! | `c`     | clear |
//! | `r`     | fill random |
//! | `s`     | save (driver supplies the path) |
//! | `l`     | load (driver supplies the path) |
//! | `q`     | quit |

use std::path::PathBuf;

use crate::engine::SimulationEngine;
use crate::persistence::SaveError;

/// A discrete edit or control request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleCell { x: usize, y: usize },
    Clear,
    FillRandom,
    Pause,
    Resume,
    TogglePause,
    SetShowGridlines(bool),
    ToggleGridlines,
    Save(PathBuf),
    Load(PathBuf),
    Quit,
}

/// Keys that need a file name before they become a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePrompt {
    Save,
    Load,
}

/// What a key press maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Prompt(FilePrompt),
}

impl FilePrompt {
    /// Turn the prompt into a command once the driver has a path
    pub fn with_path(self, path: PathBuf) -> Command {
        match self {
            FilePrompt::Save => Command::Save(path),
            FilePrompt::Load => Command::Load(path),
        }
    }
}

/// Map a key to its action. Unbound keys yield `None`.
pub fn key_action(key: char) -> Option<KeyAction> {
    let command = match key.to_ascii_lowercase() {
        ' ' => Command::TogglePause,
        'g' => Command::ToggleGridlines,
        'c' => Command::Clear,
        'r' => Command::FillRandom,
        'q' => Command::Quit,
        's' => return Some(KeyAction::Prompt(FilePrompt::Save)),
        'l' => return Some(KeyAction::Prompt(FilePrompt::Load)),
        _ => return None,
    };
    Some(KeyAction::Command(command))
}

/// Whether the driver loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl SimulationEngine {
    /// Apply a command. Only save/load can fail; a failed load leaves the
    /// grid untouched.
    pub fn apply(&mut self, command: Command) -> Result<Flow, SaveError> {
        match command {
            Command::ToggleCell { x, y } => {
                self.toggle_cell(x, y);
            }
            Command::Clear => self.clear(),
            Command::FillRandom => self.fill_random(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::SetShowGridlines(show) => self.set_show_gridlines(show),
            Command::ToggleGridlines => {
                let show = !self.show_gridlines();
                self.set_show_gridlines(show);
            }
            Command::Save(path) => self.save_to_path(path)?,
            Command::Load(path) => self.load_from_path(path)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryMode;
    use crate::grid::Grid;
    use crate::kernel::Kernel;
    use crate::rules::{Rule, ThresholdRule};

    fn engine() -> SimulationEngine {
        SimulationEngine::new(
            Grid::new(6, 6),
            Kernel::moore(),
            BoundaryMode::Clamp,
            Rule::from(ThresholdRule::life()),
        )
        .with_seed(3)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_action(' '), Some(KeyAction::Command(Command::TogglePause)));
        assert_eq!(key_action('G'), Some(KeyAction::Command(Command::ToggleGridlines)));
        assert_eq!(key_action('s'), Some(KeyAction::Prompt(FilePrompt::Save)));
        assert_eq!(key_action('x'), None);
        assert_eq!(
            FilePrompt::Load.with_path(PathBuf::from("bugs/a.bin")),
            Command::Load(PathBuf::from("bugs/a.bin"))
        );
    }

    #[test]
    fn test_apply_edits() {
        let mut engine = engine();
        engine.apply(Command::ToggleCell { x: 2, y: 3 }).unwrap();
        assert!(engine.grid().is_alive(2, 3));

        // Off-grid clicks are ignored
        engine.apply(Command::ToggleCell { x: 60, y: 3 }).unwrap();
        assert_eq!(engine.population(), 1);

        engine.apply(Command::FillRandom).unwrap();
        engine.apply(Command::Clear).unwrap();
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.grid().dimensions(), (6, 6));
    }

    #[test]
    fn test_apply_controls() {
        let mut engine = engine();
        engine.apply(Command::Resume).unwrap();
        assert!(!engine.is_paused());
        engine.apply(Command::TogglePause).unwrap();
        assert!(engine.is_paused());

        engine.apply(Command::ToggleGridlines).unwrap();
        assert!(!engine.show_gridlines());
        engine.apply(Command::SetShowGridlines(true)).unwrap();
        assert!(engine.show_gridlines());

        assert_eq!(engine.apply(Command::Quit).unwrap(), Flow::Quit);
        assert_eq!(engine.apply(Command::Pause).unwrap(), Flow::Continue);
    }

    #[test]
    fn test_load_missing_keeps_grid() {
        let mut engine = engine();
        engine.toggle_cell(1, 1);
        let before = engine.snapshot();
        let path = std::env::temp_dir().join("gridlife-no-such-snapshot.bin");
        let result = engine.apply(Command::Load(path));
        assert!(matches!(result, Err(SaveError::NotFound(_))));
        assert_eq!(engine.grid(), &before);
    }
}
