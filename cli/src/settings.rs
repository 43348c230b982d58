use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use sweeper_core::GameConfig;

/// Size of one cell on screen, used to translate clicks.
pub const DEFAULT_CELL_SIZE: u32 = 40;

/// Everything the terminal front-end needs to start a game.
///
/// Loaded from a TOML file where every key is optional:
///
/// ```toml
/// rows = 16
/// cols = 30
/// mines = 99
/// safe_radius = 2
/// cell_size = 32
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub game: GameConfig,
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
}

fn default_cell_size() -> u32 {
    DEFAULT_CELL_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Values given on the command line, they win over the file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub rows: Option<u8>,
    pub cols: Option<u8>,
    pub mines: Option<u16>,
    pub safe_radius: Option<u8>,
    pub cell_size: Option<u32>,
}

impl Settings {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("could not parse settings")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        let game = &mut self.game;
        game.rows = overrides.rows.unwrap_or(game.rows);
        game.cols = overrides.cols.unwrap_or(game.cols);
        game.mines = overrides.mines.unwrap_or(game.mines);
        game.safe_radius = overrides.safe_radius.unwrap_or(game.safe_radius);
        self.cell_size = overrides.cell_size.unwrap_or(self.cell_size);
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cell_size == 0 {
            bail!("cell_size must be positive");
        }
        self.game.validate().with_context(|| {
            format!(
                "{} mines on a {}x{} board with safe radius {}",
                self.game.mines, self.game.rows, self.game.cols, self.game.safe_radius
            )
        })
    }
}
