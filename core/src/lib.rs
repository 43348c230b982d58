use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use placer::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod placer;
mod session;
mod types;

/// Half-width of the mine-free square around the opening move.
pub const DEFAULT_SAFE_RADIUS: Coord = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    pub safe_radius: Coord,
}

impl GameConfig {
    pub const fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            cols,
            mines,
            safe_radius: DEFAULT_SAFE_RADIUS,
        }
    }

    pub const fn with_safe_radius(self, safe_radius: Coord) -> Self {
        Self {
            safe_radius,
            ..self
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// Largest number of cells the safe zone can cover, reached when it is not clipped.
    pub fn max_safe_zone(&self) -> CellCount {
        let side = (2 * u16::from(self.safe_radius)).saturating_sub(1);
        side.min(self.rows.into()) * side.min(self.cols.into())
    }

    /// Checks that a board can be built and that mines fit around any opening move.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 || self.mines == 0 {
            return Err(GameError::InvalidConfiguration);
        }
        if self.mines >= self.total_cells().saturating_sub(self.max_safe_zone()) {
            log::warn!(
                "{} mines do not fit a {}x{} board with safe radius {}",
                self.mines,
                self.rows,
                self.cols,
                self.safe_radius
            );
            return Err(GameError::InvalidConfiguration);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(20, 20, 50)
    }
}
