use serde::{Deserialize, Serialize};

/// Full state of one board position. Only [`Board`](crate::Board) mutates it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_mine: bool,
    revealed: bool,
    flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Number of mined neighbors, meaningful once mines are placed.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) fn set_mine(&mut self) {
        self.has_mine = true;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        debug_assert!(count <= 8);
        self.adjacent_mines = count;
    }

    /// Marks the cell revealed, returns `false` when it was flagged or already open.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.revealed || self.flagged {
            return false;
        }
        self.revealed = true;
        true
    }

    /// Flips the flag of a closed cell, returns the new flag state or `None` when open.
    pub(crate) fn toggle_flag(&mut self) -> Option<bool> {
        if self.revealed {
            return None;
        }
        self.flagged = !self.flagged;
        Some(self.flagged)
    }

    /// Opens a mine for display, dropping any flag on it.
    pub(crate) fn expose_mine(&mut self) {
        self.flagged = false;
        self.revealed = true;
    }

    pub(crate) fn clear_flag(&mut self) {
        self.flagged = false;
    }
}

/// Player-visible state of a cell.
///
/// `Mine` and `Exploded` only appear once the session is lost.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Open(u8),
    Mine,
    Exploded,
}

impl CellView {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Open(_) | Self::Mine | Self::Exploded)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}
