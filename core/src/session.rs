use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - NotStarted -> Won (first reveal clears the board)
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No reveal yet, mines may not be placed
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a single player command did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    NoChange,
    Revealed(Vec<Coord2>),
    /// New flag state of the toggled cell
    Flagged(bool),
    Won(Vec<Coord2>),
    /// `exposed` lists the cells changed by the loss cleanup (hidden mines opened, wrong
    /// flags removed).
    Lost {
        mine: Coord2,
        revealed: Vec<Coord2>,
        exposed: Vec<Coord2>,
    },
    /// The session already ended; nothing was touched.
    GameOver,
}

impl TurnOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange | Self::GameOver)
    }
}

/// Represents a game from first click to win or loss
#[derive(Clone, Debug)]
pub struct GameSession<P = RandomPlacer> {
    board: Board,
    mine_target: CellCount,
    state: SessionState,
    safe_radius: Coord,
    placer: P,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// Session with the default safe radius and an entropy-seeded placer.
    pub fn new(board: Board) -> Self {
        Self::with_placer(board, DEFAULT_SAFE_RADIUS, RandomPlacer::default())
    }

    /// Validated session for `config`; a `seed` makes mine placement reproducible.
    pub fn from_config(config: &GameConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.rows, config.cols, config.mines)?;
        let placer = seed.map_or_else(RandomPlacer::from_entropy, RandomPlacer::new);
        Ok(Self::with_placer(board, config.safe_radius, placer))
    }
}

impl<P: MinePlacer> GameSession<P> {
    pub fn with_placer(board: Board, safe_radius: Coord, placer: P) -> Self {
        Self {
            mine_target: board.mine_count(),
            board,
            state: SessionState::NotStarted,
            safe_radius,
            placer,
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn safe_radius(&self) -> Coord {
        self.safe_radius
    }

    pub fn mines_left(&self) -> isize {
        self.board.mines_left()
    }

    /// The mine that ended the game, if it was lost
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Player-visible state of a cell, `None` off the board.
    pub fn view_at(&self, coords: Coord2) -> Option<CellView> {
        self.board
            .cell_at(coords)
            .map(|cell| self.view_of(coords, cell))
    }

    /// Player-visible state of every cell in row-major order.
    pub fn views(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        self.board
            .cells()
            .map(|(coords, cell)| (coords, self.view_of(coords, cell)))
    }

    fn view_of(&self, coords: Coord2, cell: Cell) -> CellView {
        // revealed mines only exist once the game is lost
        if cell.is_revealed() {
            if !cell.has_mine() {
                CellView::Open(cell.adjacent_mines())
            } else if self.triggered_mine == Some(coords) {
                CellView::Exploded
            } else {
                CellView::Mine
            }
        } else if cell.is_flagged() {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }

    /// Reveals a cell, placing the mines around it first when this is the opening move.
    ///
    /// Fails only when mines cannot be placed; the session then stays `NotStarted`.
    pub fn handle_reveal(&mut self, coords: Coord2) -> Result<TurnOutcome> {
        if self.state.is_finished() {
            return Ok(TurnOutcome::GameOver);
        }

        if self.state.is_initial() {
            if !self.board.contains(coords) {
                log::trace!("Ignoring opening move at {:?} outside the board", coords);
                return Ok(TurnOutcome::NoChange);
            }
            if !self.board.mines_placed() {
                self.board.place_mines(
                    coords,
                    self.mine_target,
                    self.safe_radius,
                    &mut self.placer,
                )?;
            }
            self.state = SessionState::InProgress;
            log::debug!("Game started at {:?}", coords);
        }

        let outcome = self.board.reveal(coords);
        Ok(self.settle(outcome))
    }

    pub fn handle_flag_toggle(&mut self, coords: Coord2) -> TurnOutcome {
        if self.state.is_finished() {
            return TurnOutcome::GameOver;
        }

        match self.board.toggle_flag(coords) {
            FlagOutcome::Flagged => TurnOutcome::Flagged(true),
            FlagOutcome::Unflagged => TurnOutcome::Flagged(false),
            FlagOutcome::NoChange => TurnOutcome::NoChange,
        }
    }

    pub fn handle_chord(&mut self, coords: Coord2) -> TurnOutcome {
        if self.state.is_finished() {
            return TurnOutcome::GameOver;
        }

        let outcome = self.board.chord(coords);
        self.settle(outcome)
    }

    /// Throws the board away and waits for a new opening move with the same dimensions and
    /// mine count.
    ///
    /// The mine count must be one [`Board::new`] accepts. A session over a fixed layout with
    /// no mines, or with every cell mined, cannot restart and is left untouched.
    pub fn restart(&mut self) -> Result<()> {
        let (rows, cols) = self.board.size();
        self.board = Board::new(rows, cols, self.mine_target)?;
        self.state = SessionState::NotStarted;
        self.triggered_mine = None;
        log::debug!("Restarted {}x{} game", rows, cols);
        Ok(())
    }

    /// Applies the loss and win rules after a reveal or chord
    fn settle(&mut self, outcome: RevealOutcome) -> TurnOutcome {
        match outcome {
            RevealOutcome::NoChange => TurnOutcome::NoChange,
            RevealOutcome::HitMine { mine, revealed } => {
                self.state = SessionState::Lost;
                self.triggered_mine = Some(mine);
                log::debug!("Game lost at {:?}", mine);
                let exposed = self.board.reveal_all_mines();
                TurnOutcome::Lost {
                    mine,
                    revealed,
                    exposed,
                }
            }
            RevealOutcome::Revealed(revealed) if self.board.is_won() => {
                self.state = SessionState::Won;
                log::debug!("Game won");
                TurnOutcome::Won(revealed)
            }
            RevealOutcome::Revealed(revealed) => TurnOutcome::Revealed(revealed),
        }
    }
}
