use std::collections::VecDeque;
use std::ops::BitOr;

use ndarray::Array2;

use crate::*;

/// Outcome of revealing one or more cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Newly revealed coordinates, each listed once.
    Revealed(Vec<Coord2>),
    /// A mine was uncovered; `revealed` includes it along with anything else opened by the
    /// same operation.
    HitMine {
        mine: Coord2,
        revealed: Vec<Coord2>,
    },
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub fn revealed(&self) -> &[Coord2] {
        match self {
            Self::NoChange => &[],
            Self::Revealed(revealed) => revealed,
            Self::HitMine { revealed, .. } => revealed,
        }
    }

    pub fn hit_mine(&self) -> Option<Coord2> {
        match self {
            Self::HitMine { mine, .. } => Some(*mine),
            _ => None,
        }
    }

    fn into_revealed(self) -> Vec<Coord2> {
        match self {
            Self::NoChange => Vec::new(),
            Self::Revealed(revealed) => revealed,
            Self::HitMine { revealed, .. } => revealed,
        }
    }
}

/// Used to merge outcomes when chording
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (NoChange, other) | (other, NoChange) => other,
            // the first mine hit wins, but nothing revealed is lost
            (HitMine { mine, mut revealed }, other) => {
                revealed.extend(other.into_revealed());
                HitMine { mine, revealed }
            }
            (other, HitMine { mine, revealed: rhs_revealed }) => {
                let mut revealed = other.into_revealed();
                revealed.extend(rhs_revealed);
                HitMine { mine, revealed }
            }
            (Revealed(mut lhs), Revealed(rhs)) => {
                lhs.extend(rhs);
                Revealed(lhs)
            }
        }
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// The minefield together with everything the player did to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    flag_count: CellCount,
    mines_placed: bool,
}

impl Board {
    /// Empty board that expects `mine_count` mines to be placed by [`Board::place_mines`].
    pub fn new(rows: Coord, cols: Coord, mine_count: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            log::warn!("Rejecting empty board {}x{}", rows, cols);
            return Err(GameError::InvalidConfiguration);
        }
        if mine_count == 0 || mine_count >= mult(rows, cols) {
            log::warn!(
                "Rejecting {} mines on a {}x{} board",
                mine_count,
                rows,
                cols
            );
            return Err(GameError::InvalidConfiguration);
        }

        Ok(Self {
            cells: Array2::default((rows, cols).to_nd_index()),
            mine_count,
            flag_count: 0,
            mines_placed: false,
        })
    }

    /// Board with mines at exactly `mine_coords`, ready to play.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidConfiguration);
        }

        let mut cells: Array2<Cell> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                log::warn!("Mine at {:?} is outside a {:?} board", coords, size);
                return Err(GameError::InvalidConfiguration);
            }
            cells[coords.to_nd_index()].set_mine();
        }

        let mine_count = cells
            .iter()
            .filter(|cell| cell.has_mine())
            .count()
            .try_into()
            .map_err(|_| GameError::InvalidConfiguration)?;

        let mut board = Self {
            cells,
            mine_count,
            flag_count: 0,
            mines_placed: true,
        };
        board.compute_adjacency();
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count as isize)
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.size();
        coords.0 < rows && coords.1 < cols
    }

    /// Full cell state, including the mine, or `None` off the board.
    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    /// Places `mine_count` mines outside the square of half-width `radius` around `safe`,
    /// then computes every adjacent count.
    pub fn place_mines<P>(
        &mut self,
        safe: Coord2,
        mine_count: CellCount,
        radius: Coord,
        placer: &mut P,
    ) -> Result<()>
    where
        P: MinePlacer + ?Sized,
    {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let eligible: Vec<Coord2> = self
            .cells()
            .map(|(coords, _)| coords)
            .filter(|&coords| !within_radius(safe, coords, radius))
            .collect();

        if mine_count == 0 || usize::from(mine_count) >= eligible.len() {
            log::warn!(
                "Cannot place {} mines in {} cells outside the safe zone around {:?}",
                mine_count,
                eligible.len(),
                safe
            );
            return Err(GameError::InvalidConfiguration);
        }

        // picks are checked before any cell changes so a bad placer leaves the board unplaced
        let mut taken = vec![false; eligible.len()];
        let mut mine_coords = Vec::with_capacity(mine_count.into());
        for index in placer.pick(eligible.len(), mine_count.into()) {
            match taken.get_mut(index) {
                Some(taken) if !*taken => {
                    *taken = true;
                    mine_coords.push(eligible[index]);
                }
                _ => {
                    log::warn!(
                        "Placer picked index {} out of {} more than once or out of range",
                        index,
                        eligible.len()
                    );
                    return Err(GameError::PlacementMismatch);
                }
            }
        }

        if mine_coords.len() != usize::from(mine_count) {
            log::warn!(
                "Placed mine count mismatch, actual: {}, requested: {}",
                mine_coords.len(),
                mine_count
            );
            return Err(GameError::PlacementMismatch);
        }

        for coords in mine_coords {
            self.cells[coords.to_nd_index()].set_mine();
        }
        self.mine_count = mine_count;
        self.mines_placed = true;
        self.compute_adjacency();
        log::debug!(
            "Placed {} mines, safe zone around {:?} with radius {}",
            mine_count,
            safe,
            radius
        );
        Ok(())
    }

    fn compute_adjacency(&mut self) {
        let size = self.size();
        for row in 0..size.0 {
            for col in 0..size.1 {
                let coords = (row, col);
                let count = NeighborIter::new(coords, size)
                    .filter(|&pos| self.cells[pos.to_nd_index()].has_mine())
                    .count() as u8;
                self.cells[coords.to_nd_index()].set_adjacent_mines(count);
            }
        }
    }

    /// Reveals a closed, unflagged cell and flood-fills from it when it has no mined
    /// neighbors.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.mines_placed {
            log::trace!("Ignoring reveal at {:?} before mines are placed", coords);
            return RevealOutcome::NoChange;
        }
        let Some(cell) = self.cells.get_mut(coords.to_nd_index()) else {
            log::trace!("Ignoring reveal at {:?} outside the board", coords);
            return RevealOutcome::NoChange;
        };
        if !cell.reveal() {
            return RevealOutcome::NoChange;
        }

        if cell.has_mine() {
            log::debug!("Revealed mine at {:?}", coords);
            return RevealOutcome::HitMine {
                mine: coords,
                revealed: vec![coords],
            };
        }

        let count = cell.adjacent_mines();
        log::debug!("Reveal cell at {:?}, mine count: {}", coords, count);
        let mut revealed = vec![coords];
        if count == 0 {
            self.flood_fill(coords, &mut revealed);
        }
        RevealOutcome::Revealed(revealed)
    }

    /// Opens the connected zero region around `start`, which must already be revealed.
    fn flood_fill(&mut self, start: Coord2, revealed: &mut Vec<Coord2>) {
        let size = self.size();
        let mut visited = Array2::from_elem(self.cells.dim(), false);
        visited[start.to_nd_index()] = true;
        let mut to_visit = VecDeque::from([start]);
        log::trace!("Starting flood-fill from {:?}", start);

        while let Some(current) = to_visit.pop_front() {
            for pos in NeighborIter::new(current, size) {
                if std::mem::replace(&mut visited[pos.to_nd_index()], true) {
                    continue;
                }

                // flagged or already opened cells stop the fill
                let cell = &mut self.cells[pos.to_nd_index()];
                if !cell.reveal() {
                    log::trace!("Skipping cell at {:?}", pos);
                    continue;
                }

                revealed.push(pos);
                if cell.adjacent_mines() == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
        log::trace!("Flood-fill from {:?} opened {} cells", start, revealed.len());
    }

    /// Flips the flag of a closed cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        let Some(cell) = self.cells.get_mut(coords.to_nd_index()) else {
            log::trace!("Ignoring flag at {:?} outside the board", coords);
            return FlagOutcome::NoChange;
        };

        match cell.toggle_flag() {
            Some(true) => {
                self.flag_count += 1;
                FlagOutcome::Flagged
            }
            Some(false) => {
                self.flag_count -= 1;
                FlagOutcome::Unflagged
            }
            None => FlagOutcome::NoChange,
        }
    }

    /// Reveals every unflagged neighbor of a revealed cell once the number of flagged
    /// neighbors matches its count.
    ///
    /// Only the number of flags is checked, not whether they sit on mines: a misplaced flag
    /// that still makes the count match will open a mined neighbor.
    pub fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(cell) = self.cell_at(coords) else {
            return RevealOutcome::NoChange;
        };
        if !cell.is_revealed() || cell.has_mine() {
            return RevealOutcome::NoChange;
        }

        let flagged = self.count_flagged_neighbors(coords);
        if flagged != cell.adjacent_mines() {
            log::trace!(
                "Not chording {:?}, {} flags for count {}",
                coords,
                flagged,
                cell.adjacent_mines()
            );
            return RevealOutcome::NoChange;
        }

        self.neighbors(coords)
            .map(|pos| self.reveal(pos))
            .fold(RevealOutcome::NoChange, BitOr::bitor)
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_flagged())
            .count() as u8
    }

    /// Whether every cell without a mine has been revealed.
    pub fn is_won(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_revealed() || cell.has_mine())
    }

    /// Display-only cleanup after a loss: opens every hidden mine and removes flags from
    /// cells without one. Returns the cells that changed.
    pub fn reveal_all_mines(&mut self) -> Vec<Coord2> {
        let mut changed = Vec::new();
        for ((row, col), cell) in self.cells.indexed_iter_mut() {
            let coords = (row as Coord, col as Coord);
            if cell.has_mine() {
                if cell.is_revealed() {
                    continue;
                }
                if cell.is_flagged() {
                    self.flag_count -= 1;
                }
                cell.expose_mine();
                changed.push(coords);
            } else if cell.is_flagged() {
                cell.clear_flag();
                self.flag_count -= 1;
                changed.push(coords);
            }
        }
        log::debug!("Exposed {} cells after loss", changed.len());
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 0 1 M 1 0
    // 0 1 2 2 1 0
    // 1 2 M 2 1 0
    // M 3 3 M 1 0
    // 2 M 2 1 1 0
    const MINES_5X6: [Coord2; 5] = [(0, 3), (2, 2), (3, 0), (3, 3), (4, 1)];

    const COUNTS_5X6: [[u8; 6]; 5] = [
        [0, 0, 1, 0, 1, 0],
        [0, 1, 2, 2, 1, 0],
        [1, 2, 0, 2, 1, 0],
        [0, 3, 3, 0, 1, 0],
        [2, 0, 2, 1, 1, 0],
    ];

    fn board_5x6() -> Board {
        Board::from_mine_coords((5, 6), &MINES_5X6).unwrap()
    }

    fn sorted(mut coords: Vec<Coord2>) -> Vec<Coord2> {
        coords.sort_unstable();
        coords
    }

    fn brute_force_count(board: &Board, (row, col): Coord2) -> u8 {
        let (rows, cols) = board.size();
        let mut count = 0;
        for dr in -1i16..=1 {
            for dc in -1i16..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = row as i16 + dr;
                let c = col as i16 + dc;
                if r < 0 || c < 0 || r >= rows as i16 || c >= cols as i16 {
                    continue;
                }
                if board.cell_at((r as Coord, c as Coord)).unwrap().has_mine() {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn new_rejects_bad_configurations() {
        assert_eq!(Board::new(0, 5, 1), Err(GameError::InvalidConfiguration));
        assert_eq!(Board::new(5, 0, 1), Err(GameError::InvalidConfiguration));
        assert_eq!(Board::new(5, 5, 0), Err(GameError::InvalidConfiguration));
        assert_eq!(Board::new(5, 5, 25), Err(GameError::InvalidConfiguration));
        assert!(Board::new(5, 5, 24).is_ok());
    }

    #[test]
    fn from_mine_coords_rejects_outside_mines() {
        assert_eq!(
            Board::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidConfiguration)
        );
    }

    #[test]
    fn from_mine_coords_computes_counts() {
        let board = board_5x6();
        assert_eq!(board.mine_count(), 5);
        for (coords, cell) in board.cells() {
            assert_eq!(MINES_5X6.contains(&coords), cell.has_mine());
            if !cell.has_mine() {
                assert_eq!(
                    COUNTS_5X6[coords.0 as usize][coords.1 as usize],
                    cell.adjacent_mines(),
                    "count at {:?}",
                    coords
                );
            }
        }
    }

    #[test]
    fn adjacent_counts_match_brute_force_after_placement() {
        for seed in 0..10 {
            let mut board = Board::new(12, 15, 40).unwrap();
            board
                .place_mines((6, 7), 40, 2, &mut RandomPlacer::new(seed))
                .unwrap();
            assert_eq!(board.cells().filter(|(_, cell)| cell.has_mine()).count(), 40);
            for (coords, cell) in board.cells() {
                assert_eq!(cell.adjacent_mines(), brute_force_count(&board, coords));
            }
        }
    }

    #[test]
    fn safe_zone_is_mine_free() {
        for seed in 0..25 {
            let mut board = Board::new(10, 10, 10).unwrap();
            board
                .place_mines((5, 5), 10, 4, &mut RandomPlacer::new(seed))
                .unwrap();
            for (coords, cell) in board.cells() {
                if coords.0.abs_diff(5) < 4 && coords.1.abs_diff(5) < 4 {
                    assert!(!cell.has_mine(), "mine inside safe zone at {:?}", coords);
                }
            }
        }
    }

    #[test]
    fn place_mines_rejects_when_safe_zone_leaves_no_room() {
        // 100 cells, the 7x7 zone leaves 51 eligible
        let mut board = Board::new(10, 10, 51).unwrap();
        let result = board.place_mines((5, 5), 51, 4, &mut RandomPlacer::new(0));
        assert_eq!(result, Err(GameError::InvalidConfiguration));
        assert!(!board.mines_placed());

        let mut board = Board::new(10, 10, 50).unwrap();
        assert!(board
            .place_mines((5, 5), 50, 4, &mut RandomPlacer::new(0))
            .is_ok());
        assert_eq!(board.mine_count(), 50);

        let mut board = Board::new(5, 5, 1).unwrap();
        let result = board.place_mines((2, 2), 1, 4, &mut RandomPlacer::new(0));
        assert_eq!(result, Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn place_mines_only_once() {
        let mut board = Board::new(10, 10, 10).unwrap();
        let mut placer = RandomPlacer::new(3);
        board.place_mines((0, 0), 10, 1, &mut placer).unwrap();
        assert_eq!(
            board.place_mines((0, 0), 10, 1, &mut placer),
            Err(GameError::MinesAlreadyPlaced)
        );
    }

    #[test]
    fn place_mines_uses_the_given_placer() {
        let mut board = Board::new(3, 3, 2).unwrap();
        // eligible cells around (0, 0) with radius 2 are (0,2), (1,2), (2,0), (2,1), (2,2)
        let mut placer = |candidates: usize, count: usize| {
            assert_eq!(candidates, 5);
            (candidates - count..candidates).collect::<Vec<_>>()
        };
        board.place_mines((0, 0), 2, 2, &mut placer).unwrap();
        let mines: Vec<_> = board
            .cells()
            .filter(|(_, cell)| cell.has_mine())
            .map(|(coords, _)| coords)
            .collect();
        assert_eq!(mines, vec![(2, 1), (2, 2)]);
        assert_eq!(board.cell_at((1, 1)).unwrap().adjacent_mines(), 2);
    }

    #[test]
    fn place_mines_rejects_repeated_picks() {
        let mut board = Board::new(5, 5, 3).unwrap();
        let result = board.place_mines((4, 4), 3, 1, &mut |_: usize, _: usize| vec![0usize, 0, 0]);
        assert_eq!(result, Err(GameError::PlacementMismatch));
        assert!(!board.mines_placed());
        assert!(board.cells().all(|(_, cell)| !cell.has_mine()));

        board
            .place_mines((4, 4), 3, 1, &mut |_: usize, _: usize| vec![0usize, 1, 2])
            .unwrap();
        assert_eq!(board.mine_count(), 3);
        assert_eq!(board.cells().filter(|(_, cell)| cell.has_mine()).count(), 3);
    }

    #[test]
    fn place_mines_rejects_short_or_out_of_range_picks() {
        let mut board = Board::new(5, 5, 3).unwrap();
        assert_eq!(
            board.place_mines((4, 4), 3, 1, &mut |_: usize, _: usize| vec![0usize]),
            Err(GameError::PlacementMismatch)
        );
        assert_eq!(
            board.place_mines((4, 4), 3, 1, &mut |candidates: usize, _: usize| {
                vec![0, 1, candidates]
            }),
            Err(GameError::PlacementMismatch)
        );
        assert!(!board.mines_placed());
        assert!(board.cells().all(|(_, cell)| !cell.has_mine()));
    }

    #[test]
    fn reveal_before_placement_is_ignored() {
        let mut board = Board::new(4, 4, 2).unwrap();
        assert_eq!(board.reveal((1, 1)), RevealOutcome::NoChange);
        assert!(!board.cell_at((1, 1)).unwrap().is_revealed());
    }

    #[test]
    fn reveal_out_of_bounds_is_ignored() {
        let mut board = board_5x6();
        assert_eq!(board.reveal((5, 0)), RevealOutcome::NoChange);
        assert_eq!(board.reveal((0, 6)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((9, 9)), FlagOutcome::NoChange);
        assert_eq!(board.chord((9, 9)), RevealOutcome::NoChange);
    }

    #[test]
    fn reveal_numbered_cell_does_not_propagate() {
        let mut board = board_5x6();
        assert_eq!(board.reveal((1, 2)), RevealOutcome::Revealed(vec![(1, 2)]));
    }

    #[test]
    fn reveal_zero_opens_bubble() {
        let mut board = board_5x6();
        let outcome = board.reveal((1, 0));
        let expected = vec![
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (1, 2),
            (2, 0),
            (2, 1),
        ];
        assert_eq!(sorted(outcome.revealed().to_vec()), expected);
        assert_eq!(outcome.revealed()[0], (1, 0));
    }

    #[test]
    fn flood_fill_stops_at_numbers() {
        let mut board = board_5x6();
        let outcome = board.reveal((0, 5));
        let revealed = sorted(outcome.revealed().to_vec());
        assert_eq!(revealed.len(), 10);
        assert!(revealed.iter().all(|&(_, col)| col >= 4));
        assert!(!board.cell_at((0, 3)).unwrap().is_revealed());
    }

    #[test]
    fn flood_fill_skips_flags() {
        let mut board = board_5x6();
        assert_eq!(board.toggle_flag((0, 1)), FlagOutcome::Flagged);
        let outcome = board.reveal((1, 0));
        assert_eq!(
            sorted(outcome.revealed().to_vec()),
            vec![(0, 0), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
        let flagged = board.cell_at((0, 1)).unwrap();
        assert!(flagged.is_flagged() && !flagged.is_revealed());
    }

    #[test]
    fn mine_free_board_opens_in_one_reveal() {
        let mut board = Board::from_mine_coords((7, 9), &[]).unwrap();
        let outcome = board.reveal((3, 4));
        assert_eq!(outcome.revealed().len(), 63);
        assert!(board.is_won());
    }

    #[test]
    fn large_board_flood_fill_completes() {
        let mut board = Board::from_mine_coords((255, 255), &[]).unwrap();
        let outcome = board.reveal((0, 0));
        assert_eq!(outcome.revealed().len(), 255 * 255);
    }

    #[test]
    fn reveal_never_reports_duplicates() {
        let mut board = board_5x6();
        let first = board.reveal((0, 5));
        let mut deduped = sorted(first.revealed().to_vec());
        deduped.dedup();
        assert_eq!(deduped.len(), first.revealed().len());

        assert_eq!(board.reveal((0, 5)), RevealOutcome::NoChange);
        assert_eq!(board.reveal((2, 5)), RevealOutcome::NoChange);
    }

    #[test]
    fn flag_and_reveal_are_mutually_exclusive() {
        let mut board = board_5x6();
        board.reveal((1, 2));
        assert_eq!(board.toggle_flag((1, 2)), FlagOutcome::NoChange);
        assert!(!board.cell_at((1, 2)).unwrap().is_flagged());

        assert_eq!(board.toggle_flag((4, 4)), FlagOutcome::Flagged);
        assert_eq!(board.reveal((4, 4)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((4, 4)), FlagOutcome::Unflagged);
        assert_eq!(board.reveal((4, 4)), RevealOutcome::Revealed(vec![(4, 4)]));
    }

    #[test]
    fn flag_count_tracks_toggles() {
        let mut board = board_5x6();
        board.toggle_flag((0, 3));
        board.toggle_flag((2, 2));
        assert_eq!(board.flag_count(), 2);
        assert_eq!(board.mines_left(), 3);
        board.toggle_flag((0, 3));
        assert_eq!(board.mines_left(), 4);
    }

    #[test]
    fn chord_with_matching_flags_reveals_neighbors() {
        let mut board = board_5x6();
        board.reveal((1, 2));
        board.toggle_flag((0, 3));
        board.toggle_flag((2, 2));

        let outcome = board.chord((1, 2));
        assert_eq!(outcome.hit_mine(), None);
        for coords in [(0, 1), (0, 2), (1, 1), (1, 3), (2, 1), (2, 3)] {
            assert!(board.cell_at(coords).unwrap().is_revealed(), "{:?}", coords);
        }
        // (0, 1) is a zero and keeps flooding
        assert!(board.cell_at((2, 0)).unwrap().is_revealed());
        assert!(!board.cell_at((0, 3)).unwrap().is_revealed());
        assert!(!board.cell_at((2, 2)).unwrap().is_revealed());

        let mut deduped = sorted(outcome.revealed().to_vec());
        deduped.dedup();
        assert_eq!(deduped.len(), outcome.revealed().len());
    }

    #[test]
    fn chord_with_too_few_flags_is_a_no_op() {
        let mut board = board_5x6();
        board.reveal((1, 2));
        board.toggle_flag((0, 3));
        assert_eq!(board.chord((1, 2)), RevealOutcome::NoChange);
        assert!(!board.cell_at((1, 1)).unwrap().is_revealed());
    }

    #[test]
    fn chord_with_too_many_flags_is_a_no_op() {
        let mut board = board_5x6();
        board.reveal((1, 2));
        board.toggle_flag((0, 3));
        board.toggle_flag((2, 2));
        board.toggle_flag((1, 3));
        assert_eq!(board.chord((1, 2)), RevealOutcome::NoChange);
        assert!(!board.cell_at((1, 1)).unwrap().is_revealed());
    }

    #[test]
    fn chord_on_hidden_cell_is_a_no_op() {
        let mut board = board_5x6();
        board.toggle_flag((0, 3));
        board.toggle_flag((2, 2));
        assert_eq!(board.chord((1, 2)), RevealOutcome::NoChange);
    }

    #[test]
    fn chord_trusts_misplaced_flags() {
        let mut board = board_5x6();
        board.reveal((1, 2));
        board.toggle_flag((0, 3));
        board.toggle_flag((1, 3));

        let outcome = board.chord((1, 2));
        assert_eq!(outcome.hit_mine(), Some((2, 2)));
    }

    #[test]
    fn win_requires_every_safe_cell() {
        let mut board = board_5x6();
        // (4, 2) has no zero neighbor, so no flood fill reaches it
        let last = (4, 2);
        let safe: Vec<_> = board
            .cells()
            .filter(|&(coords, cell)| !cell.has_mine() && coords != last)
            .map(|(coords, _)| coords)
            .collect();
        for coords in safe {
            board.reveal(coords);
        }
        assert!(!board.is_won());
        board.reveal(last);
        assert!(board.is_won());
    }

    #[test]
    fn hit_mine_then_cleanup() {
        let mut board = board_5x6();
        board.reveal((0, 5));
        board.toggle_flag((0, 3));
        board.toggle_flag((1, 1));

        let outcome = board.reveal((2, 2));
        assert_eq!(
            outcome,
            RevealOutcome::HitMine {
                mine: (2, 2),
                revealed: vec![(2, 2)],
            }
        );

        let changed = sorted(board.reveal_all_mines());
        assert_eq!(changed, vec![(0, 3), (1, 1), (3, 0), (3, 3), (4, 1)]);
        for (coords, cell) in board.cells() {
            assert!(!(cell.is_flagged() && cell.is_revealed()));
            if cell.has_mine() {
                assert!(cell.is_revealed(), "mine at {:?} still hidden", coords);
            }
        }
        let wrong_flag = board.cell_at((1, 1)).unwrap();
        assert!(!wrong_flag.is_flagged() && !wrong_flag.is_revealed());
        assert!(board.cell_at((0, 4)).unwrap().is_revealed());
        assert!(!board.cell_at((0, 0)).unwrap().is_revealed());
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn single_mine_corner_scenario() {
        let mut board = Board::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
        for coords in [(0, 1), (1, 0), (1, 1)] {
            assert_eq!(board.cell_at(coords).unwrap().adjacent_mines(), 1);
        }
        for coords in [(0, 2), (1, 2), (2, 0), (2, 1), (2, 2)] {
            assert_eq!(board.cell_at(coords).unwrap().adjacent_mines(), 0);
        }

        let outcome = board.reveal((2, 2));
        assert_eq!(outcome.revealed().len(), 8);
        assert!(board.is_won());
    }

    #[test]
    fn merging_outcomes_keeps_first_mine_and_all_cells() {
        use RevealOutcome::*;

        assert_eq!(NoChange | NoChange, NoChange);
        assert_eq!(
            Revealed(vec![(0, 0)]) | NoChange,
            Revealed(vec![(0, 0)])
        );
        assert_eq!(
            Revealed(vec![(0, 0)]) | Revealed(vec![(0, 1)]),
            Revealed(vec![(0, 0), (0, 1)])
        );
        assert_eq!(
            Revealed(vec![(0, 0)])
                | HitMine {
                    mine: (1, 1),
                    revealed: vec![(1, 1)],
                }
                | HitMine {
                    mine: (2, 2),
                    revealed: vec![(2, 2)],
                },
            HitMine {
                mine: (1, 1),
                revealed: vec![(0, 0), (1, 1), (2, 2)],
            }
        );
    }
}
