use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A hexagonal minesweeper game from generation to win or loss.
///
/// Cells are kept in one arena indexed by `(column, row)`. The arena is the bounding rectangle of
/// the hexagon; slots outside [`HexShape::contains`] exist but are never read or written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    shape: HexShape,
    cells: Array2<Cell>,
    total_mines: CellCount,
    flagged_count: CellCount,
    outcome: GameOutcome,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Randomly generated board for a difficulty preset.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::generate_with(difficulty.game_config(), RandomMineGenerator::from_entropy())
    }

    /// Reproducible board for a difficulty preset.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::generate_with(difficulty.game_config(), RandomMineGenerator::new(seed))
    }

    pub fn generate_with(config: GameConfig, generator: impl MineGenerator) -> Self {
        Self::from_layout(&generator.generate(config))
    }

    /// Board with mines at exactly the given coordinates.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        Ok(Self::from_layout(&MineLayout::from_mine_coords(size, mine_coords)?))
    }

    pub fn from_layout(layout: &MineLayout) -> Self {
        let shape = layout.shape();
        let mut cells = Self::generate_cells(shape);
        Self::place_mines(&mut cells, layout);
        Self::label_neighbors(&mut cells, shape);

        Self {
            shape,
            cells,
            total_mines: layout.mine_count(),
            flagged_count: 0,
            outcome: GameOutcome::InProgress,
            triggered_mine: None,
        }
    }

    fn generate_cells(shape: HexShape) -> Array2<Cell> {
        Array2::default(shape.bounds().to_nd_index())
    }

    fn place_mines(cells: &mut Array2<Cell>, layout: &MineLayout) {
        for coords in layout.iter_mines() {
            cells[coords.to_nd_index()].add_mine();
        }
    }

    fn label_neighbors(cells: &mut Array2<Cell>, shape: HexShape) {
        for coords in shape.iter_coords() {
            if cells[coords.to_nd_index()].has_mine() {
                continue;
            }
            let count = shape
                .iter_neighbors(coords)
                .filter(|&pos| cells[pos.to_nd_index()].has_mine())
                .count();
            // at most six neighbors
            cells[coords.to_nd_index()].set_neighbor_mine_count(count as u8);
        }
    }

    pub fn size(&self) -> Coord {
        self.shape.size()
    }

    pub fn column_count(&self) -> Coord {
        self.shape.column_count()
    }

    pub fn cells_in_column(&self, col: Coord) -> Coord {
        self.shape.cells_in_column(col)
    }

    pub fn highest_column_count(&self) -> Coord {
        self.shape.highest_column_count()
    }

    pub fn total_cells(&self) -> CellCount {
        self.shape.total_cells()
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    /// Mines placed minus flags currently set.
    pub fn remaining_mine_count(&self) -> isize {
        (self.total_mines as isize) - (self.flagged_count as isize)
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_finished()
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn is_cell_valid(&self, coords: Coord2) -> bool {
        self.shape.contains(coords)
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        self.shape.iter_coords()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()].view(self.outcome == GameOutcome::Lost))
    }

    /// Engine-side mine lookup that ignores what the player is allowed to see.
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.shape.contains(coords) && self.cells[coords.to_nd_index()].has_mine()
    }

    pub fn neighbors(&self, coords: Coord2) -> Result<SmallVec<[Coord2; 6]>> {
        let coords = self.validate_coords(coords)?;
        Ok(self.shape.iter_neighbors(coords).collect())
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;
        if self.outcome.is_finished() {
            log::debug!("Ignoring flag at {coords:?}, game already ended");
            return Ok(NoChange);
        }

        let mines_left = self.remaining_mine_count();
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(if cell.is_revealed() {
            NoChange
        } else if cell.is_flagged() {
            cell.unflag();
            self.flagged_count -= 1;
            Changed
        } else if mines_left > 0 {
            cell.flag();
            self.flagged_count += 1;
            Changed
        } else {
            log::debug!("Flag at {coords:?} rejected, no mines left to flag");
            NoChange
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.validate_coords(coords)?;
        if self.outcome.is_finished() {
            log::debug!("Ignoring reveal at {coords:?}, game already ended");
            return Ok(NoChange);
        }

        let cell = self.cells[coords.to_nd_index()];
        if !cell.is_hidden() {
            return Ok(NoChange);
        }

        if cell.has_mine() {
            self.cells[coords.to_nd_index()].reveal();
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return Ok(HitMine);
        }

        self.flood_reveal(coords);

        if self.check_win() {
            self.end_game(true);
            Ok(Won)
        } else {
            Ok(Revealed)
        }
    }

    /// Reveals `start` and spreads through connected cells without adjacent mines.
    ///
    /// Flagged cells stop the spread. Mines are never reached because every cell that is
    /// expanded has no mine around it.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            if !cell.reveal() {
                continue;
            }
            let count = cell.neighbor_mine_count();
            log::trace!("Revealed cell at {visit_coords:?}, mine count: {count}");

            if count == 0 {
                to_visit.extend(
                    self.shape
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }
    }

    /// Every non-mine cell is revealed.
    pub fn check_win(&self) -> bool {
        self.shape.iter_coords().all(|coords| {
            let cell = self.cells[coords.to_nd_index()];
            cell.has_mine() || cell.is_revealed()
        })
    }

    fn end_game(&mut self, won: bool) {
        if self.outcome.is_finished() {
            return;
        }

        self.outcome = if won {
            GameOutcome::Won
        } else {
            GameOutcome::Lost
        };
        log::debug!("Game ended: {:?}", self.outcome);

        for coords in self.shape.iter_coords() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if won {
                if cell.has_mine() && cell.flag() {
                    self.flagged_count += 1;
                }
            } else {
                cell.force_reveal();
            }
        }
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.shape.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn revealed(board: &Board) -> Vec<Coord2> {
        board
            .iter_coords()
            .filter(|&coords| board.cell_at(coords).unwrap().is_revealed)
            .collect()
    }

    #[test]
    fn easy_board_shape_and_counter() {
        let board = Board::with_seed(Difficulty::Easy, 1);

        assert_eq!(board.column_count(), 9);
        assert_eq!(board.total_cells(), 61);
        assert_eq!(board.total_mines(), 10);
        assert_eq!(board.remaining_mine_count(), 10);
        assert_eq!(board.outcome(), GameOutcome::InProgress);
        let lengths: Vec<_> = (0..9).map(|col| board.cells_in_column(col)).collect();
        assert_eq!(lengths, [5, 6, 7, 8, 9, 8, 7, 6, 5]);
    }

    #[test]
    fn labels_count_adjacent_mines() {
        // the six neighbors of the center cell of a size 3 board
        let ring = [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (2, 3)];
        let board = board(3, &ring);

        assert_eq!(board.cells[[2, 2]].neighbor_mine_count(), 6);
        assert_eq!(board.cells[[0, 0]].neighbor_mine_count(), 1);
        assert_eq!(board.cells[[1, 0]].neighbor_mine_count(), 2);
    }

    #[test]
    fn neighbors_of_center_cell() {
        let board = Board::with_seed(Difficulty::Easy, 9);

        let neighbors = board.neighbors((4, 4)).unwrap();

        assert_eq!(
            neighbors.as_slice(),
            [(3, 3), (4, 3), (5, 3), (3, 4), (5, 4), (4, 5)]
        );
        assert_eq!(board.neighbors((0, 0)).unwrap().len(), 3);
        assert_eq!(board.neighbors((0, 5)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn reveal_numbered_cell_does_not_cascade() {
        let mut board = board(3, &[(0, 0)]);

        assert_eq!(board.reveal((1, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(revealed(&board), [(1, 0)]);
        assert_eq!(board.cell_at((1, 0)).unwrap().neighbor_mine_count, Some(1));
    }

    #[test]
    fn reveal_zero_cell_opens_region_and_border() {
        // mine in the far corner, everything else reachable from the opposite corner
        let mut board = board(3, &[(4, 2)]);

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(board.cell_at((0, 0)).unwrap().neighbor_mine_count, Some(0));
        assert_eq!(board.cell_at((3, 2)).unwrap().neighbor_mine_count, Some(1));
        assert!(!board.cells[[4, 2]].is_revealed());
        assert!(board.cells[[4, 2]].is_flagged());
    }

    #[test]
    fn flood_fill_stops_at_numbered_wall() {
        // a wall of mines down column 3 of a size 3 board splits the right column off
        let mut board = board(3, &[(3, 0), (3, 1), (3, 2), (3, 3)]);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);

        for coords in board.iter_coords() {
            let expected = coords.0 <= 2;
            assert_eq!(
                board.cells[coords.to_nd_index()].is_revealed(),
                expected,
                "{coords:?}"
            );
        }
        assert!(!board.is_game_over());
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = board(3, &[(4, 2)]);
        board.toggle_flag((1, 1)).unwrap();

        board.reveal((0, 0)).unwrap();

        assert!(board.cells[[1, 1]].is_flagged());
        assert!(!board.cells[[1, 1]].is_revealed());
        assert!(!board.is_game_over());
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut board = board(4, &[(0, 0), (6, 3)]);

        board.reveal((3, 3)).unwrap();
        let after_first = board.clone();

        assert_eq!(board.reveal((3, 3)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board, after_first);
    }

    #[test]
    fn reveal_flagged_cell_is_no_op() {
        let mut board = board(3, &[(0, 0)]);
        board.toggle_flag((2, 2)).unwrap();

        assert_eq!(board.reveal((2, 2)).unwrap(), RevealOutcome::NoChange);
        assert!(!board.cell_at((2, 2)).unwrap().is_revealed);
    }

    #[test]
    fn hitting_mine_loses_and_reveals_everything() {
        let mut board = board(3, &[(0, 0), (4, 2)]);
        board.toggle_flag((4, 2)).unwrap();

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(board.outcome(), GameOutcome::Lost);
        assert_eq!(board.triggered_mine(), Some((0, 0)));
        assert_eq!(revealed(&board).len(), usize::from(board.total_cells()));
        let flagged_mine = board.cell_at((4, 2)).unwrap();
        assert_eq!(flagged_mine.has_mine, Some(true));
        assert!(flagged_mine.is_flagged);
    }

    #[test]
    fn winning_flags_remaining_mines() {
        let mut board = board(2, &[(0, 0)]);
        assert_eq!(board.remaining_mine_count(), 1);

        let outcomes: Vec<_> = board
            .iter_coords()
            .filter(|&coords| coords != (0, 0))
            .map(|coords| board.reveal(coords).unwrap())
            .collect();

        assert!(outcomes.contains(&RevealOutcome::Won));
        assert_eq!(board.outcome(), GameOutcome::Won);
        assert!(board.check_win());
        assert!(board.cell_at((0, 0)).unwrap().is_flagged);
        assert!(!board.cell_at((0, 0)).unwrap().is_revealed);
        assert_eq!(board.remaining_mine_count(), 0);
    }

    #[test]
    fn winning_keeps_player_flags_and_counts_them_once() {
        let mut board = board(2, &[(0, 0), (2, 1)]);
        board.toggle_flag((0, 0)).unwrap();
        assert_eq!(board.remaining_mine_count(), 1);

        let safe: Vec<_> = board
            .iter_coords()
            .filter(|&coords| !board.has_mine_at(coords))
            .collect();
        for coords in safe {
            board.reveal(coords).unwrap();
        }

        assert_eq!(board.outcome(), GameOutcome::Won);
        assert_eq!(board.remaining_mine_count(), 0);
        assert!(board.cell_at((0, 0)).unwrap().is_flagged);
        assert!(board.cell_at((2, 1)).unwrap().is_flagged);
    }

    #[test]
    fn oversized_config_is_clamped_to_max_size() {
        let board = Board::generate_with(
            GameConfig::new_unchecked(200, 5),
            RandomMineGenerator::new(1),
        );

        assert_eq!(board.size(), GameConfig::MAX_SIZE);
        assert_eq!(board.total_mines(), 5);
        assert_eq!(board.total_cells(), 48769);
    }

    #[test]
    fn moves_after_game_end_are_ignored() {
        let mut board = board(3, &[(0, 0)]);
        board.reveal((0, 0)).unwrap();
        let frozen = board.clone();

        assert_eq!(board.reveal((2, 2)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((2, 2)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board, frozen);
    }

    #[test]
    fn invalid_coords_are_rejected_without_change() {
        let mut board = board(3, &[(0, 0)]);
        let before = board.clone();

        assert_eq!(board.reveal((0, 3)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((5, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.cell_at((9, 9)), Err(GameError::InvalidCoords));
        assert!(!board.is_cell_valid((0, 3)));
        assert_eq!(board, before);
    }

    #[test]
    fn flag_and_unflag_adjust_counter() {
        let mut board = Board::with_seed(Difficulty::Easy, 5);
        let safe = board
            .iter_coords()
            .find(|&coords| !board.has_mine_at(coords))
            .unwrap();

        assert_eq!(board.toggle_flag(safe).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.remaining_mine_count(), 9);
        assert!(board.cell_at(safe).unwrap().is_flagged);

        assert_eq!(board.toggle_flag(safe).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.remaining_mine_count(), 10);
        assert!(!board.cell_at(safe).unwrap().is_flagged);
    }

    #[test]
    fn flag_budget_stops_at_zero() {
        let mut board = board(3, &[(0, 0), (4, 2)]);

        board.toggle_flag((1, 1)).unwrap();
        board.toggle_flag((2, 2)).unwrap();
        assert_eq!(board.remaining_mine_count(), 0);

        let before = board.clone();
        assert_eq!(board.toggle_flag((3, 3)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board, before);

        // unflagging is always allowed
        assert_eq!(board.toggle_flag((1, 1)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.remaining_mine_count(), 1);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut board = board(3, &[(0, 0)]);
        board.reveal((1, 0)).unwrap();

        assert_eq!(board.toggle_flag((1, 0)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board.remaining_mine_count(), 1);
    }

    #[test]
    fn cell_view_hides_unrevealed_mines() {
        let board = board(3, &[(0, 0)]);

        let view = board.cell_at((0, 0)).unwrap();

        assert_eq!(view.has_mine, None);
        assert_eq!(view.neighbor_mine_count, None);
        assert!(!view.is_revealed);
    }
}
