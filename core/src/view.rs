use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a presentation layer needs to draw the board, with hidden information removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord,
    pub remaining_mines: isize,
    pub outcome: GameOutcome,
    pub triggered_mine: Option<Coord2>,
    /// One entry per column, each as long as that column.
    pub columns: Vec<Vec<CellView>>,
}

impl BoardView {
    pub fn from_board(board: &Board) -> Self {
        let columns = (0..board.column_count())
            .map(|col| {
                (0..board.cells_in_column(col))
                    .filter_map(|row| board.cell_at((col, row)).ok())
                    .collect()
            })
            .collect();

        Self {
            size: board.size(),
            remaining_mines: board.remaining_mine_count(),
            outcome: board.outcome(),
            triggered_mine: board.triggered_mine(),
            columns,
        }
    }

    pub fn cell(&self, (col, row): Coord2) -> Option<&CellView> {
        self.columns.get(usize::from(col))?.get(usize::from(row))
    }
}
