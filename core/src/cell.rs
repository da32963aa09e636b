use serde::{Deserialize, Serialize};

/// State of a single hex cell, owned by the board's cell arena.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    neighbor_mine_count: u8,
}

impl Cell {
    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Neither revealed nor flagged.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// Adjacent mine count, meaningless for mine cells.
    pub const fn neighbor_mine_count(self) -> u8 {
        self.neighbor_mine_count
    }

    pub(crate) fn add_mine(&mut self) {
        self.has_mine = true;
    }

    pub(crate) fn set_neighbor_mine_count(&mut self, count: u8) {
        self.neighbor_mine_count = count;
    }

    /// Returns `false` when the cell was already revealed or is flagged.
    pub(crate) fn reveal(&mut self) -> bool {
        if !self.is_hidden() {
            return false;
        }
        self.is_revealed = true;
        true
    }

    /// Reveals the cell regardless of its flag, used when a mine goes off.
    pub(crate) fn force_reveal(&mut self) -> bool {
        let changed = !self.is_revealed;
        self.is_revealed = true;
        changed
    }

    pub(crate) fn flag(&mut self) -> bool {
        if !self.is_hidden() {
            return false;
        }
        self.is_flagged = true;
        true
    }

    pub(crate) fn unflag(&mut self) -> bool {
        if self.is_revealed || !self.is_flagged {
            return false;
        }
        self.is_flagged = false;
        true
    }

    /// Player-facing projection: the mine is only exposed once the cell is revealed or the game
    /// is lost, and the count only for revealed safe cells.
    pub const fn view(self, game_lost: bool) -> CellView {
        let mine_visible = self.is_revealed || game_lost;
        CellView {
            has_mine: if mine_visible { Some(self.has_mine) } else { None },
            is_revealed: self.is_revealed,
            is_flagged: self.is_flagged,
            neighbor_mine_count: if self.is_revealed && !self.has_mine {
                Some(self.neighbor_mine_count)
            } else {
                None
            },
        }
    }
}

/// Read-only view of a cell handed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub has_mine: Option<bool>,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighbor_mine_count: Option<u8>,
}
