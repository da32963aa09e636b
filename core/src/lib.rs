use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod difficulty;
mod error;
mod generator;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const MIN_SIZE: Coord = 2;
    pub const MAX_SIZE: Coord = HexShape::MAX_SIZE;

    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates the board size and that at least one cell stays free of mines.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidSize);
        }
        let config = Self::new_unchecked(size, mines);
        if mines >= config.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(config)
    }

    pub const fn shape(&self) -> HexShape {
        HexShape::new(self.size)
    }

    pub const fn total_cells(&self) -> CellCount {
        self.shape().total_cells()
    }
}

/// Where the mines are, independent of any play state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    shape: HexShape,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(shape: HexShape, mine_mask: Array2<bool>) -> Self {
        let mine_count = shape
            .iter_coords()
            .filter(|&coords| mine_mask[coords.to_nd_index()])
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            shape,
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from explicit mine positions, duplicates are counted once.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if !(GameConfig::MIN_SIZE..=GameConfig::MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidSize);
        }
        let shape = HexShape::new(size);
        let mut mine_mask: Array2<bool> = Array2::default(shape.bounds().to_nd_index());

        for &coords in mine_coords {
            if !shape.contains(coords) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(shape, mine_mask);
        if layout.mine_count >= shape.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(layout)
    }

    pub fn shape(&self) -> HexShape {
        self.shape
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.shape.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.shape.contains(coords) && self[coords]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.shape.iter_coords().filter(|&coords| self[coords])
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
