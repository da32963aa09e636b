use serde::{Deserialize, Serialize};

/// Single coordinate axis used for columns, rows, and the board size.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(column, row)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Which neighbor-offset table applies to a column.
///
/// The board is stored as offset coordinates: every column starts at row 0, so the rows of the
/// columns on either side of the center are shifted by half a cell in opposite directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnRegime {
    Left,
    Center,
    Right,
}

impl ColumnRegime {
    pub const fn displacements(self) -> &'static [(i8, i8); 6] {
        match self {
            Self::Left => &LEFT_DISPLACEMENTS,
            Self::Center => &CENTER_DISPLACEMENTS,
            Self::Right => &RIGHT_DISPLACEMENTS,
        }
    }
}

const CENTER_DISPLACEMENTS: [(i8, i8); 6] = [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (0, 1)];

const LEFT_DISPLACEMENTS: [(i8, i8); 6] = [(-1, -1), (0, -1), (1, 0), (-1, 0), (0, 1), (1, 1)];

const RIGHT_DISPLACEMENTS: [(i8, i8); 6] = [(-1, 0), (0, -1), (1, -1), (-1, 1), (0, 1), (1, 0)];

/// Shape of a hexagonal board with `size` cells along each edge.
///
/// Columns run from `0` to `2 * size - 2`. Column `x` holds `size + min(x, 2 * size - 2 - x)`
/// cells, so the outer columns are the narrowest and the center column `size - 1` is the widest.
/// For `size = 5` the column lengths are `5 6 7 8 9 8 7 6 5`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexShape {
    size: Coord,
}

impl HexShape {
    /// Largest size whose columns still fit in a [`Coord`].
    pub const MAX_SIZE: Coord = 128;

    /// Sizes above [`Self::MAX_SIZE`] are clamped to it.
    pub const fn new(size: Coord) -> Self {
        let size = if size > Self::MAX_SIZE {
            Self::MAX_SIZE
        } else {
            size
        };
        Self { size }
    }

    pub const fn size(self) -> Coord {
        self.size
    }

    pub const fn center_column(self) -> Coord {
        self.size.saturating_sub(1)
    }

    pub const fn column_count(self) -> Coord {
        (2 * self.size as CellCount).saturating_sub(1) as Coord
    }

    /// Number of cells in the widest (center) column.
    pub const fn highest_column_count(self) -> Coord {
        self.column_count()
    }

    /// Number of cells in column `col`, zero for columns outside the board.
    pub const fn cells_in_column(self, col: Coord) -> Coord {
        if col >= self.column_count() {
            return 0;
        }
        let mirrored = self.column_count() - 1 - col;
        let offset = if col < mirrored { col } else { mirrored };
        self.size + offset
    }

    /// Total number of cells, `3 * size^2 - 3 * size + 1`.
    pub const fn total_cells(self) -> CellCount {
        let size = self.size as CellCount;
        if size == 0 {
            return 0;
        }
        (3 as CellCount)
            .saturating_mul(size)
            .saturating_mul(size)
            .saturating_sub(3 * size)
            + 1
    }

    /// Dimensions of the rectangle the ragged columns are stored in.
    pub const fn bounds(self) -> Coord2 {
        (self.column_count(), self.highest_column_count())
    }

    pub const fn contains(self, (col, row): Coord2) -> bool {
        row < self.cells_in_column(col)
    }

    pub const fn regime(self, col: Coord) -> ColumnRegime {
        let center = self.center_column();
        if col < center {
            ColumnRegime::Left
        } else if col == center {
            ColumnRegime::Center
        } else {
            ColumnRegime::Right
        }
    }

    /// Iterates over every valid coordinate, column by column.
    pub fn iter_coords(self) -> impl Iterator<Item = Coord2> {
        (0..self.column_count())
            .flat_map(move |col| (0..self.cells_in_column(col)).map(move |row| (col, row)))
    }

    pub fn iter_neighbors(self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self)
    }
}

/// Applies `delta` to `coords`, returning a value only when it lands on the board.
fn apply_delta(coords: Coord2, delta: (i8, i8), shape: HexShape) -> Option<Coord2> {
    let (col, row) = coords;
    let (dx, dy) = delta;

    let next = (col.checked_add_signed(dx)?, row.checked_add_signed(dy)?);
    shape.contains(next).then_some(next)
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    shape: HexShape,
    displacements: &'static [(i8, i8); 6],
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, shape: HexShape) -> Self {
        Self {
            center,
            shape,
            displacements: shape.regime(center.0).displacements(),
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= self.displacements.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, self.displacements[self.index as usize], self.shape);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
