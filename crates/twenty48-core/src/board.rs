//! The [`Board`] type, an immutable N×N grid of tile values, and the
//! [`Pos`] cell coordinate.
//!
//! A `Board` is a value: every spawn and move produces a new board that
//! replaces the previous one wholesale. Cells are stored row-major in a flat
//! buffer.

use std::fmt;

use crate::error::BoardError;

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A cell position. Ordering is row-major.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Whether `value` may be stored in a cell: 0 (empty) or a power of two ≥ 2.
#[inline]
pub const fn is_tile_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// An N×N grid of tile values, 0 meaning empty.
///
/// Every cell holds 0 or a power of two ≥ 2; constructors that take external
/// data check this.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")
)]
pub struct Board {
    cells: Vec<u32>,
    size: usize,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0; size * size],
            size,
        }
    }

    /// Build a board from rows, checking that it is square and that every
    /// value is a valid tile.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, BoardError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: values.len(),
                    size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !is_tile_value(value) {
                    return Err(BoardError::InvalidTile {
                        pos: Pos::new(row, col),
                        value,
                    });
                }
            }
            cells.extend_from_slice(values);
        }
        Ok(Self { cells, size })
    }

    /// Wrap an already validated row-major buffer.
    pub(crate) fn from_cells(cells: Vec<u32>, size: usize) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { cells, size }
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major cell values.
    #[inline]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// The value at `pos`, or `None` when `pos` is outside the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<u32> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// One row as a slice. Panics if `row >= size`.
    #[inline]
    pub fn row(&self, row: usize) -> &[u32] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // `chunks` panics on 0; an empty board has no rows anyway.
        self.cells.chunks(self.size.max(1))
    }

    /// The rows as owned vectors.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }

    /// A copy of this board with `value` placed at `pos`.
    pub fn with_tile(&self, pos: Pos, value: u32) -> Result<Self, BoardError> {
        let i = self.index(pos).ok_or(BoardError::OutOfBounds {
            pos,
            size: self.size,
        })?;
        if !is_tile_value(value) {
            return Err(BoardError::InvalidTile { pos, value });
        }
        let mut cells = self.cells.clone();
        cells[i] = value;
        Ok(Self::from_cells(cells, self.size))
    }

    /// Positions of all empty cells, in row-major order. Empty when the
    /// board is full.
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.iter()
            .filter(|&(_, value)| value == 0)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Whether no cell is empty.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// The largest tile on the board (0 if empty).
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Row-major iterator over `(Pos, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, u32)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (Pos::new(i / size, i % size), v))
    }

    #[inline]
    fn index(&self, pos: Pos) -> Option<usize> {
        (pos.row < self.size && pos.col < self.size).then(|| pos.row * self.size + pos.col)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SIZE)
    }
}

impl TryFrom<Vec<Vec<u32>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<Board> for Vec<Vec<u32>> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().max(1).to_string().len();
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, &v) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                if v == 0 {
                    write!(f, "{:>width$}", ".")?;
                } else {
                    write!(f, "{v:>width$}")?;
                }
            }
        }
        Ok(())
    }
}
