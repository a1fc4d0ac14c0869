//! The move engine: row reduction and whole-board slides.
//!
//! A move in any direction is computed by orienting the board so that the
//! move becomes leftward, reducing every row with [`merge_row`], and undoing
//! the orientation. All functions here are pure.

use crate::board::{Board, Pos};
use crate::direction::Direction;

/// Result of reducing one row toward index 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowMerge {
    /// The reduced row, zero-padded to the input length.
    pub cells: Vec<u32>,
    /// Indices in `cells` holding a tile produced by a merge.
    pub merged: Vec<usize>,
    /// Sum of the merged tiles.
    pub gained: u64,
}

/// Slide and merge one row toward index 0.
///
/// Zeros are removed, then equal neighbours are merged in a single
/// left-to-right pass: the left tile of a pair doubles, the right one is
/// consumed, and the scan resumes after the pair, so no tile merges twice.
/// The result is padded with zeros to the input length.
pub fn merge_row(row: &[u32]) -> RowMerge {
    let tiles: Vec<u32> = row.iter().copied().filter(|&v| v != 0).collect();
    let mut cells = Vec::with_capacity(row.len());
    let mut merged = Vec::new();
    let mut gained = 0u64;

    let mut i = 0;
    while i < tiles.len() {
        let doubled = tiles
            .get(i + 1)
            .filter(|&&next| next == tiles[i])
            .and_then(|_| tiles[i].checked_mul(2));
        match doubled {
            Some(value) => {
                merged.push(cells.len());
                cells.push(value);
                gained += u64::from(value);
                i += 2;
            }
            None => {
                cells.push(tiles[i]);
                i += 1;
            }
        }
    }

    cells.resize(row.len(), 0);
    RowMerge {
        cells,
        merged,
        gained,
    }
}

/// Result of sliding a whole board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    /// The board after the move (no tile spawned yet).
    pub board: Board,
    /// Whether any cell differs from the board before the move.
    pub changed: bool,
    /// Sum of the tiles produced by merges.
    pub gained: u64,
    /// Cells holding a merged tile, in row-major order.
    pub merged: Vec<Pos>,
}

/// Slide `board` in `direction`. The input is left untouched.
pub fn slide(board: &Board, direction: Direction) -> Slide {
    let size = board.size();
    if size == 0 {
        return Slide {
            board: board.clone(),
            changed: false,
            gained: 0,
            merged: Vec::new(),
        };
    }

    let oriented = direction.orient(board.cells(), size);
    let mut cells = Vec::with_capacity(oriented.len());
    let mut mask = vec![false; oriented.len()];
    let mut gained = 0;

    for (r, row) in oriented.chunks(size).enumerate() {
        let reduced = merge_row(row);
        for c in reduced.merged {
            mask[r * size + c] = true;
        }
        gained += reduced.gained;
        cells.extend(reduced.cells);
    }

    let next = Board::from_cells(direction.restore(&cells, size), size);
    let merged = direction
        .restore(&mask, size)
        .into_iter()
        .enumerate()
        .filter(|&(_, hit)| hit)
        .map(|(i, _)| Pos::new(i / size, i % size))
        .collect();
    let changed = next != *board;

    Slide {
        board: next,
        changed,
        gained,
        merged,
    }
}

/// Directions that would change `board`, each tested on its own.
pub fn legal_moves(board: &Board) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&d| slide(board, d).changed)
        .collect()
}

/// Whether any direction changes `board`.
pub fn can_move(board: &Board) -> bool {
    Direction::ALL.into_iter().any(|d| slide(board, d).changed)
}
