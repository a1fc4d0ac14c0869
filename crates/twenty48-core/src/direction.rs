//! Move directions and the board orientation transforms they imply.

use std::fmt;
use std::str::FromStr;

use crate::messages::Key;

/// A move direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The direction bound to an arrow key, if any.
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::ArrowLeft => Some(Self::Left),
            Key::ArrowRight => Some(Self::Right),
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            _ => None,
        }
    }

    /// Lower-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Rearrange a row-major `size`×`size` buffer so that moving in this
    /// direction becomes moving left.
    pub fn orient<T: Copy>(self, cells: &[T], size: usize) -> Vec<T> {
        match self {
            Self::Left => cells.to_vec(),
            Self::Right => reverse_rows(cells.to_vec(), size),
            Self::Up => transpose(cells, size),
            Self::Down => reverse_rows(transpose(cells, size), size),
        }
    }

    /// Inverse of [`orient`](Direction::orient).
    pub fn restore<T: Copy>(self, cells: &[T], size: usize) -> Vec<T> {
        match self {
            Self::Left => cells.to_vec(),
            Self::Right => reverse_rows(cells.to_vec(), size),
            Self::Up => transpose(cells, size),
            Self::Down => transpose(&reverse_rows(cells.to_vec(), size), size),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown direction name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction {0:?}, expected left, right, up or down")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

fn transpose<T: Copy>(cells: &[T], size: usize) -> Vec<T> {
    (0..cells.len())
        .map(|i| cells[(i % size) * size + i / size])
        .collect()
}

fn reverse_rows<T>(mut cells: Vec<T>, size: usize) -> Vec<T> {
    if size > 0 {
        for row in cells.chunks_mut(size) {
            row.reverse();
        }
    }
    cells
}
