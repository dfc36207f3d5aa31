// This file is part of the shatranj library.
// Copyright (C) 2026 The shatranj developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use core::fmt;
use std::error::Error;

use serde::{Deserialize, Serialize};

/// Number of rows and columns on the board.
pub const BOARD_SIZE: i8 = 8;

/// Error when a (row, column) pair is outside the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidSquareError;

impl fmt::Display for InvalidSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("row and column must be in the range 0..8")
    }
}

impl Error for InvalidSquareError {}

/// A board coordinate with row and column each in `0..8`.
///
/// Row 0 is white's back row (rank 1), column 0 is file A. Values outside
/// the board are rejected at construction, so every `Square` held by the
/// engine is addressable.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
#[serde(into = "(i8, i8)", try_from = "(i8, i8)")]
pub struct Square {
    row: i8,
    col: i8,
}

impl Square {
    /// Constructs a square from known-valid coordinates.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `row` or `col` is outside `0..8`. Use
    /// [`Square::from_coords`] for values that originate outside the engine.
    #[inline]
    pub fn new(row: i8, col: i8) -> Square {
        debug_assert!(0 <= row && row < BOARD_SIZE);
        debug_assert!(0 <= col && col < BOARD_SIZE);
        Square { row, col }
    }

    /// Constructs a square, or `None` when the coordinates are off the board.
    #[inline]
    pub fn from_coords(row: i8, col: i8) -> Option<Square> {
        if 0 <= row && row < BOARD_SIZE && 0 <= col && col < BOARD_SIZE {
            Some(Square { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub fn row(self) -> i8 {
        self.row
    }

    #[inline]
    pub fn col(self) -> i8 {
        self.col
    }

    /// The row-major index of this square, in `0..64`.
    #[inline]
    pub fn index(self) -> usize {
        (self.row * BOARD_SIZE + self.col) as usize
    }

    /// Steps by the given row and column deltas, or `None` when the result
    /// leaves the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        Square::from_coords(self.row + dr, self.col + dc)
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }
}

impl From<Square> for (i8, i8) {
    #[inline]
    fn from(sq: Square) -> (i8, i8) {
        (sq.row, sq.col)
    }
}

impl TryFrom<(i8, i8)> for Square {
    type Error = InvalidSquareError;

    #[inline]
    fn try_from((row, col): (i8, i8)) -> Result<Square, InvalidSquareError> {
        Square::from_coords(row, col).ok_or(InvalidSquareError)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'A' + self.col as u8) as char,
            (b'1' + self.row as u8) as char
        )
    }
}

macro_rules! squares {
    ($($name:ident => ($row:expr, $col:expr),)+) => {
        $(pub const $name: Square = Square { row: $row, col: $col };)+
    }
}

squares! {
    A1 => (0, 0), B1 => (0, 1), C1 => (0, 2), D1 => (0, 3),
    E1 => (0, 4), F1 => (0, 5), G1 => (0, 6), H1 => (0, 7),
    A2 => (1, 0), B2 => (1, 1), C2 => (1, 2), D2 => (1, 3),
    E2 => (1, 4), F2 => (1, 5), G2 => (1, 6), H2 => (1, 7),
    A3 => (2, 0), B3 => (2, 1), C3 => (2, 2), D3 => (2, 3),
    E3 => (2, 4), F3 => (2, 5), G3 => (2, 6), H3 => (2, 7),
    A4 => (3, 0), B4 => (3, 1), C4 => (3, 2), D4 => (3, 3),
    E4 => (3, 4), F4 => (3, 5), G4 => (3, 6), H4 => (3, 7),
    A5 => (4, 0), B5 => (4, 1), C5 => (4, 2), D5 => (4, 3),
    E5 => (4, 4), F5 => (4, 5), G5 => (4, 6), H5 => (4, 7),
    A6 => (5, 0), B6 => (5, 1), C6 => (5, 2), D6 => (5, 3),
    E6 => (5, 4), F6 => (5, 5), G6 => (5, 6), H6 => (5, 7),
    A7 => (6, 0), B7 => (6, 1), C7 => (6, 2), D7 => (6, 3),
    E7 => (6, 4), F7 => (6, 5), G7 => (6, 6), H7 => (6, 7),
    A8 => (7, 0), B8 => (7, 1), C8 => (7, 2), D8 => (7, 3),
    E8 => (7, 4), F8 => (7, 5), G8 => (7, 6), H8 => (7, 7),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coords() {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::from_coords(row, col).unwrap();
                assert_eq!(sq.row(), row);
                assert_eq!(sq.col(), col);
            }
        }

        assert_eq!(Square::from_coords(-1, 0), None);
        assert_eq!(Square::from_coords(0, -1), None);
        assert_eq!(Square::from_coords(8, 0), None);
        assert_eq!(Square::from_coords(0, 8), None);
    }

    #[test]
    fn test_offset() {
        assert_eq!(E2.offset(2, 0), Some(E4));
        assert_eq!(A1.offset(-1, 0), None);
        assert_eq!(H8.offset(0, 1), None);
    }

    #[test]
    fn test_index_row_major() {
        assert_eq!(A1.index(), 0);
        assert_eq!(H1.index(), 7);
        assert_eq!(A2.index(), 8);
        assert_eq!(H8.index(), 63);
    }

    #[test]
    fn test_display() {
        assert_eq!(E2.to_string(), "E2");
        assert_eq!(H8.to_string(), "H8");
    }

    #[test]
    fn test_all_restartable() {
        assert_eq!(Square::all().count(), 64);
        assert_eq!(Square::all().next(), Some(A1));
        assert_eq!(Square::all().last(), Some(H8));
    }
}
