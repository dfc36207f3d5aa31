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

//! The mailbox board: 64 squares, each empty or holding a piece.

use core::fmt;
use core::fmt::Write as _;

use crate::{
    color::Color,
    role::Role,
    square::{Square, BOARD_SIZE},
    types::{Piece, ProposedMove},
};

/// Shorthand piece constants for building board layouts.
pub mod pieces {
    use crate::{color::Color, role::Role, types::Piece};

    pub const EMPTY: Option<Piece> = None;
    pub const WP: Option<Piece> = Some(Piece { color: Color::White, role: Role::Pawn });
    pub const WN: Option<Piece> = Some(Piece { color: Color::White, role: Role::Knight });
    pub const WB: Option<Piece> = Some(Piece { color: Color::White, role: Role::Bishop });
    pub const WR: Option<Piece> = Some(Piece { color: Color::White, role: Role::Rook });
    pub const WQ: Option<Piece> = Some(Piece { color: Color::White, role: Role::Queen });
    pub const WK: Option<Piece> = Some(Piece { color: Color::White, role: Role::King });
    pub const BP: Option<Piece> = Some(Piece { color: Color::Black, role: Role::Pawn });
    pub const BN: Option<Piece> = Some(Piece { color: Color::Black, role: Role::Knight });
    pub const BB: Option<Piece> = Some(Piece { color: Color::Black, role: Role::Bishop });
    pub const BR: Option<Piece> = Some(Piece { color: Color::Black, role: Role::Rook });
    pub const BQ: Option<Piece> = Some(Piece { color: Color::Black, role: Role::Queen });
    pub const BK: Option<Piece> = Some(Piece { color: Color::Black, role: Role::King });
}

/// Piece positions on a board.
///
/// Squares are stored row major, row 0 being white's back row. A
/// [`ProposedMove`] can overlay any read to answer "what if this piece
/// stood there" without mutating the board.
///
/// # Examples
///
/// ```
/// use shatranj::{Board, square};
///
/// let board = Board::default(); // starting position
/// let piece = board.piece_at(square::E1).unwrap();
/// ```
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// An entirely empty board.
    pub const fn empty() -> Board {
        Board { squares: [None; 64] }
    }

    /// Builds a board from a row-major array, row 0 first.
    pub const fn from_array(squares: [Option<Piece>; 64]) -> Board {
        Board { squares }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    #[inline]
    pub fn set_piece_at(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// Reads a square as if `overlay` had been played: the origin reads
    /// empty and the destination reads the moved piece. Everything else,
    /// including the overlay's captured piece on any other square, reads
    /// from the board unchanged.
    pub fn piece_considering(
        &self,
        square: Square,
        overlay: Option<&ProposedMove>,
    ) -> Option<Piece> {
        match overlay {
            Some(mv) if mv.from == square => None,
            Some(mv) if mv.to == square => Some(mv.piece),
            _ => self.piece_at(square),
        }
    }

    /// All 64 squares with their contents, row major from row 0.
    pub fn squares(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::all().map(move |sq| (sq, self.piece_at(sq)))
    }

    /// The square of the king of `color`, if it is on the board.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.squares().find_map(|(sq, piece)| match piece {
            Some(p) if p.role == Role::King && p.color == color => Some(sq),
            _ => None,
        })
    }
}

impl Default for Board {
    fn default() -> Board {
        use pieces::*;

        #[rustfmt::skip]
        let squares = [
            WR, WN, WB, WQ, WK, WB, WN, WR,
            WP, WP, WP, WP, WP, WP, WP, WP,
            EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY,
            EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY,
            EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY,
            EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY,
            BP, BP, BP, BP, BP, BP, BP, BP,
            BR, BN, BB, BQ, BK, BB, BN, BR,
        ];
        Board { squares }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            for col in 0..BOARD_SIZE {
                let square = Square::from_coords(row, col).ok_or(fmt::Error)?;
                f.write_char(self.piece_at(square).map_or('.', Piece::char))?;
                if col < BOARD_SIZE - 1 {
                    f.write_char(' ')?;
                }
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square;

    #[test]
    fn test_initial_layout() {
        let board = Board::default();
        assert_eq!(board.piece_at(square::A1), pieces::WR);
        assert_eq!(board.piece_at(square::E1), pieces::WK);
        assert_eq!(board.piece_at(square::D8), pieces::BQ);
        assert_eq!(board.piece_at(square::H7), pieces::BP);
        assert_eq!(board.piece_at(square::E4), None);
    }

    #[test]
    fn test_overlay_reads() {
        let board = Board::default();
        let mv = ProposedMove {
            piece: Color::White.pawn(),
            from: square::E2,
            to: square::E4,
        };
        assert_eq!(board.piece_considering(square::E2, Some(&mv)), None);
        assert_eq!(
            board.piece_considering(square::E4, Some(&mv)),
            Some(Color::White.pawn())
        );
        // Unrelated squares read through.
        assert_eq!(
            board.piece_considering(square::D1, Some(&mv)),
            Some(Color::White.queen())
        );
        // The board itself is untouched.
        assert_eq!(board.piece_at(square::E4), None);
    }

    #[test]
    fn test_find_king() {
        let board = Board::default();
        assert_eq!(board.find_king(Color::White), Some(square::E1));
        assert_eq!(board.find_king(Color::Black), Some(square::E8));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }
}
