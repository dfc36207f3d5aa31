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

use arrayvec::ArrayVec;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::{color::Color, role::Role, square::Square};

/// A piece with [`Color`] and [`Role`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// The English letter for the piece, uppercase for white.
    pub fn char(self) -> char {
        self.color
            .fold(self.role.upper_char(), self.role.char())
    }
}

/// A proposed, unapplied move used to answer "what if" queries without
/// mutating the board.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ProposedMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

/// The line along which a piece moves or attacks.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    Diagonal,
    /// The knight's jump; not a ray and never occluded.
    Knight,
}

/// A single piece threatening a square, with the line of attack.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Attacker {
    pub square: Square,
    pub direction: Direction,
}

/// Nine is the theoretical maximum number of simultaneous attackers of one
/// square.
pub type AttackerList = ArrayVec<Attacker, 9>;

/// The attackers of a square, in fixed scan order: the horizontal rays, the
/// vertical rays, the diagonal rays, then the knight offsets.
///
/// Checkmate analysis relies on that order when it inspects the single
/// attacker of a checked king.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct UnderAttack {
    pub attackers: AttackerList,
}

impl UnderAttack {
    #[inline]
    pub fn is_attacked(&self) -> bool {
        !self.attackers.is_empty()
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.attackers.len()
    }
}

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    /// The starting column of the rook on this side.
    #[inline]
    pub const fn rook_col(self) -> i8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

bitflags! {
    /// Castling rights still held by either side.
    ///
    /// During play rights are only ever revoked; undoing the most recent
    /// move restores the snapshot taken before it.
    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    pub struct CastlingRights: u8 {
        const WHITE_KING_SIDE = 1;
        const WHITE_QUEEN_SIDE = 1 << 1;
        const BLACK_KING_SIDE = 1 << 2;
        const BLACK_QUEEN_SIDE = 1 << 3;
    }
}

impl CastlingRights {
    /// The single flag for one side of the board and one color.
    pub fn flag(color: Color, side: CastlingSide) -> CastlingRights {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => CastlingRights::WHITE_KING_SIDE,
            (Color::White, CastlingSide::QueenSide) => CastlingRights::WHITE_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => CastlingRights::BLACK_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => CastlingRights::BLACK_QUEEN_SIDE,
        }
    }

    /// Both flags of one color.
    pub fn both(color: Color) -> CastlingRights {
        CastlingRights::flag(color, CastlingSide::KingSide)
            | CastlingRights::flag(color, CastlingSide::QueenSide)
    }
}

impl Default for CastlingRights {
    fn default() -> CastlingRights {
        CastlingRights::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char() {
        assert_eq!(Color::White.queen().char(), 'Q');
        assert_eq!(Color::Black.knight().char(), 'n');
    }

    #[test]
    fn test_castling_rights_flags() {
        let mut rights = CastlingRights::default();
        assert!(rights.contains(CastlingRights::flag(Color::White, CastlingSide::KingSide)));

        rights.remove(CastlingRights::both(Color::White));
        assert!(!rights.contains(CastlingRights::WHITE_KING_SIDE));
        assert!(!rights.contains(CastlingRights::WHITE_QUEEN_SIDE));
        assert!(rights.contains(CastlingRights::BLACK_KING_SIDE));
    }
}
