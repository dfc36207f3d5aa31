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

//! Attack detection by ray and knight-offset scan.
//!
//! For a target square and a defending side, walk the 8 rays outward until
//! the first occupied square (only the nearest piece on a ray can threaten,
//! everything behind it is occluded), then test the 8 knight offsets, which
//! jump over occlusion. Every query accepts an optional [`ProposedMove`]
//! overlay so legality checks can ask "would this square be attacked after
//! the move" without touching the board.

use crate::{
    board::Board,
    color::Color,
    role::Role,
    square::Square,
    types::{Attacker, Direction, Piece, ProposedMove, UnderAttack},
};

/// Ray directions in scan order. The straight rays come first, then the
/// diagonals; checkmate analysis depends on this order when it reads the
/// single attacker of a checked king.
const RAYS: [(i8, i8, Direction); 8] = [
    (0, -1, Direction::Horizontal),
    (0, 1, Direction::Horizontal),
    (-1, 0, Direction::Vertical),
    (1, 0, Direction::Vertical),
    (1, 1, Direction::Diagonal),
    (1, -1, Direction::Diagonal),
    (-1, 1, Direction::Diagonal),
    (-1, -1, Direction::Diagonal),
];

/// The knight's eight jumps.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Walks one ray from `target` and returns the first occupied square with
/// its piece and the number of steps taken to reach it.
pub(crate) fn first_piece_along(
    board: &Board,
    target: Square,
    dr: i8,
    dc: i8,
    overlay: Option<&ProposedMove>,
) -> Option<(Square, Piece, i8)> {
    let mut step = 1;
    loop {
        let square = target.offset(dr * step, dc * step)?;
        if let Some(piece) = board.piece_considering(square, overlay) {
            return Some((square, piece, step));
        }
        step += 1;
    }
}

/// Everything attacking `target` from the side opposing `defender`, in scan
/// order, optionally after a hypothetical move.
pub fn under_attack(
    board: &Board,
    target: Square,
    defender: Color,
    overlay: Option<&ProposedMove>,
) -> UnderAttack {
    let mut result = UnderAttack::default();

    for (dr, dc, direction) in RAYS {
        let Some((square, piece, step)) = first_piece_along(board, target, dr, dc, overlay) else {
            continue;
        };
        if piece.color == defender {
            continue;
        }
        let threatens = match direction {
            Direction::Horizontal | Direction::Vertical => {
                matches!(piece.role, Role::Rook | Role::Queen)
            }
            Direction::Diagonal => match piece.role {
                Role::Bishop | Role::Queen => true,
                // A pawn threatens diagonally from one step in the row it
                // advances towards, so from the defender's forward side.
                Role::Pawn => step == 1 && dr == defender.forward(),
                _ => false,
            },
            Direction::Knight => false,
        };
        if threatens {
            // More attackers than the list holds requires a position no
            // game can reach; extras are dropped rather than panicking.
            let _ = result.attackers.try_push(Attacker { square, direction });
        }
    }

    for (dr, dc) in KNIGHT_OFFSETS {
        let Some(square) = target.offset(dr, dc) else {
            continue;
        };
        match board.piece_considering(square, overlay) {
            Some(piece) if piece.color != defender && piece.role == Role::Knight => {
                let _ = result.attackers.try_push(Attacker {
                    square,
                    direction: Direction::Knight,
                });
            }
            _ => (),
        }
    }

    result
}

/// Whether the king of `color` stands on an attacked square, optionally
/// after a hypothetical move. If the move itself relocates that king, its
/// destination is tested instead of its current square.
pub fn king_in_check(board: &Board, color: Color, overlay: Option<&ProposedMove>) -> bool {
    let king = match overlay {
        Some(mv) if mv.piece.role == Role::King && mv.piece.color == color => Some(mv.to),
        _ => board.find_king(color),
    };
    king.map_or(false, |square| {
        under_attack(board, square, color, overlay).is_attacked()
    })
}
