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

//! Move legality: per-piece geometry, castling, en passant and promotion.
//!
//! Validation never mutates anything. Hypothetical questions ("would the
//! king be safe after this") go through the board overlay, and an accepted
//! move comes back as a [`ValidMove`] carrying everything application
//! needs: the en passant capture square, the rook's relocation when
//! castling, and the promoted piece.

use core::fmt;
use std::error::Error;

use crate::{
    attacks,
    board::Board,
    game::Game,
    role::Role,
    square::Square,
    types::{CastlingSide, Direction, Piece, ProposedMove},
};

/// Why a proposed move was rejected.
///
/// A rejected move leaves the game completely unmodified.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MoveError {
    /// The game already ended by checkmate.
    GameFinished,
    /// There is no piece on the origin square.
    EmptySquare,
    /// The piece on the origin square belongs to the other player.
    WrongTurn,
    /// The displacement is not one this piece can ever make.
    IllegalGeometry,
    /// A piece stands between origin and destination (or ahead of a pawn).
    BlockedPath,
    /// The destination holds a piece of the moving side.
    OwnPieceAtDestination,
    /// The move would leave the mover's own king attacked.
    WouldExposeKing,
    /// Castling while the king is in check.
    KingInCheck,
    /// Castling on a side whose right was revoked.
    CastlingRightRevoked { side: CastlingSide },
    /// Castling with no rook of the moving side on its home square.
    CastlingRookMissing,
    /// The square the castling king passes through is attacked.
    CastlingPathAttacked,
    /// A diagonal pawn move onto an empty square with no en passant right.
    NotEligibleForEnPassant,
    /// A pawn reached the far rank without a replacement piece supplied.
    MissingPromotion,
    /// The supplied replacement piece is not a knight, bishop, rook or queen.
    InvalidPromotion,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveError::GameFinished => "the game is already finished",
            MoveError::EmptySquare => "no piece on the origin square",
            MoveError::WrongTurn => "piece belongs to the other player",
            MoveError::IllegalGeometry => "piece cannot move that way",
            MoveError::BlockedPath => "path to the destination is blocked",
            MoveError::OwnPieceAtDestination => "own piece on the destination square",
            MoveError::WouldExposeKing => "move would leave the king in check",
            MoveError::KingInCheck => "cannot castle while in check",
            MoveError::CastlingRightRevoked { side: CastlingSide::KingSide } => {
                "king side castling right was revoked"
            }
            MoveError::CastlingRightRevoked { side: CastlingSide::QueenSide } => {
                "queen side castling right was revoked"
            }
            MoveError::CastlingRookMissing => "no rook on its home square to castle with",
            MoveError::CastlingPathAttacked => "king would castle through an attacked square",
            MoveError::NotEligibleForEnPassant => "en passant capture is not available",
            MoveError::MissingPromotion => "promotion requires a replacement piece",
            MoveError::InvalidPromotion => "invalid replacement piece for promotion",
        })
    }
}

impl Error for MoveError {}

/// The rook half of a castling move.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CastleRook {
    pub from: Square,
    pub to: Square,
}

/// An accepted move with the descriptors application needs.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ValidMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// The square of the pawn captured en passant, which differs from `to`.
    pub en_passant: Option<Square>,
    pub castle: Option<CastleRook>,
    /// The piece the pawn turns into on the far rank.
    pub promotion: Option<Piece>,
}

impl ValidMove {
    fn plain(piece: Piece, from: Square, to: Square) -> ValidMove {
        ValidMove {
            piece,
            from,
            to,
            en_passant: None,
            castle: None,
            promotion: None,
        }
    }
}

/// Whether every square strictly between `from` and `to` is empty, walking
/// along `direction`. Knight moves jump and are never blocked.
pub fn is_path_free(board: &Board, from: Square, to: Square, direction: Direction) -> bool {
    if direction == Direction::Knight {
        return true;
    }
    let dr = (to.row() - from.row()).signum();
    let dc = (to.col() - from.col()).signum();
    let mut square = from;
    loop {
        square = match square.offset(dr, dc) {
            Some(next) => next,
            None => return false,
        };
        if square == to {
            return true;
        }
        if board.piece_at(square).is_some() {
            return false;
        }
    }
}

/// Validates `from -> to` for the side to move and fills in the
/// descriptors the move needs. Rejections carry a typed reason and leave
/// the game untouched.
pub fn validate_move(
    game: &Game,
    from: Square,
    to: Square,
    promotion: Option<Role>,
) -> Result<ValidMove, MoveError> {
    let piece = game.piece_at(from).ok_or(MoveError::EmptySquare)?;
    if piece.color != game.current_turn() {
        return Err(MoveError::WrongTurn);
    }

    let mut valid = match piece.role {
        Role::Pawn => validate_pawn(game, piece, from, to)?,
        Role::Rook => validate_ray(game, piece, from, to, StraightOrDiagonal::Straight)?,
        Role::Bishop => validate_ray(game, piece, from, to, StraightOrDiagonal::Diagonal)?,
        Role::Queen => validate_ray(game, piece, from, to, StraightOrDiagonal::Either)?,
        Role::Knight => validate_knight(piece, from, to)?,
        Role::King => validate_king(game, piece, from, to)?,
    };

    if let Some(target) = game.piece_at(to) {
        if target.color == piece.color {
            return Err(MoveError::OwnPieceAtDestination);
        }
    }

    if piece.role == Role::Pawn && to.row() == piece.color.promotion_row() {
        let role = promotion.ok_or(MoveError::MissingPromotion)?;
        if !role.is_valid_promotion() {
            return Err(MoveError::InvalidPromotion);
        }
        valid.promotion = Some(role.of(piece.color));
    }

    // The king must be safe once this exact move is overlaid. The overlay
    // relocates only the moving piece, so a pawn taken en passant still
    // reads as present here.
    let overlay = ProposedMove { piece, from, to };
    if attacks::king_in_check(game.board(), piece.color, Some(&overlay)) {
        return Err(MoveError::WouldExposeKing);
    }

    Ok(valid)
}

enum StraightOrDiagonal {
    Straight,
    Diagonal,
    Either,
}

fn validate_ray(
    game: &Game,
    piece: Piece,
    from: Square,
    to: Square,
    allowed: StraightOrDiagonal,
) -> Result<ValidMove, MoveError> {
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();

    let straight = (dr == 0) != (dc == 0);
    let diagonal = dr != 0 && dr.abs() == dc.abs();
    let direction = match allowed {
        StraightOrDiagonal::Straight if straight => straight_direction(dr),
        StraightOrDiagonal::Diagonal if diagonal => Direction::Diagonal,
        StraightOrDiagonal::Either if straight => straight_direction(dr),
        StraightOrDiagonal::Either if diagonal => Direction::Diagonal,
        _ => return Err(MoveError::IllegalGeometry),
    };

    if !is_path_free(game.board(), from, to, direction) {
        return Err(MoveError::BlockedPath);
    }
    Ok(ValidMove::plain(piece, from, to))
}

fn straight_direction(dr: i8) -> Direction {
    if dr == 0 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    }
}

fn validate_knight(piece: Piece, from: Square, to: Square) -> Result<ValidMove, MoveError> {
    let dr = (to.row() - from.row()).abs();
    let dc = (to.col() - from.col()).abs();
    if (dr, dc) == (1, 2) || (dr, dc) == (2, 1) {
        Ok(ValidMove::plain(piece, from, to))
    } else {
        Err(MoveError::IllegalGeometry)
    }
}

fn validate_pawn(
    game: &Game,
    piece: Piece,
    from: Square,
    to: Square,
) -> Result<ValidMove, MoveError> {
    let forward = piece.color.forward();
    let start_row = piece.color.back_row() + forward;
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();

    if dc == 0 {
        // Straight moves never capture, not even onto an enemy piece.
        if dr == forward {
            if game.piece_at(to).is_some() {
                return Err(MoveError::BlockedPath);
            }
            return Ok(ValidMove::plain(piece, from, to));
        }
        if dr == 2 * forward && from.row() == start_row {
            if !is_path_free(game.board(), from, to, Direction::Vertical)
                || game.piece_at(to).is_some()
            {
                return Err(MoveError::BlockedPath);
            }
            return Ok(ValidMove::plain(piece, from, to));
        }
        return Err(MoveError::IllegalGeometry);
    }

    if dc.abs() == 1 && dr == forward {
        if game.piece_at(to).is_some() {
            // Same-side occupants are rejected by the uniform check later.
            return Ok(ValidMove::plain(piece, from, to));
        }
        // Diagonal onto an empty square is only ever en passant: the pawn
        // to capture sits beside the mover, and the directly preceding
        // move must have been that exact pawn's two-step advance.
        let victim_square = Square::from_coords(from.row(), to.col())
            .ok_or(MoveError::NotEligibleForEnPassant)?;
        let last = game.last_move().ok_or(MoveError::NotEligibleForEnPassant)?;
        let victim = game.piece_at(victim_square);
        let eligible = last.to == victim_square
            && last.to.col() == to.col()
            && (last.from.row() - last.to.row()).abs() == 2
            && victim == Some(Role::Pawn.of(!piece.color));
        if !eligible {
            return Err(MoveError::NotEligibleForEnPassant);
        }
        let mut valid = ValidMove::plain(piece, from, to);
        valid.en_passant = Some(victim_square);
        return Ok(valid);
    }

    Err(MoveError::IllegalGeometry)
}

fn validate_king(
    game: &Game,
    piece: Piece,
    from: Square,
    to: Square,
) -> Result<ValidMove, MoveError> {
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();

    if (dr != 0 || dc != 0) && dr.abs() <= 1 && dc.abs() <= 1 {
        return Ok(ValidMove::plain(piece, from, to));
    }

    if dr == 0 && dc.abs() == 2 {
        return validate_castling(game, piece, from, to, dc);
    }

    Err(MoveError::IllegalGeometry)
}

fn validate_castling(
    game: &Game,
    piece: Piece,
    from: Square,
    to: Square,
    dc: i8,
) -> Result<ValidMove, MoveError> {
    let side = if dc > 0 {
        CastlingSide::KingSide
    } else {
        CastlingSide::QueenSide
    };

    if game.player_king_in_check() {
        return Err(MoveError::KingInCheck);
    }

    let rook_square = Square::from_coords(from.row(), side.rook_col())
        .ok_or(MoveError::IllegalGeometry)?;
    // A revoked right usually covers this, but a rook captured on its home
    // square never moved; castling must still find it there.
    if game.piece_at(rook_square) != Some(piece.color.rook()) {
        return Err(MoveError::CastlingRookMissing);
    }
    if !is_path_free(game.board(), from, rook_square, Direction::Horizontal) {
        return Err(MoveError::BlockedPath);
    }

    if !game.castling_allowed(side, piece.color) {
        return Err(MoveError::CastlingRightRevoked { side });
    }

    // The square the king passes through, which is also where the rook
    // lands. The destination itself is covered by the king safety check.
    let transit = from
        .offset(0, dc.signum())
        .ok_or(MoveError::IllegalGeometry)?;
    if attacks::under_attack(game.board(), transit, piece.color, None).is_attacked() {
        return Err(MoveError::CastlingPathAttacked);
    }

    let mut valid = ValidMove::plain(piece, from, to);
    valid.castle = Some(CastleRook {
        from: rook_square,
        to: transit,
    });
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::pieces::*, color::Color, game::Game, square};

    #[test]
    fn test_wrong_turn_and_empty_square() {
        let game = Game::new();
        assert_eq!(
            validate_move(&game, square::E4, square::E5, None),
            Err(MoveError::EmptySquare)
        );
        assert_eq!(
            validate_move(&game, square::E7, square::E5, None),
            Err(MoveError::WrongTurn)
        );
    }

    #[test]
    fn test_pawn_steps() {
        let game = Game::new();
        assert!(validate_move(&game, square::E2, square::E3, None).is_ok());
        assert!(validate_move(&game, square::E2, square::E4, None).is_ok());
        // Double step only from the starting rank, no sideways, no triple.
        assert_eq!(
            validate_move(&game, square::E2, square::E5, None),
            Err(MoveError::IllegalGeometry)
        );
        assert_eq!(
            validate_move(&game, square::E2, square::D3, None),
            Err(MoveError::NotEligibleForEnPassant)
        );
    }

    #[test]
    fn test_pawn_never_captures_straight() {
        let mut board = Board::default();
        board.set_piece_at(square::E4, WP);
        board.set_piece_at(square::E5, BP);
        let game = Game::from_board(board, Color::White);
        assert_eq!(
            validate_move(&game, square::E4, square::E5, None),
            Err(MoveError::BlockedPath)
        );
    }

    #[test]
    fn test_sliding_pieces_respect_occlusion() {
        let game = Game::new();
        // The A1 rook is boxed in at the start.
        assert_eq!(
            validate_move(&game, square::A1, square::A3, None),
            Err(MoveError::BlockedPath)
        );
        assert_eq!(
            validate_move(&game, square::C1, square::E3, None),
            Err(MoveError::BlockedPath)
        );
        // Knights jump over the pawn wall.
        assert!(validate_move(&game, square::B1, square::C3, None).is_ok());
        assert_eq!(
            validate_move(&game, square::B1, square::B3, None),
            Err(MoveError::IllegalGeometry)
        );
    }

    #[test]
    fn test_own_piece_at_destination() {
        let game = Game::new();
        assert_eq!(
            validate_move(&game, square::D1, square::D2, None),
            Err(MoveError::OwnPieceAtDestination)
        );
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let mut board = Board::empty();
        board.set_piece_at(square::E1, WK);
        board.set_piece_at(square::E2, WB);
        board.set_piece_at(square::E8, BR);
        board.set_piece_at(square::A8, BK);
        let game = Game::from_board(board, Color::White);
        assert_eq!(
            validate_move(&game, square::E2, square::D3, None),
            Err(MoveError::WouldExposeKing)
        );
    }

    #[test]
    fn test_promotion_inputs() {
        let mut board = Board::empty();
        board.set_piece_at(square::A7, WP);
        board.set_piece_at(square::E1, WK);
        board.set_piece_at(square::E8, BK);
        let game = Game::from_board(board, Color::White);
        assert_eq!(
            validate_move(&game, square::A7, square::A8, None),
            Err(MoveError::MissingPromotion)
        );
        assert_eq!(
            validate_move(&game, square::A7, square::A8, Some(Role::King)),
            Err(MoveError::InvalidPromotion)
        );
        let valid = validate_move(&game, square::A7, square::A8, Some(Role::Queen));
        assert_eq!(
            valid.map(|v| v.promotion),
            Ok(Some(Role::Queen.of(Color::White)))
        );
    }

    #[test]
    fn test_castling_descriptor() {
        let mut board = Board::empty();
        board.set_piece_at(square::E1, WK);
        board.set_piece_at(square::A1, WR);
        board.set_piece_at(square::H1, WR);
        board.set_piece_at(square::E8, BK);
        let game = Game::from_board(board, Color::White);

        let king_side = validate_move(&game, square::E1, square::G1, None).unwrap();
        assert_eq!(
            king_side.castle,
            Some(CastleRook { from: square::H1, to: square::F1 })
        );
        let queen_side = validate_move(&game, square::E1, square::C1, None).unwrap();
        assert_eq!(
            queen_side.castle,
            Some(CastleRook { from: square::A1, to: square::D1 })
        );
    }

    #[test]
    fn test_castling_requires_the_rook_at_home() {
        let mut board = Board::empty();
        board.set_piece_at(square::E1, WK);
        board.set_piece_at(square::E8, BK);
        let game = Game::from_board(board, Color::White);
        assert_eq!(
            validate_move(&game, square::E1, square::G1, None),
            Err(MoveError::CastlingRookMissing)
        );

        // An enemy piece that captured the rook does not stand in for it.
        let mut taken = board;
        taken.set_piece_at(square::H1, BB);
        let game = Game::from_board(taken, Color::White);
        assert_eq!(
            validate_move(&game, square::E1, square::G1, None),
            Err(MoveError::CastlingRookMissing)
        );
    }

    #[test]
    fn test_castling_rejections() {
        let mut board = Board::empty();
        board.set_piece_at(square::E1, WK);
        board.set_piece_at(square::H1, WR);
        board.set_piece_at(square::E8, BK);

        // A rook eyeing the transit square.
        let mut attacked = board;
        attacked.set_piece_at(square::F8, BR);
        let game = Game::from_board(attacked, Color::White);
        assert_eq!(
            validate_move(&game, square::E1, square::G1, None),
            Err(MoveError::CastlingPathAttacked)
        );

        // A check on the king itself.
        let mut checked = board;
        checked.set_piece_at(square::E7, BR);
        let game = Game::from_board(checked, Color::White);
        assert_eq!(
            validate_move(&game, square::E1, square::G1, None),
            Err(MoveError::KingInCheck)
        );

        // A piece between king and rook.
        let mut blocked = board;
        blocked.set_piece_at(square::G1, WN);
        let game = Game::from_board(blocked, Color::White);
        assert_eq!(
            validate_move(&game, square::E1, square::G1, None),
            Err(MoveError::BlockedPath)
        );
    }
}
