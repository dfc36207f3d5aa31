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

//! A rules engine for two-player chess.
//!
//! # Features
//!
//! - Mailbox [`Board`] with constant-time hypothetical reads through a
//!   [`ProposedMove`] overlay, so legality questions never copy or mutate
//!   the position.
//! - [Attack analysis](attacks) by occlusion-aware ray scan and knight
//!   offsets, reporting every attacker of a square with its direction.
//! - Full move validation with typed rejections ([`MoveError`]), including
//!   castling, en passant and promotion.
//! - [`Game`] state with turn management, move history in rounds,
//!   captured-piece lists, single-level undo and checkmate detection.
//! - Saving and replaying games through the move log ([`SavedGame`]),
//!   re-entering the same validation path as live play.
//!
//! # Example: the fastest possible checkmate
//!
//! ```
//! use shatranj::{square, Game, MoveOutcome};
//!
//! let mut game = Game::new();
//! game.play(square::F2, square::F3, None)?;
//! game.play(square::E7, square::E5, None)?;
//! game.play(square::G2, square::G4, None)?;
//! let outcome = game.play(square::D8, square::H4, None)?;
//!
//! assert_eq!(outcome, MoveOutcome::Checkmate);
//! assert!(game.is_finished());
//! # Ok::<_, shatranj::MoveError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod attacks;
pub mod board;
pub mod square;

mod color;
mod game;
mod record;
mod replay;
mod role;
mod types;
mod validate;

pub use crate::{
    board::Board,
    color::{ByColor, Color},
    game::{Game, MoveOutcome},
    record::{MoveRecord, Round},
    replay::{ReplayError, SavedGame},
    role::Role,
    square::{InvalidSquareError, Square},
    types::{
        Attacker, AttackerList, CastlingRights, CastlingSide, Direction, Piece, ProposedMove,
        UnderAttack,
    },
    validate::{validate_move, CastleRook, MoveError, ValidMove},
};
