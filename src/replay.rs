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

//! Saving and restoring games through the move log.
//!
//! A saved game is just the ordered round history plus the captured-piece
//! lists. Restoring replays every record through the identical
//! validate-then-apply path used for live play, so a tampered or corrupt
//! save surfaces as a typed error instead of an inconsistent position.

use core::fmt;
use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::{game::Game, record::Round, types::Piece, validate::MoveError};

/// The serializable form of a finished or in-progress game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub rounds: Vec<Round>,
    /// White pieces captured by black.
    #[serde(default)]
    pub white_captured: Vec<Piece>,
    /// Black pieces captured by white.
    #[serde(default)]
    pub black_captured: Vec<Piece>,
}

impl SavedGame {
    pub fn from_game(game: &Game) -> SavedGame {
        SavedGame {
            rounds: game.rounds().to_vec(),
            white_captured: game.white_captured().to_vec(),
            black_captured: game.black_captured().to_vec(),
        }
    }
}

impl From<&Game> for SavedGame {
    fn from(game: &Game) -> SavedGame {
        SavedGame::from_game(game)
    }
}

/// Why a saved game could not be restored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReplayError {
    /// A logged move was rejected by validation. `ply` counts from 1.
    IllegalMove { ply: usize, source: MoveError },
    /// The replayed captures disagree with the saved captured lists.
    CapturedMismatch,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::IllegalMove { ply, source } => {
                write!(f, "illegal move at ply {ply}: {source}")
            }
            ReplayError::CapturedMismatch => {
                f.write_str("captured pieces do not match the move history")
            }
        }
    }
}

impl Error for ReplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReplayError::IllegalMove { source, .. } => Some(source),
            ReplayError::CapturedMismatch => None,
        }
    }
}

impl Game {
    /// Rebuilds a game from a save by replaying its history from the
    /// standard starting position.
    pub fn replay(saved: &SavedGame) -> Result<Game, ReplayError> {
        let mut game = Game::new();
        let records = saved
            .rounds
            .iter()
            .flat_map(|round| [round.white, round.black])
            .flatten();
        for (index, record) in records.enumerate() {
            game.play(record.from, record.to, record.promotion)
                .map_err(|source| ReplayError::IllegalMove {
                    ply: index + 1,
                    source,
                })?;
        }
        if game.white_captured() != saved.white_captured
            || game.black_captured() != saved.black_captured
        {
            return Err(ReplayError::CapturedMismatch);
        }
        Ok(game)
    }
}
