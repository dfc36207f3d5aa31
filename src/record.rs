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

//! The move log: one record per applied move, grouped into rounds.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{role::Role, square::Square};

/// One applied move as it goes into the log.
///
/// Records only origin, destination and the promotion choice; everything
/// else about the move can be rederived by replaying.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Role>,
}

impl MoveRecord {
    pub fn new(from: Square, to: Square, promotion: Option<Role>) -> MoveRecord {
        MoveRecord { from, to, promotion }
    }
}

impl fmt::Display for MoveRecord {
    /// Formats like `E2-E4`, with a `=Q` suffix for promotions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "={}", role.upper_char())?;
        }
        Ok(())
    }
}

/// One full round: white's move and, once played, black's reply.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Round {
    pub white: Option<MoveRecord>,
    pub black: Option<MoveRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square;

    #[test]
    fn test_record_display() {
        let plain = MoveRecord::new(square::E2, square::E4, None);
        assert_eq!(plain.to_string(), "E2-E4");

        let promoting = MoveRecord::new(square::E7, square::E8, Some(Role::Queen));
        assert_eq!(promoting.to_string(), "E7-E8=Q");
    }

    #[test]
    fn test_record_json_round_trip() {
        let record = MoveRecord::new(square::G1, square::F3, None);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("promotion"));
        assert_eq!(serde_json::from_str::<MoveRecord>(&json).unwrap(), record);
    }
}
