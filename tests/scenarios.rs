use shatranj::{
    square, CastlingSide, Color, Direction, Game, MoveError, MoveOutcome, Role, SavedGame,
    Square,
};

#[test]
fn opening_pawns() {
    let mut game = Game::new();

    // The double step is accepted from the starting rank.
    assert_eq!(game.play(square::E2, square::E4, None), Ok(MoveOutcome::Ongoing));
    assert_eq!(game.play(square::E7, square::E5, None), Ok(MoveOutcome::Ongoing));

    // Straight ahead is occupied: pawns never capture straight.
    assert_eq!(
        game.play(square::E4, square::E5, None),
        Err(MoveError::BlockedPath)
    );

    // No pawn ever double-stepped past E4, so there is nothing to take
    // en passant either.
    assert_eq!(
        game.play(square::E4, square::D5, None),
        Err(MoveError::NotEligibleForEnPassant)
    );
}

#[test]
fn castling_both_sides() {
    let mut game = Game::new();
    // Clear the king side for white and the queen side for black.
    for (from, to) in [
        (square::G1, square::F3),
        (square::B8, square::C6),
        (square::E2, square::E3),
        (square::D7, square::D6),
        (square::F1, square::E2),
        (square::C8, square::E6),
        (square::B2, square::B3),
        (square::D8, square::D7),
    ] {
        game.play(from, to, None).unwrap();
    }

    assert!(game.castling_allowed(CastlingSide::KingSide, Color::White));
    assert_eq!(game.play(square::E1, square::G1, None), Ok(MoveOutcome::Ongoing));
    assert_eq!(game.piece_at(square::G1), Some(Color::White.king()));
    assert_eq!(game.piece_at(square::F1), Some(Color::White.rook()));
    assert!(!game.castling_allowed(CastlingSide::KingSide, Color::White));
    assert!(!game.castling_allowed(CastlingSide::QueenSide, Color::White));

    assert_eq!(game.play(square::E8, square::C8, None), Ok(MoveOutcome::Ongoing));
    assert_eq!(game.piece_at(square::C8), Some(Color::Black.king()));
    assert_eq!(game.piece_at(square::D8), Some(Color::Black.rook()));
    assert!(!game.castling_allowed(CastlingSide::QueenSide, Color::Black));
}

#[test]
fn scholars_mate_is_check_then_mate() {
    let mut game = Game::new();
    game.play(square::E2, square::E4, None).unwrap();
    game.play(square::E7, square::E5, None).unwrap();
    game.play(square::D1, square::H5, None).unwrap();
    game.play(square::B8, square::C6, None).unwrap();
    game.play(square::F1, square::C4, None).unwrap();
    game.play(square::G8, square::F6, None).unwrap();

    // Qxf7#, supported by the bishop.
    assert_eq!(
        game.play(square::H5, square::F7, None),
        Ok(MoveOutcome::Checkmate)
    );
    assert!(game.is_finished());
    assert_eq!(game.black_captured(), [Color::Black.pawn()]);
}

#[test]
fn check_must_be_answered() {
    let mut game = Game::new();
    game.play(square::E2, square::E4, None).unwrap();
    game.play(square::F7, square::F6, None).unwrap();
    game.play(square::D1, square::H5, None).unwrap();
    assert!(game.player_king_in_check());

    // Any move ignoring the check is rejected.
    assert_eq!(
        game.play(square::A7, square::A6, None),
        Err(MoveError::WouldExposeKing)
    );
    // Blocking the diagonal answers it.
    assert_eq!(game.play(square::G7, square::G6, None), Ok(MoveOutcome::Ongoing));
}

#[test]
fn promotion_with_capture_on_the_far_rank() {
    let mut game = Game::new();
    for (from, to) in [
        (square::B2, square::B4),
        (square::A7, square::A5),
        (square::B4, square::A5),
        (square::G7, square::G6),
        (square::A5, square::A6),
        (square::G6, square::G5),
        (square::A6, square::A7),
        (square::G5, square::G4),
    ] {
        game.play(from, to, None).unwrap();
    }

    // A7xB8 takes the knight and must promote.
    assert_eq!(
        game.play(square::A7, square::B8, None),
        Err(MoveError::MissingPromotion)
    );
    game.play(square::A7, square::B8, Some(Role::Rook)).unwrap();
    assert_eq!(game.piece_at(square::B8), Some(Color::White.rook()));
    assert_eq!(
        game.black_captured(),
        [Color::Black.pawn(), Color::Black.knight()]
    );
}

#[test]
fn undo_is_single_slot() {
    let mut game = Game::new();
    game.play(square::E2, square::E4, None).unwrap();
    game.play(square::E7, square::E5, None).unwrap();
    assert!(game.undo_is_possible());

    // One undo takes back black's move only; the snapshot is then spent.
    game.undo_last_move();
    assert_eq!(game.current_turn(), Color::Black);
    assert_eq!(game.piece_at(square::E5), None);
    assert!(!game.undo_is_possible());

    game.undo_last_move();
    assert_eq!(game.current_turn(), Color::Black);
    assert_eq!(game.piece_at(square::E4), Some(Color::White.pawn()));
}

#[test]
fn save_replay_round_trip_through_json() {
    let mut game = Game::new();
    for (from, to) in [
        (square::E2, square::E4),
        (square::D7, square::D5),
        (square::E4, square::D5),
        (square::D8, square::D5),
        (square::B1, square::C3),
        (square::D5, square::A5),
    ] {
        game.play(from, to, None).unwrap();
    }

    let saved = SavedGame::from_game(&game);
    let json = serde_json::to_string(&saved).unwrap();
    let restored = Game::replay(&serde_json::from_str(&json).unwrap()).unwrap();

    assert_eq!(restored.board(), game.board());
    assert_eq!(restored.current_turn(), game.current_turn());
    assert_eq!(restored.rounds(), game.rounds());
    assert_eq!(restored.white_captured(), game.white_captured());
    assert_eq!(restored.black_captured(), game.black_captured());
}

/// Counts the enemy pieces that could capture on `target`, move by move,
/// from nothing but piece geometry and empty paths. Kings never appear in
/// an attacker list, so they are left out here as well.
fn pieces_bearing_on(game: &Game, target: Square, defender: Color) -> usize {
    let straight = |dr: i8| {
        if dr == 0 {
            Direction::Horizontal
        } else {
            Direction::Vertical
        }
    };
    Square::all()
        .filter(|&from| {
            let piece = match game.piece_at(from) {
                Some(piece) if piece.color != defender => piece,
                _ => return false,
            };
            let dr = target.row() - from.row();
            let dc = target.col() - from.col();
            if dr == 0 && dc == 0 {
                return false;
            }
            match piece.role {
                Role::Pawn => dr == piece.color.forward() && dc.abs() == 1,
                Role::Knight => {
                    (dr.abs() == 1 && dc.abs() == 2) || (dr.abs() == 2 && dc.abs() == 1)
                }
                Role::Rook => {
                    (dr == 0) != (dc == 0) && game.is_path_free(from, target, straight(dr))
                }
                Role::Bishop => {
                    dr.abs() == dc.abs() && game.is_path_free(from, target, Direction::Diagonal)
                }
                Role::Queen => {
                    if (dr == 0) != (dc == 0) {
                        game.is_path_free(from, target, straight(dr))
                    } else {
                        dr.abs() == dc.abs()
                            && game.is_path_free(from, target, Direction::Diagonal)
                    }
                }
                Role::King => false,
            }
        })
        .count()
}

fn assert_attacker_counts_everywhere(game: &Game) {
    for target in Square::all() {
        for defender in Color::ALL {
            assert_eq!(
                game.is_under_attack(target, defender).count(),
                pieces_bearing_on(game, target, defender),
                "attackers of {target} against a {defender} defender",
            );
        }
    }
}

#[test]
fn attacker_counts_match_capture_availability() {
    let mut game = Game::new();
    assert_attacker_counts_everywhere(&game);

    // Cross-check every square for both sides after each move of an
    // opening that brings out pawns, knights and the queen.
    for (from, to) in [
        (square::E2, square::E4),
        (square::D7, square::D5),
        (square::E4, square::D5),
        (square::D8, square::D5),
        (square::B1, square::C3),
        (square::D5, square::A5),
        (square::G1, square::F3),
        (square::C8, square::G4),
    ] {
        game.play(from, to, None).unwrap();
        assert_attacker_counts_everywhere(&game);
    }

    // A couple of fixed points of the sweep, spelled out.
    let attack = game.is_under_attack(square::F3, Color::White);
    assert_eq!(attack.count(), 1);
    assert_eq!(attack.attackers[0].square, square::G4);
    // The queen on A5 and the bishop on G4 both bear on H5.
    assert_eq!(game.is_under_attack(square::H5, Color::White).count(), 2);
    assert!(!game.is_under_attack(square::A6, Color::Black).is_attacked());
}
