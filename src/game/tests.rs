//! Move commit scenario tests
//!
//! Drives the committer against the real oracle for the situations the
//! interaction session depends on: plain moves, rejections that must leave
//! the game untouched, promotion deferral and atomic explosions.

use crate::game::committer::{commit_move, Commit};
use crate::game::engine::ShakmatyOracle;
use crate::game::error::GameError;
use crate::game::mode::Mode;
use crate::game::oracle::RulesOracle;
use crate::game::status::{current_outcome, status_line, GameOutcome};
use crate::game::types::{Piece, PieceColor, PieceKind, Square};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

/// Everything observable about the game, for before/after comparisons
///
/// The FEN covers placement, side to move, castling rights, en passant and
/// both clocks.
fn snapshot(oracle: &ShakmatyOracle) -> (String, usize) {
    (oracle.fen(), oracle.history().len())
}

/// Start position, both sides able to castle, and en passant available
const SWEEP_POSITIONS: [&str; 3] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/pppq1ppp/2n2n2/4p3/4P3/2N2N2/PPPQ1PPP/R3K2R w KQkq - 4 8",
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
];

fn applied(commit: Commit) -> crate::game::committer::CommittedMove {
    match commit {
        Commit::Applied(committed) => committed,
        Commit::Deferred(pending) => panic!("unexpected deferral {pending:?}"),
    }
}

// ============================================================================
// Standard Commits
// ============================================================================

#[test]
fn test_legal_move_flips_turn_once() {
    let mut oracle = ShakmatyOracle::new();
    let committed = applied(
        commit_move(&mut oracle, Mode::Standard.rules(), sq("e2"), sq("e4"), None).unwrap(),
    );

    assert_eq!(committed.record.san, "e4");
    assert!(committed.explosion.is_none());
    assert_eq!(committed.outcome, None);
    assert_eq!(oracle.turn(), PieceColor::Black);
    assert_eq!(oracle.history().len(), 1);
    assert_eq!(status_line(Mode::Standard, &oracle), "Standard • Black to move");
}

#[test]
fn test_illegal_move_leaves_state_identical() {
    //! A rejected commit must not disturb the board, the turn or the history
    let mut oracle = ShakmatyOracle::new();
    let before = snapshot(&oracle);

    let err = commit_move(&mut oracle, Mode::Standard.rules(), sq("e2"), sq("e5"), None)
        .unwrap_err();

    assert_eq!(
        err,
        GameError::IllegalMove {
            from: sq("e2"),
            to: sq("e5")
        }
    );
    assert!(err.is_illegal_move());
    assert_eq!(snapshot(&oracle), before);
}

#[test]
fn test_moving_the_opponents_piece_is_illegal() {
    let mut oracle = ShakmatyOracle::new();
    let before = snapshot(&oracle);
    assert!(commit_move(&mut oracle, Mode::Standard.rules(), sq("e7"), sq("e5"), None).is_err());
    assert_eq!(snapshot(&oracle), before);
}

#[test]
fn test_checkmate_outcome_is_reported() {
    let mut oracle = ShakmatyOracle::new();
    let rules = Mode::Standard.rules();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
        commit_move(&mut oracle, rules, sq(from), sq(to), None).unwrap();
    }
    let mate = applied(commit_move(&mut oracle, rules, sq("d8"), sq("h4"), None).unwrap());

    assert_eq!(mate.record.san, "Qh4#");
    assert_eq!(
        mate.outcome,
        Some(GameOutcome::Checkmate {
            winner: PieceColor::Black
        })
    );
    assert_eq!(
        status_line(Mode::Standard, &oracle),
        "Standard • Game over: Black wins by checkmate"
    );
}

#[test]
fn test_every_legal_move_flips_turn_once() {
    //! Each move the oracle lists, committed from a fresh copy of the
    //! position, is applied exactly once and hands the turn over
    for fen in SWEEP_POSITIONS {
        let start = ShakmatyOracle::from_fen(fen).unwrap();
        let mover = start.turn();
        let moves: Vec<_> = Square::all().flat_map(|square| start.moves_from(square)).collect();
        assert!(!moves.is_empty());

        for legal in moves {
            let mut oracle = start.clone();
            let committed = applied(
                commit_move(
                    &mut oracle,
                    Mode::Standard.rules(),
                    legal.from,
                    legal.to,
                    legal.promotion,
                )
                .unwrap(),
            );
            assert_eq!(committed.record.color, mover);
            assert_eq!(oracle.turn(), mover.opposite(), "{fen}: {}{}", legal.from, legal.to);
            assert_eq!(oracle.history().len(), 1);
            assert_ne!(oracle.fen(), start.fen());
        }
    }
}

#[test]
fn test_every_illegal_pair_leaves_state_identical() {
    //! All from/to pairs the oracle does not list, including from == to, are
    //! rejected without touching castling rights, en passant or clocks
    for fen in SWEEP_POSITIONS {
        let mut oracle = ShakmatyOracle::from_fen(fen).unwrap();
        let before = snapshot(&oracle);
        let mut rejected = 0;

        for from in Square::all() {
            let legal: Vec<Square> = oracle.moves_from(from).iter().map(|m| m.to).collect();
            for to in Square::all().filter(|to| !legal.contains(to)) {
                let result = commit_move(&mut oracle, Mode::Standard.rules(), from, to, None);
                assert!(
                    matches!(result, Err(GameError::IllegalMove { .. })),
                    "{fen}: {from}{to} gave {result:?}"
                );
                assert_eq!(snapshot(&oracle), before, "{fen}: {from}{to}");
                rejected += 1;
            }
        }
        assert!(rejected > 4000);
    }
}

#[test]
fn test_castling_and_en_passant_are_in_the_sweep() {
    let castling = ShakmatyOracle::from_fen(SWEEP_POSITIONS[1]).unwrap();
    let king_moves: Vec<Square> = castling.moves_from(sq("e1")).iter().map(|m| m.to).collect();
    assert!(king_moves.contains(&sq("g1")) && king_moves.contains(&sq("c1")));

    let mut en_passant = ShakmatyOracle::from_fen(SWEEP_POSITIONS[2]).unwrap();
    let committed = applied(
        commit_move(&mut en_passant, Mode::Standard.rules(), sq("e5"), sq("f6"), None).unwrap(),
    );
    assert!(committed.record.en_passant);
    assert_eq!(en_passant.get(sq("f5")), None);
}

// ============================================================================
// Promotion
// ============================================================================

#[test]
fn test_promotion_is_deferred_without_touching_the_oracle() {
    let mut oracle = ShakmatyOracle::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let before = snapshot(&oracle);

    let commit = commit_move(&mut oracle, Mode::Standard.rules(), sq("a7"), sq("a8"), None).unwrap();
    match commit {
        Commit::Deferred(pending) => {
            assert_eq!(pending.from, sq("a7"));
            assert_eq!(pending.to, sq("a8"));
        }
        Commit::Applied(_) => panic!("promotion should wait for a choice"),
    }
    assert_eq!(snapshot(&oracle), before);
}

#[test]
fn test_promotion_choice_is_applied() {
    let mut oracle = ShakmatyOracle::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let committed = applied(
        commit_move(
            &mut oracle,
            Mode::Standard.rules(),
            sq("a7"),
            sq("a8"),
            Some(PieceKind::Knight),
        )
        .unwrap(),
    );

    assert_eq!(committed.record.promotion, Some(PieceKind::Knight));
    assert_eq!(
        oracle.get(sq("a8")),
        Some(Piece::new(PieceColor::White, PieceKind::Knight))
    );
    assert_eq!(oracle.get(sq("a7")), None);
}

#[test]
fn test_impossible_promotion_is_illegal_not_deferred() {
    let mut oracle = ShakmatyOracle::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let result = commit_move(&mut oracle, Mode::Standard.rules(), sq("a7"), sq("b8"), None);
    assert!(matches!(result, Err(GameError::IllegalMove { .. })));
}

// ============================================================================
// Atomic Explosions
// ============================================================================

#[test]
fn test_quiet_atomic_move_does_not_explode() {
    let mut oracle = ShakmatyOracle::new();
    let committed = applied(
        commit_move(&mut oracle, Mode::Atomic.rules(), sq("e2"), sq("e4"), None).unwrap(),
    );
    assert!(committed.explosion.is_none());
    assert!(oracle.get(sq("e4")).is_some());
}

#[test]
fn test_explosion_spares_neighboring_pawns() {
    //! Knight takes on d5: the bishop, the knight and the rook on c4 go,
    //! the pawns on c6 and e6 stay
    let mut oracle =
        ShakmatyOracle::from_fen("4k3/8/2p1p3/3b4/2r5/4N3/8/4K3 w - - 0 1").unwrap();

    let committed = applied(
        commit_move(&mut oracle, Mode::Atomic.rules(), sq("e3"), sq("d5"), None).unwrap(),
    );
    let explosion = committed.explosion.expect("capture should explode");

    assert_eq!(explosion.center, sq("d5"));
    assert!(!explosion.opponent_king_destroyed);
    assert_eq!(explosion.removed.len(), 2);
    assert_eq!(oracle.get(sq("d5")), None);
    assert_eq!(oracle.get(sq("c4")), None);
    assert_eq!(
        oracle.get(sq("c6")),
        Some(Piece::new(PieceColor::Black, PieceKind::Pawn))
    );
    assert_eq!(
        oracle.get(sq("e6")),
        Some(Piece::new(PieceColor::Black, PieceKind::Pawn))
    );
    assert_eq!(oracle.turn(), PieceColor::Black);
    assert!(oracle.is_valid_position());
}

#[test]
fn test_self_destructive_explosion_is_rolled_back() {
    //! Rook takes on d2 next to its own king: the whole move is undone
    let mut oracle = ShakmatyOracle::from_fen("4k3/8/8/8/8/8/3n4/3RK3 w - - 0 1").unwrap();
    let before = snapshot(&oracle);

    let err = commit_move(&mut oracle, Mode::Atomic.rules(), sq("d1"), sq("d2"), None)
        .unwrap_err();

    assert_eq!(err, GameError::SelfDestructiveExplosion { center: sq("d2") });
    assert!(err.is_illegal_move());
    assert_eq!(snapshot(&oracle), before);
    assert_eq!(
        oracle.get(sq("d2")),
        Some(Piece::new(PieceColor::Black, PieceKind::Knight))
    );
}

#[test]
fn test_same_capture_is_fine_in_standard_chess() {
    let mut oracle = ShakmatyOracle::from_fen("4k3/8/8/8/8/8/3n4/3RK3 w - - 0 1").unwrap();
    let committed = applied(
        commit_move(&mut oracle, Mode::Standard.rules(), sq("d1"), sq("d2"), None).unwrap(),
    );
    assert!(committed.explosion.is_none());
    assert_eq!(
        oracle.get(sq("d2")),
        Some(Piece::new(PieceColor::White, PieceKind::Rook))
    );
}

#[test]
fn test_explosion_exposing_own_king_is_rolled_back() {
    //! The blast removes the queen that shields the white king from the rook
    let mut oracle = ShakmatyOracle::from_fen("k3r3/8/8/8/8/5p2/4Q3/4K1N1 w - - 0 1").unwrap();
    let before = snapshot(&oracle);

    let err = commit_move(&mut oracle, Mode::Atomic.rules(), sq("g1"), sq("f3"), None)
        .unwrap_err();

    assert_eq!(err, GameError::SelfDestructiveExplosion { center: sq("f3") });
    assert_eq!(snapshot(&oracle), before);
    assert!(oracle.is_valid_position());
}

#[test]
fn test_exploding_the_opponent_king_wins() {
    let mut oracle = ShakmatyOracle::from_fen("4k3/3n4/8/8/8/8/8/3RK3 w - - 0 1").unwrap();

    let committed = applied(
        commit_move(&mut oracle, Mode::Atomic.rules(), sq("d1"), sq("d7"), None).unwrap(),
    );

    let explosion = committed.explosion.expect("capture should explode");
    assert!(explosion.opponent_king_destroyed);
    assert_eq!(
        committed.outcome,
        Some(GameOutcome::Explosion {
            winner: PieceColor::White
        })
    );
    assert_eq!(oracle.get(sq("e8")), None);
    assert!(oracle.is_game_over());
    assert!(oracle.moves_from(sq("e1")).is_empty());
    assert_eq!(
        current_outcome(&oracle),
        Some(GameOutcome::Explosion {
            winner: PieceColor::White
        })
    );
    assert_eq!(
        status_line(Mode::Atomic, &oracle),
        "Atomic • White wins by explosion!"
    );
}

#[test]
fn test_atomic_promotion_capture_explodes() {
    //! Choosing a piece for a capturing promotion still detonates the square
    let mut oracle = ShakmatyOracle::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let rules = Mode::Atomic.rules();

    assert!(matches!(
        commit_move(&mut oracle, rules, sq("a7"), sq("b8"), None).unwrap(),
        Commit::Deferred(_)
    ));
    let committed = applied(
        commit_move(&mut oracle, rules, sq("a7"), sq("b8"), Some(PieceKind::Queen)).unwrap(),
    );

    assert!(committed.explosion.is_some());
    assert_eq!(oracle.get(sq("b8")), None);
    assert_eq!(
        oracle.get(sq("e8")),
        Some(Piece::new(PieceColor::Black, PieceKind::King))
    );
}
