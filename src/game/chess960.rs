//! Chess960 starting positions
//!
//! Back-rank placement follows the usual construction: one bishop on a dark
//! square and one on a light square, then the queen and both knights on random
//! free squares, and finally rook-king-rook on the last three squares in file
//! order so the king always sits between the rooks.
//!
//! Castling is not offered in Chess960 games, so the generated FEN carries `-`
//! for castling rights.

use rand::Rng;

use crate::game::types::PieceKind;

/// Back rank of a Chess960 start position, file a to file h
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chess960Position {
    back_rank: [PieceKind; 8],
}

impl Chess960Position {
    pub fn back_rank(&self) -> [PieceKind; 8] {
        self.back_rank
    }

    /// Full FEN: shuffled back ranks, full pawn ranks, white to move, no castling
    pub fn to_fen(&self) -> String {
        let black: String = self.back_rank.iter().map(|kind| kind.letter()).collect();
        let white = black.to_ascii_uppercase();
        format!("{black}/pppppppp/8/8/8/8/PPPPPPPP/{white} w - - 0 1")
    }

    /// Recover the back rank from a FEN produced by [`Chess960Position::to_fen`]
    pub fn from_fen(fen: &str) -> Option<Self> {
        let black = fen.split('/').next()?;
        if black.chars().count() != 8 {
            return None;
        }
        let mut back_rank = [PieceKind::Pawn; 8];
        for (slot, c) in back_rank.iter_mut().zip(black.chars()) {
            if !c.is_ascii_lowercase() {
                return None;
            }
            *slot = PieceKind::from_letter(c)?;
        }
        Some(Self { back_rank })
    }

    /// Whether the back rank satisfies the Chess960 placement rules
    pub fn is_valid(&self) -> bool {
        let count = |kind: PieceKind| self.back_rank.iter().filter(|&&k| k == kind).count();
        if count(PieceKind::King) != 1
            || count(PieceKind::Queen) != 1
            || count(PieceKind::Rook) != 2
            || count(PieceKind::Bishop) != 2
            || count(PieceKind::Knight) != 2
        {
            return false;
        }

        let positions = |kind: PieceKind| {
            self.back_rank
                .iter()
                .enumerate()
                .filter(move |&(_, &k)| k == kind)
                .map(|(i, _)| i)
                .collect::<Vec<_>>()
        };
        let bishops = positions(PieceKind::Bishop);
        let rooks = positions(PieceKind::Rook);
        let king = positions(PieceKind::King)[0];

        bishops[0] % 2 != bishops[1] % 2 && rooks[0] < king && king < rooks[1]
    }
}

/// Generate a start position with the thread-local generator
pub fn generate() -> Chess960Position {
    generate_with(&mut rand::rng())
}

/// Generate a start position from the given random source
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Chess960Position {
    let mut slots: [Option<PieceKind>; 8] = [None; 8];

    slots[2 * rng.random_range(0..4)] = Some(PieceKind::Bishop);
    slots[2 * rng.random_range(0..4) + 1] = Some(PieceKind::Bishop);

    for kind in [PieceKind::Queen, PieceKind::Knight, PieceKind::Knight] {
        let free = free_slots(&slots);
        let pick = free[rng.random_range(0..free.len())];
        slots[pick] = Some(kind);
    }

    // Three squares remain; in file order they take rook, king, rook.
    for (slot, kind) in free_slots(&slots)
        .into_iter()
        .zip([PieceKind::Rook, PieceKind::King, PieceKind::Rook])
    {
        slots[slot] = Some(kind);
    }

    Chess960Position {
        back_rank: slots.map(|slot| slot.unwrap_or(PieceKind::Rook)),
    }
}

fn free_slots(slots: &[Option<PieceKind>; 8]) -> Vec<usize> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_none())
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_positions_are_valid() {
        let mut rng = StdRng::seed_from_u64(960);
        for _ in 0..1000 {
            let position = generate_with(&mut rng);
            assert!(position.is_valid(), "invalid back rank {:?}", position);
        }
    }

    #[test]
    fn test_fen_shape() {
        let position = generate_with(&mut StdRng::seed_from_u64(7));
        let fen = position.to_fen();
        let fields: Vec<&str> = fen.split(' ').collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(&fields[1..], ["w", "-", "-", "0", "1"]);

        let ranks: Vec<&str> = fields[0].split('/').collect();
        assert_eq!(ranks.len(), 8);
        assert_eq!(ranks[1], "pppppppp");
        assert_eq!(ranks[6], "PPPPPPPP");
        assert_eq!(ranks[7], ranks[0].to_ascii_uppercase());
        assert_eq!(Chess960Position::from_fen(&fen), Some(position));
    }

    #[test]
    fn test_standard_back_rank_is_valid_and_misplaced_king_is_not() {
        let standard =
            Chess960Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1")
                .unwrap();
        assert!(standard.is_valid());

        let king_outside =
            Chess960Position::from_fen("krbqnbnr/pppppppp/8/8/8/8/PPPPPPPP/KRBQNBNR w - - 0 1")
                .unwrap();
        assert!(!king_outside.is_valid());

        let same_color_bishops =
            Chess960Position::from_fen("rbqbknnr/pppppppp/8/8/8/8/PPPPPPPP/RBQBKNNR w - - 0 1")
                .unwrap();
        assert!(!same_color_bishops.is_valid());
    }
}
