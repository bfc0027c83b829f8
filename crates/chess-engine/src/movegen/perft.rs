//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Children are visited with apply/undo on a single position.

use super::all_moves;
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        if position.apply(m).is_ok() {
            nodes += perft(position, depth - 1);
            position.undo();
        }
    }
    nodes
}

/// Perft with divide: node count below each root move, sorted by UCI text.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let moves = all_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        if position.apply(m).is_err() {
            continue;
        }
        let nodes = if depth > 1 {
            perft(position, depth - 1)
        } else {
            1
        };
        position.undo();
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Variant;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn perft_fen(fen: &str, depth: u32) -> u64 {
        let mut position = Position::from_fen(fen).unwrap();
        perft(&mut position, depth)
    }

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&mut Position::startpos(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&mut Position::startpos(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&mut Position::startpos(), 3), 8902);
    }

    // Deeper counts are slow in debug builds.
    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&mut Position::startpos(), 4), 197281);
    }

    // Kiwipete - a position with lots of special moves
    #[test]
    fn perft_kiwipete() {
        assert_eq!(perft_fen(KIWIPETE, 1), 48);
        assert_eq!(perft_fen(KIWIPETE, 2), 2039);
    }

    #[test]
    #[ignore]
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft_fen(KIWIPETE, 3), 97862);
    }

    // Position 3: Check evasion, en passant, promotion
    #[test]
    fn perft_position3() {
        assert_eq!(perft_fen(POSITION_3, 1), 14);
        assert_eq!(perft_fen(POSITION_3, 2), 191);
        assert_eq!(perft_fen(POSITION_3, 3), 2812);
    }

    // Position 4: Lots of promotions and captures
    #[test]
    fn perft_position4() {
        assert_eq!(perft_fen(POSITION_4, 1), 6);
        assert_eq!(perft_fen(POSITION_4, 2), 264);
    }

    // Position 5: Complex position
    #[test]
    fn perft_position5() {
        assert_eq!(perft_fen(POSITION_5, 1), 44);
        assert_eq!(perft_fen(POSITION_5, 2), 1486);
    }

    #[test]
    fn perft_restores_position() {
        let mut position = Position::from_fen(KIWIPETE).unwrap();
        let before = position.clone();
        perft(&mut position, 2);
        assert_eq!(position, before);
    }

    #[test]
    fn perft_divide_works() {
        let mut position = Position::startpos();
        let results = perft_divide(&mut position, 2);
        assert_eq!(results.len(), 20);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
        assert_eq!(results[0], ("a2a3".to_string(), 20));
    }

    #[test]
    fn perft_mini_variants() {
        // Gardner: a pawn pushed to the fourth rank can be taken by the
        // black pawns beside it, so replies range from 7 to 8.
        assert_eq!(perft(&mut Position::new(Variant::Gardner), 1), 7);
        assert_eq!(perft(&mut Position::new(Variant::Gardner), 2), 53);
        // Los Alamos: the armies do not touch within two plies.
        assert_eq!(perft(&mut Position::new(Variant::LosAlamos), 1), 10);
        assert_eq!(perft(&mut Position::new(Variant::LosAlamos), 2), 100);
    }
}
