//! Randomized properties over positions reached by random legal play.

use chess_core::Variant;
use chess_engine::{movegen, Position};
use proptest::prelude::*;

/// Plays up to `choices.len()` moves, picking each one by index modulo the
/// number of legal moves, and stops early when the game is over.
fn play(variant: Variant, choices: &[usize]) -> Position {
    let mut position = Position::new(variant);
    for &choice in choices {
        let moves = movegen::all_moves(&mut position);
        if moves.is_empty() {
            break;
        }
        let m = moves[choice % moves.len()];
        position.apply(m).unwrap();
    }
    position
}

fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop_oneof![
        Just(Variant::Standard),
        Just(Variant::LosAlamos),
        Just(Variant::Gardner),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fen_round_trip_is_a_fixed_point(
        variant in variant_strategy(),
        choices in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        let position = play(variant, &choices);
        let fen = position.fen();
        let reparsed = Position::from_fen_variant(&fen, variant).unwrap();
        prop_assert_eq!(reparsed.fen(), fen);
        prop_assert_eq!(reparsed.hash(), position.hash());
    }

    #[test]
    fn apply_undo_restores_every_legal_move(
        variant in variant_strategy(),
        choices in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let mut position = play(variant, &choices);
        let fen = position.fen();
        let hash = position.hash();
        let before = position.clone();
        for m in movegen::all_moves(&mut position) {
            position.apply(m).unwrap();
            prop_assert!(!position.king_in_check(position.side_to_move().opposite()));
            prop_assert_eq!(position.undo(), Some(m));
            prop_assert_eq!(position.fen(), fen.clone());
            prop_assert_eq!(position.hash(), hash);
        }
        prop_assert_eq!(position, before);
    }

    #[test]
    fn undoing_the_whole_game_returns_to_start(
        variant in variant_strategy(),
        choices in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        let mut position = play(variant, &choices);
        while position.undo().is_some() {}
        prop_assert_eq!(position, Position::new(variant));
    }
}
