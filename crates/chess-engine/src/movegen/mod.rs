//! Move generation.
//!
//! Destination sets are computed per piece kind through a function table
//! indexed by [`Piece::index`]. Every generated move is checked with
//! [`Position::try_move`], so only legal moves are ever returned.
//!
//! Squares are visited in ascending index order (a1, b1, ..., h8) and
//! destinations likewise, which makes the output order reproducible.

pub mod perft;

use crate::{Position, SquareSet};
use chess_core::{Color, Move, Piece, Square};

use crate::position::CastlingSide;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// A list of moves.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.moves.contains(m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }

    /// Moves in UCI notation, in list order.
    pub fn to_uci(&self) -> Vec<String> {
        self.moves.iter().map(Move::to_uci).collect()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl Extend<Move> for MoveList {
    fn extend<I: IntoIterator<Item = Move>>(&mut self, iter: I) {
        self.moves.extend(iter);
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Destination set of a piece of `color` on `from`.
type DestinationFn = fn(&Position, Square, Color) -> SquareSet;

const REACHABLE: [DestinationFn; 6] = [
    pawn_reachable,
    knight_targets,
    bishop_targets,
    rook_targets,
    queen_targets,
    king_targets,
];

const ATTACKED: [DestinationFn; 6] = [
    pawn_attacked,
    knight_targets,
    bishop_targets,
    rook_targets,
    queen_targets,
    king_targets,
];

/// Squares a `kind` on `from` can move to, ignoring check.
///
/// The color is taken from the piece standing on `from`; an empty square
/// reaches nothing. Sliders stop before their own pieces and on the first
/// opposing piece. A pawn reaches its push squares when empty (two squares
/// only from its home rank, in variants with double pushes) and its capture
/// squares when they hold an opposing piece or are the en passant target.
pub fn reachable(kind: Piece, from: Square, position: &Position) -> SquareSet {
    match position.piece_at(from) {
        Some((_, color)) => REACHABLE[kind.index()](position, from, color),
        None => SquareSet::EMPTY,
    }
}

/// Squares a `kind` on `from` attacks.
///
/// Same as [`reachable`] except for pawns, which attack both forward
/// diagonals whatever stands there and never attack by pushing.
pub fn attacked(kind: Piece, from: Square, position: &Position) -> SquareSet {
    match position.piece_at(from) {
        Some((_, color)) => ATTACKED[kind.index()](position, from, color),
        None => SquareSet::EMPTY,
    }
}

/// Legal single-outcome moves of the `kind` on `from`.
///
/// Every reachable destination becomes a fully specified move (with its
/// capture and en passant typing) and is kept only if
/// [`Position::try_move`] accepts it. Pawn moves onto the last rank have
/// several outcomes and are produced by [`moves`] instead.
pub fn simple_moves(kind: Piece, from: Square, position: &mut Position) -> MoveList {
    let mut list = MoveList::new();
    let Some((_, color)) = position.piece_at(from) else {
        return list;
    };
    let variant = position.variant();
    let en_passant = position.state().en_passant;

    for to in reachable(kind, from, position) {
        let m = if kind == Piece::Pawn {
            if to.rank() == variant.promotion_rank(color) {
                continue;
            }
            if Some(to) == en_passant && to.file() != from.file() && position.piece_at(to).is_none()
            {
                Move::en_passant(from, to)
            } else {
                Move::normal(from, to, kind, captured_on(position, to))
            }
        } else {
            Move::normal(from, to, kind, captured_on(position, to))
        };
        if position.try_move(m) {
            list.push(m);
        }
    }
    list
}

/// All legal moves of the `kind` on `from`: [`simple_moves`] plus one
/// move per allowed promotion piece for pawns reaching the last rank, and
/// castling for the king.
pub fn moves(kind: Piece, from: Square, position: &mut Position) -> MoveList {
    let mut list = simple_moves(kind, from, position);
    let Some((_, color)) = position.piece_at(from) else {
        return list;
    };
    let variant = position.variant();

    match kind {
        Piece::Pawn => {
            for to in reachable(kind, from, position) {
                if to.rank() != variant.promotion_rank(color) {
                    continue;
                }
                let captured = captured_on(position, to);
                for &promotion in variant.promotion_pieces() {
                    let m = Move::promotion(from, to, promotion, captured);
                    if position.try_move(m) {
                        list.push(m);
                    }
                }
            }
        }
        Piece::King if variant.allows_castling() => {
            let back = variant.back_rank(color);
            for side in CastlingSide::ALL {
                let m = Move::castling(from, Square::new(side.king_to_file(), back));
                if position.check_castling(&m).is_ok() && position.try_move(m) {
                    list.push(m);
                }
            }
        }
        _ => {}
    }
    list
}

/// Every legal move of the side to move.
pub fn all_moves(position: &mut Position) -> MoveList {
    let us = position.side_to_move();
    let occupied: Vec<(Square, Piece)> = position.squares_of(us).collect();
    let mut list = MoveList::new();
    for (from, kind) in occupied {
        list.extend(moves(kind, from, position));
    }
    list
}

/// Squares attacked by any piece of `color`.
pub fn attacked_by(color: Color, position: &Position) -> SquareSet {
    position
        .squares_of(color)
        .fold(SquareSet::EMPTY, |acc, (from, kind)| {
            acc | attacked(kind, from, position)
        })
}

fn captured_on(position: &Position, to: Square) -> Option<Piece> {
    position.piece_at(to).map(|(piece, _)| piece)
}

fn pawn_reachable(position: &Position, from: Square, color: Color) -> SquareSet {
    let variant = position.variant();
    let dir = color.pawn_direction();
    let mut set = SquareSet::EMPTY;

    if let Some(one) = variant.offset(from, 0, dir) {
        if position.piece_at(one).is_none() {
            set.insert(one);
            if variant.allows_double_push() && from.rank() == variant.pawn_rank(color) {
                if let Some(two) = variant.offset(one, 0, dir) {
                    if position.piece_at(two).is_none() {
                        set.insert(two);
                    }
                }
            }
        }
    }

    let en_passant = if color == position.side_to_move() {
        position.state().en_passant
    } else {
        None
    };
    for to in pawn_attacked(position, from, color) {
        match position.piece_at(to) {
            Some((_, c)) if c != color => set.insert(to),
            None if Some(to) == en_passant => set.insert(to),
            _ => {}
        }
    }
    set
}

fn pawn_attacked(position: &Position, from: Square, color: Color) -> SquareSet {
    let variant = position.variant();
    let dir = color.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(|df| variant.offset(from, df, dir))
        .collect()
}

fn leaper_targets(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
) -> SquareSet {
    let variant = position.variant();
    offsets
        .iter()
        .filter_map(|&(df, dr)| variant.offset(from, df, dr))
        .filter(|&to| !matches!(position.piece_at(to), Some((_, c)) if c == color))
        .collect()
}

fn slider_targets(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
) -> SquareSet {
    let variant = position.variant();
    let mut set = SquareSet::EMPTY;
    for &(df, dr) in directions {
        let mut cur = from;
        while let Some(to) = variant.offset(cur, df, dr) {
            match position.piece_at(to) {
                None => set.insert(to),
                Some((_, c)) => {
                    if c != color {
                        set.insert(to);
                    }
                    break;
                }
            }
            cur = to;
        }
    }
    set
}

fn knight_targets(position: &Position, from: Square, color: Color) -> SquareSet {
    leaper_targets(position, from, color, &KNIGHT_OFFSETS)
}

fn king_targets(position: &Position, from: Square, color: Color) -> SquareSet {
    leaper_targets(position, from, color, &KING_OFFSETS)
}

fn bishop_targets(position: &Position, from: Square, color: Color) -> SquareSet {
    slider_targets(position, from, color, &BISHOP_DIRECTIONS)
}

fn rook_targets(position: &Position, from: Square, color: Color) -> SquareSet {
    slider_targets(position, from, color, &ROOK_DIRECTIONS)
}

fn queen_targets(position: &Position, from: Square, color: Color) -> SquareSet {
    rook_targets(position, from, color) | bishop_targets(position, from, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{MoveType, Variant};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn uci_set(list: &MoveList) -> Vec<String> {
        let mut v = list.to_uci();
        v.sort();
        v
    }

    #[test]
    fn startpos_has_20_moves() {
        let mut pos = Position::startpos();
        assert_eq!(all_moves(&mut pos).len(), 20);
    }

    #[test]
    fn twenty_replies_to_e4() {
        let mut pos = Position::startpos();
        pos.apply_uci("e2e4").unwrap();
        assert_eq!(all_moves(&mut pos).len(), 20);
    }

    #[test]
    fn generation_leaves_position_untouched() {
        let mut pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let before = pos.clone();
        assert_eq!(all_moves(&mut pos).len(), 48);
        assert_eq!(pos, before);
    }

    #[test]
    fn generation_order_is_ascending_by_origin() {
        let mut pos = Position::startpos();
        let list = all_moves(&mut pos);
        let origins: Vec<u8> = list.iter().map(|m| m.from.index()).collect();
        assert!(origins.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(list[0].to_uci(), "b1a3");
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let pos = Position::from_fen("4k3/8/8/3p4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let set = reachable(Piece::Rook, sq("d2"), &pos);
        assert!(set.contains(sq("d5")));
        assert!(!set.contains(sq("d6")));
        assert!(set.contains(sq("d1")));
        assert!(set.contains(sq("a2")));
        assert!(set.contains(sq("h2")));
        assert_eq!(set.count(), 11);
    }

    #[test]
    fn pawn_reachable_differs_from_attacked() {
        let pos = Position::from_fen("4k3/8/8/8/8/2p5/3P4/4K3 w - - 0 1").unwrap();
        let reach = reachable(Piece::Pawn, sq("d2"), &pos);
        let attack = attacked(Piece::Pawn, sq("d2"), &pos);
        let mut reach_v: Vec<Square> = reach.into_iter().collect();
        reach_v.sort();
        assert_eq!(reach_v, vec![sq("c3"), sq("d3"), sq("d4")]);
        assert!(attack.contains(sq("c3")));
        assert!(attack.contains(sq("e3")));
        assert!(!attack.contains(sq("d3")));
    }

    #[test]
    fn blocked_pawn_cannot_double_push() {
        let pos = Position::from_fen("4k3/8/8/8/8/3n4/3P4/4K3 w - - 0 1").unwrap();
        assert!(reachable(Piece::Pawn, sq("d2"), &pos).is_empty());
    }

    #[test]
    fn king_cannot_step_into_check() {
        let mut pos = Position::from_fen("4k3/8/4R3/8/8/8/8/4K3 b - - 0 1").unwrap();
        let list = all_moves(&mut pos);
        assert_eq!(uci_set(&list), vec!["e8d7", "e8d8", "e8f7", "e8f8"]);
        for m in &list {
            pos.apply(*m).unwrap();
            assert!(!pos.king_in_check(Color::Black));
            pos.undo();
        }
    }

    #[test]
    fn en_passant_is_generated() {
        let mut pos =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        let list = moves(Piece::Pawn, sq("e5"), &mut pos);
        let ep: Vec<&Move> = list
            .iter()
            .filter(|m| m.move_type == MoveType::EnPassant)
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, sq("d6"));
        assert_eq!(ep[0].captured, Some(Piece::Pawn));
    }

    #[test]
    fn en_passant_exposing_king_is_excluded() {
        // Capturing on d6 would open the fifth rank to the rook on h5.
        let mut pos = Position::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").unwrap();
        let list = moves(Piece::Pawn, sq("e5"), &mut pos);
        assert_eq!(uci_set(&list), vec!["e5e6"]);
    }

    #[test]
    fn promotions_enumerate_variant_pieces() {
        let mut pos = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let list = moves(Piece::Pawn, sq("a7"), &mut pos);
        assert_eq!(list.len(), 8);
        assert!(list.iter().all(|m| m.move_type == MoveType::Promotion));
        assert_eq!(
            list.iter().filter(|m| m.captured == Some(Piece::Knight)).count(),
            4
        );

        let mut la =
            Position::from_fen_variant("8/6k1/1P6/8/8/8/4K3/8 w - - 0 1", Variant::LosAlamos)
                .unwrap();
        let list = moves(Piece::Pawn, sq("b6"), &mut la);
        assert_eq!(uci_set(&list), vec!["b6b7n", "b6b7q", "b6b7r"]);
    }

    #[test]
    fn castling_candidates() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let list = moves(Piece::King, Square::E1, &mut pos);
        let castles: Vec<String> = list
            .iter()
            .filter(|m| m.move_type == MoveType::Castling)
            .map(|m| m.to_uci())
            .collect();
        assert_eq!(castles, vec!["e1g1", "e1c1"]);
    }

    #[test]
    fn castling_rejected_when_transit_attacked() {
        let mut pos = Position::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let list = moves(Piece::King, Square::E1, &mut pos);
        assert!(list.iter().all(|m| m.move_type != MoveType::Castling));
    }

    #[test]
    fn castling_rejected_when_pawn_covers_transit() {
        // The pawn on e2 attacks f1 without being able to move there.
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/4p3/4K2R w K - 0 1").unwrap();
        assert!(attacked(Piece::Pawn, sq("e2"), &pos).contains(sq("f1")));
        assert!(!reachable(Piece::Pawn, sq("e2"), &pos).contains(sq("f1")));
        let list = moves(Piece::King, Square::E1, &mut pos);
        assert!(list.iter().all(|m| m.move_type != MoveType::Castling));
    }

    #[test]
    fn attacked_by_matches_position_probe() {
        let pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        for color in Color::ALL {
            let set = attacked_by(color, &pos);
            // Own pieces are defended, not attacked, for the destination sets.
            let foreign = Square::all()
                .filter(|&s| !matches!(pos.piece_at(s), Some((_, c)) if c == color));
            for sq in foreign {
                assert_eq!(set.contains(sq), pos.attacked(sq, color), "{} {}", color, sq);
            }
        }
    }

    #[test]
    fn mini_variants_start_counts() {
        let mut la = Position::new(Variant::LosAlamos);
        // Six single pawn pushes and two moves for each knight.
        assert_eq!(all_moves(&mut la).len(), 10);
        let mut gardner = Position::new(Variant::Gardner);
        // Five pawn pushes and two knight moves.
        assert_eq!(all_moves(&mut gardner).len(), 7);
    }

    #[test]
    fn pieces_never_leave_the_variant() {
        let mut pos = Position::new(Variant::Gardner);
        for m in &all_moves(&mut pos) {
            assert!(Variant::Gardner.contains(m.to));
        }
    }

    #[test]
    fn empty_square_generates_nothing() {
        let mut pos = Position::startpos();
        assert!(reachable(Piece::Queen, sq("e4"), &pos).is_empty());
        assert!(moves(Piece::Queen, sq("e4"), &mut pos).is_empty());
    }
}
