//! Zobrist hashing for position identification.
//!
//! Positions are hashed with the Polyglot opening book scheme so that hashes
//! can be looked up in third-party books and tables. The scheme XORs 781
//! fixed random keys:
//! - one per piece on each square (12 pieces × 64 squares = 768 values)
//! - one per castling right (4 values)
//! - one per en passant file (8 values), counted only when a pawn of the
//!   side to move could actually capture en passant
//! - one for White to move
//!
//! The key values are those of the `shakmaty` crate's Polyglot-compatible
//! [`Zobrist64`] table, copied once into a flat [`ZobristKeys`] array.

use std::sync::LazyLock;

use chess_core::{Color, File, Piece, Square};
use shakmaty::zobrist::{Zobrist64, ZobristValue};

use crate::position::CastlingSide;
use crate::Position;

/// Polyglot Zobrist keys, indexed by this crate's own types.
pub struct ZobristKeys {
    /// Keys for pieces: [color][piece][square]
    pieces: [[[u64; 64]; 6]; 2],
    /// Keys for castling rights: [color][side]
    castling: [[u64; 2]; 2],
    /// Keys for en passant file.
    en_passant: [u64; 8],
    /// Key for White to move (XOR when White is to move).
    white_to_move: u64,
}

impl ZobristKeys {
    fn polyglot() -> Self {
        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color in Color::ALL {
            for piece in Piece::ALL {
                for square in Square::all() {
                    let key = Zobrist64::zobrist_for_piece(
                        ext_square(square),
                        shakmaty::Piece {
                            color: ext_color(color),
                            role: ext_role(piece),
                        },
                    );
                    pieces[color.index()][piece.index()][square.index() as usize] = key.0;
                }
            }
        }

        let mut castling = [[0u64; 2]; 2];
        for color in Color::ALL {
            for (i, side) in CastlingSide::ALL.into_iter().enumerate() {
                let ext_side = match side {
                    CastlingSide::KingSide => shakmaty::CastlingSide::KingSide,
                    CastlingSide::QueenSide => shakmaty::CastlingSide::QueenSide,
                };
                castling[color.index()][i] =
                    Zobrist64::zobrist_for_castling_right(ext_color(color), ext_side).0;
            }
        }

        let mut en_passant = [0u64; 8];
        for (i, key) in en_passant.iter_mut().enumerate() {
            *key = Zobrist64::zobrist_for_en_passant_file(shakmaty::File::new(i as u32)).0;
        }

        ZobristKeys {
            pieces,
            castling,
            en_passant,
            white_to_move: Zobrist64::zobrist_for_white_turn().0,
        }
    }

    /// Returns the key for a piece on a square.
    #[inline]
    pub fn piece_key(&self, piece: Piece, color: Color, square: Square) -> u64 {
        self.pieces[color.index()][piece.index()][square.index() as usize]
    }

    #[inline]
    pub fn castling_key(&self, color: Color, side: CastlingSide) -> u64 {
        let i = match side {
            CastlingSide::KingSide => 0,
            CastlingSide::QueenSide => 1,
        };
        self.castling[color.index()][i]
    }

    #[inline]
    pub fn en_passant_key(&self, file: File) -> u64 {
        self.en_passant[file.index() as usize]
    }

    #[inline]
    pub fn white_to_move_key(&self) -> u64 {
        self.white_to_move
    }
}

/// Global Zobrist keys (initialized on first use).
pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::polyglot);

/// Computes the Polyglot hash of `position` from scratch.
pub fn hash(position: &Position) -> u64 {
    let keys = &*ZOBRIST;
    let mut h = 0u64;

    for color in Color::ALL {
        for (square, piece) in position.squares_of(color) {
            h ^= keys.piece_key(piece, color, square);
        }
    }

    let state = position.state();
    for color in Color::ALL {
        for side in CastlingSide::ALL {
            if state.castling.has(color, side) {
                h ^= keys.castling_key(color, side);
            }
        }
    }

    if let Some(ep) = state.en_passant {
        if en_passant_capturable(position, ep) {
            h ^= keys.en_passant_key(ep.file());
        }
    }

    if position.side_to_move() == Color::White {
        h ^= keys.white_to_move_key();
    }

    h
}

/// True when a pawn of the side to move stands beside the pawn that just
/// made a double push. Whether the capture would be legal does not matter.
fn en_passant_capturable(position: &Position, ep: Square) -> bool {
    let us = position.side_to_move();
    let variant = position.variant();
    let Some(pushed) = variant.offset(ep, 0, -us.pawn_direction()) else {
        return false;
    };
    [-1, 1]
        .into_iter()
        .filter_map(|df| variant.offset(pushed, df, 0))
        .any(|sq| position.piece_at(sq) == Some((Piece::Pawn, us)))
}

fn ext_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::new(u32::from(square.index()))
}

fn ext_color(color: Color) -> shakmaty::Color {
    match color {
        Color::White => shakmaty::Color::White,
        Color::Black => shakmaty::Color::Black,
    }
}

fn ext_role(piece: Piece) -> shakmaty::Role {
    match piece {
        Piece::Pawn => shakmaty::Role::Pawn,
        Piece::Knight => shakmaty::Role::Knight,
        Piece::Bishop => shakmaty::Role::Bishop,
        Piece::Rook => shakmaty::Role::Rook,
        Piece::Queen => shakmaty::Role::Queen,
        Piece::King => shakmaty::Role::King,
    }
}
