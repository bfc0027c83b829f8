//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// How a move changes the board beyond lifting and dropping one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveType {
    Normal = 0,
    Promotion = 1,
    EnPassant = 2,
    /// King move of two files; the rook is relocated alongside.
    Castling = 3,
}

/// A fully specified move.
///
/// Besides the squares, a move records the moving piece kind and what it
/// captured, which is everything needed to undo it. Moves are plain values; the
/// state they produce is kept by the position's history stack.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub move_type: MoveType,
    /// Kind of the moving piece, before any promotion.
    pub piece: Piece,
    pub promotion: Option<Piece>,
    /// Kind of the captured piece. An en passant move captures a pawn even
    /// though its destination square is empty.
    pub captured: Option<Piece>,
}

impl Move {
    /// Creates a normal move, capturing whatever `captured` names.
    #[inline]
    pub const fn normal(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Self {
        Move {
            from,
            to,
            move_type: MoveType::Normal,
            piece,
            promotion: None,
            captured,
        }
    }

    /// Creates a pawn promotion.
    #[inline]
    pub const fn promotion(
        from: Square,
        to: Square,
        promotion: Piece,
        captured: Option<Piece>,
    ) -> Self {
        Move {
            from,
            to,
            move_type: MoveType::Promotion,
            piece: Piece::Pawn,
            promotion: Some(promotion),
            captured,
        }
    }

    /// Creates an en passant capture onto the target square `to`.
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            move_type: MoveType::EnPassant,
            piece: Piece::Pawn,
            promotion: None,
            captured: Some(Piece::Pawn),
        }
    }

    /// Creates a castling move, given as the king's two squares.
    #[inline]
    pub const fn castling(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            move_type: MoveType::Castling,
            piece: Piece::King,
            promotion: None,
            captured: None,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns the UCI notation for this move (e.g. `e2e4`, `e7e8q`).
    pub fn to_uci(&self) -> String {
        match self.promotion {
            Some(p) => format!("{}{}{}", self.from, self.to, p.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Checks the character ranges of a UCI move string without judging legality.
    ///
    /// Accepts four characters `<file><rank><file><rank>` with files `a`-`h` and
    /// ranks `1`-`8`, or five when the last one is a promotion letter
    /// `q`, `r`, `b` or `n`.
    pub fn is_valid_uci(s: &str) -> bool {
        UciMove::parse(s).is_some()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}", self.to_uci())?;
        match self.move_type {
            MoveType::Normal | MoveType::Promotion => {}
            MoveType::EnPassant => write!(f, " e.p.")?,
            MoveType::Castling => write!(f, " castle")?,
        }
        if let Some(c) = self.captured {
            write!(f, " x{}", c.to_char())?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// The squares and promotion letter of a UCI move string, before it is
/// matched against a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl UciMove {
    pub fn parse(s: &str) -> Option<Self> {
        if !s.is_ascii() || !(s.len() == 4 || s.len() == 5) {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s.as_bytes().get(4) {
            None => None,
            Some(&c) => match Piece::from_char(c as char) {
                Some(p @ (Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)) => Some(p),
                _ => return None,
            },
        };
        Some(UciMove {
            from,
            to,
            promotion,
        })
    }

    /// Returns true when `m` has the same squares and promotion.
    pub fn matches(&self, m: &Move) -> bool {
        m.from == self.from && m.to == self.to && m.promotion == self.promotion
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_uci() {
        let m = Move::normal(sq("e2"), sq("e4"), Piece::Pawn, None);
        assert_eq!(m.to_uci(), "e2e4");

        let promo = Move::promotion(sq("e7"), sq("d8"), Piece::Knight, Some(Piece::Rook));
        assert_eq!(promo.to_uci(), "e7d8n");
        assert!(promo.is_capture());
    }

    #[test]
    fn en_passant_captures_a_pawn() {
        let m = Move::en_passant(sq("e5"), sq("d6"));
        assert_eq!(m.captured, Some(Piece::Pawn));
        assert_eq!(m.move_type, MoveType::EnPassant);
        assert_eq!(format!("{:?}", m), "Move(e5d6 e.p. xp)");
    }

    #[test]
    fn parse_uci_move() {
        let m = UciMove::parse("e7e8q").unwrap();
        assert_eq!(m.from, sq("e7"));
        assert_eq!(m.to, sq("e8"));
        assert_eq!(m.promotion, Some(Piece::Queen));
        assert_eq!(m.to_string(), "e7e8q");

        assert_eq!(UciMove::parse("g1f3").unwrap().promotion, None);
    }

    #[test]
    fn uci_character_ranges() {
        assert!(Move::is_valid_uci("a1h8"));
        assert!(Move::is_valid_uci("b7b8r"));
        assert!(Move::is_valid_uci("b7b8n"));
        assert!(Move::is_valid_uci("b2b1b"));
        assert!(!Move::is_valid_uci("e7e8k"));
        assert!(!Move::is_valid_uci("e7e8p"));
        assert!(!Move::is_valid_uci("e7e8x"));
        assert!(!Move::is_valid_uci("i2i4"));
        assert!(!Move::is_valid_uci("e0e4"));
        assert!(!Move::is_valid_uci("e2e9"));
        assert!(!Move::is_valid_uci("e2e"));
        assert!(!Move::is_valid_uci("e2e4qq"));
        assert!(!Move::is_valid_uci("é2e4"));
    }

    #[test]
    fn uci_move_matches_full_move() {
        let full = Move::promotion(sq("a7"), sq("a8"), Piece::Queen, None);
        assert!(UciMove::parse("a7a8q").unwrap().matches(&full));
        assert!(!UciMove::parse("a7a8r").unwrap().matches(&full));
        assert!(!UciMove::parse("a7a8").unwrap().matches(&full));
    }
}
