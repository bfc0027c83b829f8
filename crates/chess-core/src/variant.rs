//! Board geometries.
//!
//! Every variant lives inside the 8x8 index space; the mini boards occupy a
//! rectangle one file and one rank in from the a1 corner:
//!
//! | Variant    | Files | Ranks | Castling | Double push | Promotions |
//! |------------|-------|-------|----------|-------------|------------|
//! | Standard   | a-h   | 1-8   | yes      | yes         | Q R B N    |
//! | Los Alamos | b-g   | 2-7   | no       | no          | Q R N      |
//! | Gardner    | b-f   | 2-6   | no       | no          | Q R B N    |

use crate::{Color, File, Piece, Rank, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board geometry with its variant-specific rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Standard 8x8 chess.
    #[default]
    Standard,
    /// Los Alamos chess: 6x6, no bishops.
    LosAlamos,
    /// Gardner minichess: 5x5.
    Gardner,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Standard, Variant::LosAlamos, Variant::Gardner];

    const fn file_bounds(self) -> (u8, u8) {
        match self {
            Variant::Standard => (0, 7),
            Variant::LosAlamos => (1, 6),
            Variant::Gardner => (1, 5),
        }
    }

    const fn rank_bounds(self) -> (u8, u8) {
        match self {
            Variant::Standard => (0, 7),
            Variant::LosAlamos => (1, 6),
            Variant::Gardner => (1, 5),
        }
    }

    /// Number of files on the board.
    pub const fn width(self) -> u8 {
        let (lo, hi) = self.file_bounds();
        hi - lo + 1
    }

    /// Number of ranks on the board.
    pub const fn height(self) -> u8 {
        let (lo, hi) = self.rank_bounds();
        hi - lo + 1
    }

    /// Leftmost file of the board.
    pub const fn first_file(self) -> File {
        match File::from_index(self.file_bounds().0) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    /// Returns true if `sq` is part of this board.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        let (flo, fhi) = self.file_bounds();
        let (rlo, rhi) = self.rank_bounds();
        let f = sq.file().index();
        let r = sq.rank().index();
        f >= flo && f <= fhi && r >= rlo && r <= rhi
    }

    /// Steps from `sq` by (`df`, `dr`), `None` unless the target is on this board.
    #[inline]
    pub const fn offset(self, sq: Square, df: i8, dr: i8) -> Option<Square> {
        match sq.offset(df, dr) {
            Some(to) if self.contains(to) => Some(to),
            _ => None,
        }
    }

    /// Iterates the board's squares in ascending index (rank-major) order.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        Square::all().filter(move |sq| self.contains(*sq))
    }

    /// Rank holding the pieces of `color` at the start.
    pub const fn back_rank(self, color: Color) -> Rank {
        let (lo, hi) = self.rank_bounds();
        let idx = match color {
            Color::White => lo,
            Color::Black => hi,
        };
        match Rank::from_index(idx) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Rank holding the pawns of `color` at the start.
    pub const fn pawn_rank(self, color: Color) -> Rank {
        let back = self.back_rank(color).index() as i8;
        match Rank::from_index((back + color.pawn_direction()) as u8) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Rank on which pawns of `color` promote.
    pub const fn promotion_rank(self, color: Color) -> Rank {
        self.back_rank(color.opposite())
    }

    /// Piece kinds a pawn may promote to, strongest first.
    pub const fn promotion_pieces(self) -> &'static [Piece] {
        match self {
            Variant::LosAlamos => &[Piece::Queen, Piece::Rook, Piece::Knight],
            Variant::Standard | Variant::Gardner => &Piece::PROMOTIONS,
        }
    }

    pub const fn allows_castling(self) -> bool {
        matches!(self, Variant::Standard)
    }

    /// Whether pawns may advance two squares from their start rank, which is
    /// also the only source of en passant targets.
    pub const fn allows_double_push(self) -> bool {
        matches!(self, Variant::Standard)
    }

    /// Starting position in FEN.
    pub const fn start_fen(self) -> &'static str {
        match self {
            Variant::Standard => "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Variant::LosAlamos => "8/1rnqknr1/1pppppp1/8/8/1PPPPPP1/1RNQKNR1/8 w - - 0 1",
            Variant::Gardner => "8/8/1rnbqk2/1ppppp2/8/1PPPPP2/1RNBQK2/8 w - - 0 1",
        }
    }

    /// Name used by the `UCI_Variant` option of variant-aware engines.
    pub const fn uci_name(self) -> &'static str {
        match self {
            Variant::Standard => "chess",
            Variant::LosAlamos => "losalamos",
            Variant::Gardner => "gardner",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Standard => "standard",
            Variant::LosAlamos => "los-alamos",
            Variant::Gardner => "gardner",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "chess" => Ok(Variant::Standard),
            "los-alamos" | "losalamos" => Ok(Variant::LosAlamos),
            "gardner" => Ok(Variant::Gardner),
            other => Err(format!("unknown variant '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn board_dimensions() {
        assert_eq!(Variant::Standard.squares().count(), 64);
        assert_eq!(Variant::LosAlamos.squares().count(), 36);
        assert_eq!(Variant::Gardner.squares().count(), 25);
        assert_eq!(Variant::LosAlamos.width(), 6);
        assert_eq!(Variant::Gardner.height(), 5);
    }

    #[test]
    fn los_alamos_region() {
        let v = Variant::LosAlamos;
        assert!(v.contains(sq("b2")));
        assert!(v.contains(sq("g7")));
        assert!(!v.contains(sq("a2")));
        assert!(!v.contains(sq("h7")));
        assert!(!v.contains(sq("b1")));
        assert!(!v.contains(sq("b8")));
    }

    #[test]
    fn gardner_region() {
        let v = Variant::Gardner;
        assert!(v.contains(sq("b2")));
        assert!(v.contains(sq("f6")));
        assert!(!v.contains(sq("g6")));
        assert!(!v.contains(sq("f7")));
    }

    #[test]
    fn offset_is_range_checked_per_variant() {
        assert_eq!(Variant::Standard.offset(sq("g6"), 1, 1), Some(sq("h7")));
        assert_eq!(Variant::LosAlamos.offset(sq("g6"), 1, 1), None);
        assert_eq!(Variant::Gardner.offset(sq("e5"), 1, 1), Some(sq("f6")));
        assert_eq!(Variant::Gardner.offset(sq("f6"), 0, 1), None);
        assert_eq!(Variant::Standard.offset(sq("a1"), -1, 2), None);
    }

    #[test]
    fn ranks_per_color() {
        assert_eq!(Variant::Standard.pawn_rank(Color::White), Rank::R2);
        assert_eq!(Variant::Standard.pawn_rank(Color::Black), Rank::R7);
        assert_eq!(Variant::LosAlamos.back_rank(Color::White), Rank::R2);
        assert_eq!(Variant::LosAlamos.pawn_rank(Color::Black), Rank::R6);
        assert_eq!(Variant::Gardner.promotion_rank(Color::White), Rank::R6);
        assert_eq!(Variant::Gardner.promotion_rank(Color::Black), Rank::R2);
    }

    #[test]
    fn promotion_sets() {
        assert_eq!(Variant::Standard.promotion_pieces().len(), 4);
        assert!(!Variant::LosAlamos.promotion_pieces().contains(&Piece::Bishop));
        assert!(Variant::Gardner.promotion_pieces().contains(&Piece::Bishop));
    }

    #[test]
    fn parse_and_display() {
        for v in Variant::ALL {
            assert_eq!(v.to_string().parse::<Variant>(), Ok(v));
        }
        assert_eq!("losalamos".parse::<Variant>(), Ok(Variant::LosAlamos));
        assert!("shogi".parse::<Variant>().is_err());
    }

    #[test]
    fn deserializes_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            variant: Variant,
        }
        let w: Wrapper = toml::from_str("variant = \"los-alamos\"").unwrap();
        assert_eq!(w.variant, Variant::LosAlamos);
    }
}
