//! Board coordinates.
//!
//! All board variants share one 8x8 index space. A square is `rank * 8 + file`
//! with a1 = 0, h1 = 7, a8 = 56 and h8 = 63; smaller boards occupy a region of
//! that space (see [`Variant`](crate::Variant)).

use std::fmt;

/// Width of the shared index space.
pub const BOARD_WIDTH: u8 = 8;

/// A file (column), `a` = 0 through `h` = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(u8);

impl File {
    pub const A: File = File(0);
    pub const B: File = File(1);
    pub const C: File = File(2);
    pub const D: File = File(3);
    pub const E: File = File(4);
    pub const F: File = File(5);
    pub const G: File = File(6);
    pub const H: File = File(7);

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < BOARD_WIDTH {
            Some(File(index))
        } else {
            None
        }
    }

    /// Parses `a`-`h` (case-insensitive).
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            c @ 'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self.0) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row), `1` = 0 through `8` = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    pub const R1: Rank = Rank(0);
    pub const R2: Rank = Rank(1);
    pub const R3: Rank = Rank(2);
    pub const R4: Rank = Rank(3);
    pub const R5: Rank = Rank(4);
    pub const R6: Rank = Rank(5);
    pub const R7: Rank = Rank(6);
    pub const R8: Rank = Rank(7);

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < BOARD_WIDTH {
            Some(Rank(index))
        } else {
            None
        }
    }

    /// Parses `1`-`8`.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Rank(c as u8 - b'1')),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self.0) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square of the 8x8 index space.
///
/// "No square" is expressed as `Option<Square>::None`; every `Square` value
/// is in `0..64`, but whether it belongs to the board depends on the variant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * BOARD_WIDTH + file.index())
    }

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Builds a square from signed coordinates, `None` when off the 8x8 grid.
    #[inline]
    pub const fn from_coords(file: i8, rank: i8) -> Option<Self> {
        if file < 0 || rank < 0 || file >= BOARD_WIDTH as i8 || rank >= BOARD_WIDTH as i8 {
            None
        } else {
            Some(Square(rank as u8 * BOARD_WIDTH + file as u8))
        }
    }

    /// Parses algebraic notation such as `e4`.
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn file(self) -> File {
        File(self.0 % BOARD_WIDTH)
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank(self.0 / BOARD_WIDTH)
    }

    /// Steps `df` files and `dr` ranks, `None` when leaving the 8x8 grid.
    ///
    /// Callers on a smaller board must use [`Variant::offset`](crate::Variant::offset),
    /// which also checks the variant's region.
    #[inline]
    pub const fn offset(self, df: i8, dr: i8) -> Option<Self> {
        Self::from_coords(self.file().index() as i8 + df, self.rank().index() as i8 + dr)
    }

    /// True for a1-coloured (dark) squares.
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.file().index() + self.rank().index()) % 2 == 0
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Iterates all 64 squares in ascending index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_new() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(e4.index(), 28);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("H8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("e44"), None);
    }

    #[test]
    fn square_display() {
        assert_eq!(Square::A1.to_string(), "a1");
        assert_eq!(Square::new(File::E, Rank::R4).to_algebraic(), "e4");
        assert_eq!(format!("{:?}", Square::H8), "Square(h8)");
    }

    #[test]
    fn offset_stays_on_grid() {
        assert_eq!(Square::E1.offset(1, 1), Square::from_algebraic("f2"));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::H1.offset(1, 0), None);
    }

    #[test]
    fn square_colors() {
        assert!(Square::A1.is_dark());
        assert!(!Square::B1.is_dark());
        assert!(!Square::A8.is_dark());
        assert!(Square::H8.is_dark());
    }

    #[test]
    fn all_squares_ascending() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A1);
        assert_eq!(squares[63], Square::H8);
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn algebraic_round_trip(index in 0u8..64) {
            let sq = Square::from_index(index).unwrap();
            prop_assert_eq!(Square::from_algebraic(&sq.to_algebraic()), Some(sq));
        }

        #[test]
        fn offset_inverse(index in 0u8..64, df in -2i8..=2, dr in -2i8..=2) {
            let sq = Square::from_index(index).unwrap();
            if let Some(to) = sq.offset(df, dr) {
                prop_assert_eq!(to.offset(-df, -dr), Some(sq));
            }
        }
    }
}
