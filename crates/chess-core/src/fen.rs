//! FEN (Forsyth-Edwards Notation) parsing.

use crate::{Color, Piece, Rank, Square, Variant, BOARD_WIDTH};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings. Each variant names the
/// field that was malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid piece placement: {square} is not on a {variant} board")]
    SquareOutsideBoard { square: Square, variant: Variant },

    #[error("invalid piece placement: {color} has {count} kings, expected 1")]
    KingCount { color: Color, count: usize },

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A validated FEN record.
///
/// Piece placement is resolved into squares of the 8x8 index space, so the
/// position builder never sees a square outside the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    pub variant: Variant,
    /// Occupied squares in ascending index order.
    pub pieces: Vec<(Square, Piece, Color)>,
    pub active_color: Color,
    /// Castling field as written (`KQkq` subset or `-`).
    pub castling: String,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a standard chess FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        Self::parse_variant(fen, Variant::Standard)
    }

    /// Parses a FEN string for the given board geometry.
    ///
    /// A mini variant accepts either the full 8x8 placement (every piece must
    /// stand inside the variant's region) or the compact placement of
    /// `height` ranks of `width` squares.
    pub fn parse_variant(fen: &str, variant: Variant) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let pieces = Self::parse_piece_placement(parts[0], variant)?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling, variant)?;

        let en_passant = Self::parse_en_passant(parts[3], variant, active_color)?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            variant,
            pieces,
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_piece_placement(
        placement: &str,
        variant: Variant,
    ) -> Result<Vec<(Square, Piece, Color)>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();

        // (width, file offset, rank offset) of the grid the text describes
        let (width, file_lo, rank_lo) = if ranks.len() == BOARD_WIDTH as usize {
            (BOARD_WIDTH, 0, 0)
        } else if variant != Variant::Standard && ranks.len() == variant.height() as usize {
            (
                variant.width(),
                variant.first_file().index(),
                variant.back_rank(Color::White).index(),
            )
        } else {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected {} ranks, got {}",
                BOARD_WIDTH,
                ranks.len()
            )));
        };

        let height = ranks.len() as u8;
        let mut pieces = Vec::new();

        for (i, rank_str) in ranks.iter().enumerate() {
            let row = height - 1 - i as u8;
            let rank_label = row + rank_lo + 1;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if digit == 0 || digit > BOARD_WIDTH as u32 {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "invalid empty-square count '{}' in rank {}",
                            c, rank_label
                        )));
                    }
                    file = match file.checked_add(digit as u8) {
                        Some(f) if f <= width => f,
                        _ => {
                            return Err(FenError::InvalidPiecePlacement(format!(
                                "rank {} has more than {} squares",
                                rank_label, width
                            )))
                        }
                    };
                } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                    if file >= width {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "rank {} has more than {} squares",
                            rank_label, width
                        )));
                    }
                    let sq = Square::from_coords((file + file_lo) as i8, (row + rank_lo) as i8)
                        .ok_or_else(|| {
                            FenError::InvalidPiecePlacement(format!(
                                "rank {} runs off the board",
                                rank_label
                            ))
                        })?;
                    if !variant.contains(sq) {
                        return Err(FenError::SquareOutsideBoard {
                            square: sq,
                            variant,
                        });
                    }
                    pieces.push((sq, piece, color));
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c, rank_label
                    )));
                }
            }
            if file != width {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected {}",
                    rank_label, file, width
                )));
            }
        }

        pieces.sort_by_key(|(sq, _, _)| *sq);
        Ok(pieces)
    }

    fn validate_castling(castling: &str, variant: Variant) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        if !variant.allows_castling() {
            return Err(FenError::InvalidCastlingRights(format!(
                "'{}' on a {} board, which has no castling",
                castling, variant
            )));
        }

        let mut seen = String::new();
        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
            if seen.contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate right '{}'",
                    c
                )));
            }
            seen.push(c);
        }

        Ok(())
    }

    fn parse_en_passant(
        ep: &str,
        variant: Variant,
        active: Color,
    ) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        let sq = Square::from_algebraic(ep)
            .ok_or_else(|| FenError::InvalidEnPassantSquare(ep.to_string()))?;

        // The target lies behind a pawn of the side that just moved.
        let expected = match active {
            Color::White => Rank::R6,
            Color::Black => Rank::R3,
        };
        if !variant.allows_double_push() || sq.rank() != expected || !variant.contains(sq) {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }

        Ok(Some(sq))
    }
}
