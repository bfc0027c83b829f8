//! Core types for chess.
//!
//! This crate provides the fundamental types used across the workspace:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Variant`] for the supported board geometries
//! - [`Move`] and [`UciMove`] for move representation
//! - FEN parsing

mod fen;
mod mov;
mod piece;
mod square;
mod variant;

pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveType, UciMove};
pub use piece::{Color, Piece};
pub use square::{File, Rank, Square, BOARD_WIDTH};
pub use variant::Variant;
