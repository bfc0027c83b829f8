//! Chess position model and legal move generation.
//!
//! This crate provides:
//! - [`Position`] - Board, side to move and a stack of [`StateInfo`]
//!   snapshots, mutated only through [`Position::apply`] and [`Position::undo`]
//! - [`movegen`] - Per-piece destination sets and legal move enumeration
//! - [`zobrist`] - Polyglot-compatible position hashing
//! - [`rules`] - Checkmate, stalemate and draw detection
//!
//! All three board variants (standard, Los Alamos and Gardner) share the
//! 8x8 square indexing of [`chess_core::Square`].
//!
//! # Example
//!
//! ```
//! use chess_engine::{movegen, Position};
//!
//! let mut position = Position::startpos();
//! let moves = movegen::all_moves(&mut position);
//! assert_eq!(moves.len(), 20);
//!
//! position.apply_uci("e2e4").unwrap();
//! position.apply_uci("e7e5").unwrap();
//! assert_eq!(
//!     position.fen(),
//!     "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
//! );
//! ```

pub mod movegen;
mod position;
pub mod rules;
mod squareset;
pub mod zobrist;

pub use movegen::{all_moves, perft::perft, MoveList};
pub use position::{CastlingRights, CastlingSide, MoveError, Position, StateInfo};
pub use rules::{DrawReason, GameResult};
pub use squareset::SquareSet;
