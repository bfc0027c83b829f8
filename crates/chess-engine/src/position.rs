//! Chess position representation.

use chess_core::{
    Color, FenError, FenParser, File, Move, MoveType, Piece, Square, UciMove, Variant,
};
use std::fmt::Write as _;
use thiserror::Error;

use crate::movegen::{self, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};
use crate::zobrist;

/// The two castling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    /// File the king lands on.
    pub const fn king_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    pub const fn rook_from_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::H,
            CastlingSide::QueenSide => File::A,
        }
    }

    pub const fn rook_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    /// Identifies the side from the king's destination file.
    pub fn from_king_target(to: Square) -> Option<Self> {
        match to.file() {
            File::G => Some(CastlingSide::KingSide),
            File::C => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }
}

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, side: CastlingSide) -> u8 {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => Self::WHITE_KINGSIDE,
            (Color::White, CastlingSide::QueenSide) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastlingSide::KingSide) => Self::BLACK_KINGSIDE,
            (Color::Black, CastlingSide::QueenSide) => Self::BLACK_QUEENSIDE,
        }
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    #[inline]
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastlingSide::KingSide);
        self.remove(color, CastlingSide::QueenSide);
    }

    /// Drops every right that depends on a piece standing on `sq`.
    ///
    /// Called for both squares of a move: a king or rook leaving home loses
    /// its rights, and so does a rook captured on its home square.
    pub fn remove_for_square(&mut self, sq: Square) {
        match sq {
            Square::E1 => self.remove_color(Color::White),
            Square::E8 => self.remove_color(Color::Black),
            Square::H1 => self.remove(Color::White, CastlingSide::KingSide),
            Square::A1 => self.remove(Color::White, CastlingSide::QueenSide),
            Square::H8 => self.remove(Color::Black, CastlingSide::KingSide),
            Square::A8 => self.remove(Color::Black, CastlingSide::QueenSide),
            _ => {}
        }
    }

    /// Parses the FEN castling field. The field has been validated by [`FenParser`].
    pub fn from_fen(field: &str) -> Self {
        let mut flags = 0u8;
        for c in field.chars() {
            match c {
                'K' => flags |= Self::WHITE_KINGSIDE,
                'Q' => flags |= Self::WHITE_QUEENSIDE,
                'k' => flags |= Self::BLACK_KINGSIDE,
                'q' => flags |= Self::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        CastlingRights(flags)
    }

    /// Formats the rights as a FEN castling field.
    pub fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        let mut field = String::with_capacity(4);
        for (flag, c) in [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.0 & flag != 0 {
                field.push(c);
            }
        }
        field
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Irreversible position state.
///
/// One snapshot exists for the initial position and one more for every
/// applied move; undoing a move discards its snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateInfo {
    pub castling: CastlingRights,
    /// Square a pawn skipped over on the previous move.
    pub en_passant: Option<Square>,
    /// Halfmoves since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Starts at 1, increments after Black's move.
    pub fullmove_number: u32,
}

impl Default for StateInfo {
    fn default() -> Self {
        StateInfo {
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

/// Reasons a move cannot be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("{square} is not on a {variant} board")]
    SquareOutsideBoard { square: Square, variant: Variant },

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {0} does not belong to the side to move")]
    WrongColor(Square),

    #[error("move names a {expected} on {square} but the board holds a {found}")]
    PieceMismatch {
        square: Square,
        expected: Piece,
        found: Piece,
    },

    #[error("capture recorded for {0} does not match the board")]
    CaptureMismatch(Square),

    #[error("{0} is occupied by a piece of the side to move")]
    OwnPieceOnTarget(Square),

    #[error("invalid move type: {0}")]
    InvalidMoveType(&'static str),

    #[error("castling not permitted: {0}")]
    CastlingNotAllowed(&'static str),

    #[error("move leaves the king in check")]
    LeavesKingInCheck,

    #[error("invalid UCI move: {0}")]
    InvalidUci(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// Complete chess position state.
///
/// Pieces live in a flat mailbox indexed by square. The move history and the
/// matching [`StateInfo`] stack grow with [`apply`](Position::apply) and
/// shrink with [`undo`](Position::undo); `states` always holds exactly one
/// entry more than `history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    variant: Variant,
    board: [Option<(Piece, Color)>; 64],
    side_to_move: Color,
    states: Vec<StateInfo>,
    history: Vec<Move>,
}

impl Position {
    /// Creates an empty board of the given variant, White to move.
    pub fn empty(variant: Variant) -> Self {
        Position {
            variant,
            board: [None; 64],
            side_to_move: Color::White,
            states: vec![StateInfo::default()],
            history: Vec::new(),
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::new(Variant::Standard)
    }

    /// Creates the starting position of `variant`.
    pub fn new(variant: Variant) -> Self {
        let mut position = Position::empty(variant);
        if let Err(e) = position.set(variant.start_fen()) {
            unreachable!("start position of {variant} rejected: {e}");
        }
        position
    }

    /// Creates a standard chess position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_variant(fen, Variant::Standard)
    }

    /// Creates a position of `variant` from a FEN string.
    pub fn from_fen_variant(fen: &str, variant: Variant) -> Result<Self, FenError> {
        let mut position = Position::empty(variant);
        position.set(fen)?;
        Ok(position)
    }

    /// Replaces the position with the one described by `fen`, clearing the
    /// move history. On error the position is left unchanged.
    pub fn set(&mut self, fen: &str) -> Result<(), FenError> {
        let parsed = FenParser::parse_variant(fen, self.variant)?;

        let mut board = [None; 64];
        for &(sq, piece, color) in &parsed.pieces {
            board[sq.index() as usize] = Some((piece, color));
        }
        for color in Color::ALL {
            let count = board
                .iter()
                .filter(|p| **p == Some((Piece::King, color)))
                .count();
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        self.board = board;
        self.side_to_move = parsed.active_color;
        self.states.clear();
        self.states.push(StateInfo {
            castling: CastlingRights::from_fen(&parsed.castling),
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        });
        self.history.clear();
        Ok(())
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The current irreversible state.
    #[inline]
    pub fn state(&self) -> &StateInfo {
        // `states` is never empty.
        &self.states[self.states.len() - 1]
    }

    /// Moves applied since the position was set, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of moves applied since the position was set.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.board[sq.index() as usize]
    }

    /// Squares holding pieces of `color`, in ascending order.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.variant.squares().filter_map(move |sq| match self.piece_at(sq) {
            Some((piece, c)) if c == color => Some((sq, piece)),
            _ => None,
        })
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.squares_of(color)
            .find(|(_, piece)| *piece == Piece::King)
            .map(|(sq, _)| sq)
    }

    /// Converts the position to a FEN string in the 8x8 form.
    pub fn fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8u8).rev() {
            let mut empty_count = 0;
            for file in 0..8u8 {
                let sq = Square::from_coords(file as i8, rank as i8);
                match sq.and_then(|sq| self.piece_at(sq)) {
                    Some((piece, color)) => {
                        if empty_count > 0 {
                            let _ = write!(fen, "{}", empty_count);
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                let _ = write!(fen, "{}", empty_count);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        let state = self.state();
        let _ = write!(
            fen,
            " {} {} {} {} {}",
            self.side_to_move.to_fen_char(),
            state.castling.to_fen(),
            state
                .en_passant
                .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic()),
            state.halfmove_clock,
            state.fullmove_number
        );

        fen
    }

    /// Renders the board, rank 8 at the top, followed by the state fields.
    ///
    /// Empty squares of the variant print as `.`, squares outside it as a blank.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            let _ = write!(out, "{} ", rank + 1);
            for file in 0..8u8 {
                let c = match Square::from_coords(file as i8, rank as i8) {
                    Some(sq) if self.variant.contains(sq) => match self.piece_at(sq) {
                        Some((piece, color)) => piece.to_fen_char(color),
                        None => '.',
                    },
                    _ => ' ',
                };
                out.push(c);
                out.push(' ');
            }
            out.truncate(out.trim_end_matches(' ').len());
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");

        let state = self.state();
        let _ = writeln!(out, "Side to move: {}", self.side_to_move);
        let _ = writeln!(out, "Castling: {}", state.castling.to_fen());
        let _ = writeln!(
            out,
            "En passant: {}",
            state
                .en_passant
                .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic())
        );
        let _ = writeln!(
            out,
            "Halfmove clock: {}, fullmove number: {}",
            state.halfmove_clock, state.fullmove_number
        );
        let _ = writeln!(out, "Hash: {:016x}", self.hash());
        out
    }

    /// Polyglot Zobrist hash of the position.
    #[inline]
    pub fn hash(&self) -> u64 {
        zobrist::hash(self)
    }

    /// Returns true if any piece of `by` attacks `sq`.
    ///
    /// Probes outward from `sq` with each piece's movement pattern and looks
    /// for an attacker of the matching kind. Pawns count on their diagonal
    /// capture squares whether or not those are occupied.
    pub fn attacked(&self, sq: Square, by: Color) -> bool {
        let v = self.variant;
        let holds = |to: Option<Square>, kinds: &[Piece]| match to.and_then(|t| self.piece_at(t)) {
            Some((piece, color)) => color == by && kinds.contains(&piece),
            None => false,
        };

        // A pawn of `by` attacks `sq` from one rank behind it.
        let back = -by.pawn_direction();
        if holds(v.offset(sq, -1, back), &[Piece::Pawn]) || holds(v.offset(sq, 1, back), &[Piece::Pawn])
        {
            return true;
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&(df, dr)| holds(v.offset(sq, df, dr), &[Piece::Knight]))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(df, dr)| holds(v.offset(sq, df, dr), &[Piece::King]))
        {
            return true;
        }

        let ray_hits = |dirs: &[(i8, i8)], kinds: &[Piece]| {
            dirs.iter().any(|&(df, dr)| {
                let mut cur = sq;
                while let Some(next) = v.offset(cur, df, dr) {
                    if let Some((piece, color)) = self.piece_at(next) {
                        return color == by && kinds.contains(&piece);
                    }
                    cur = next;
                }
                false
            })
        };

        ray_hits(&ROOK_DIRECTIONS, &[Piece::Rook, Piece::Queen])
            || ray_hits(&BISHOP_DIRECTIONS, &[Piece::Bishop, Piece::Queen])
    }

    /// Returns true if the king of `color` is attacked. A side without a king
    /// is never in check.
    pub fn king_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.attacked(king, color.opposite()))
    }

    /// Returns true if the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.king_in_check(self.side_to_move)
    }

    /// Applies `m` for the side to move.
    ///
    /// The move's squares, recorded pieces and type are checked against the
    /// board, then the move is made. If it leaves the mover's king attacked it
    /// is taken back and `LeavesKingInCheck` is returned. Piece geometry is
    /// not checked here: moves are expected to come from the generator or
    /// from [`parse_move`](Position::parse_move).
    pub fn apply(&mut self, m: Move) -> Result<(), MoveError> {
        self.validate(&m)?;

        let us = self.side_to_move;
        let prev = *self.state();
        let mut next = StateInfo {
            castling: prev.castling,
            en_passant: None,
            halfmove_clock: if m.piece == Piece::Pawn || m.is_capture() {
                0
            } else {
                prev.halfmove_clock.saturating_add(1)
            },
            fullmove_number: prev
                .fullmove_number
                .saturating_add((us == Color::Black) as u32),
        };
        next.castling.remove_for_square(m.from);
        next.castling.remove_for_square(m.to);
        if m.piece == Piece::Pawn && m.from.rank().index().abs_diff(m.to.rank().index()) == 2 {
            next.en_passant = m.from.offset(0, us.pawn_direction());
        }

        self.set_piece(m.from, None);
        match m.move_type {
            MoveType::Normal => self.set_piece(m.to, Some((m.piece, us))),
            MoveType::Promotion => self.set_piece(m.to, m.promotion.map(|p| (p, us))),
            MoveType::EnPassant => {
                self.set_piece(m.to, Some((Piece::Pawn, us)));
                self.set_piece(en_passant_victim(&m), None);
            }
            MoveType::Castling => {
                self.set_piece(m.to, Some((Piece::King, us)));
                let (rook_from, rook_to) = castling_rook_squares(&m);
                self.set_piece(rook_from, None);
                self.set_piece(rook_to, Some((Piece::Rook, us)));
            }
        }

        self.states.push(next);
        self.history.push(m);
        self.side_to_move = us.opposite();

        if self.king_in_check(us) {
            self.undo();
            return Err(MoveError::LeavesKingInCheck);
        }
        Ok(())
    }

    /// Applies and immediately takes back `m`, reporting whether it is legal.
    pub fn try_move(&mut self, m: Move) -> bool {
        match self.apply(m) {
            Ok(()) => {
                self.undo();
                true
            }
            Err(_) => false,
        }
    }

    /// Takes back the last applied move and returns it, or `None` when no
    /// move has been applied since the position was set.
    pub fn undo(&mut self) -> Option<Move> {
        let m = self.history.pop()?;
        self.states.pop();
        let us = self.side_to_move.opposite();
        let them = self.side_to_move;
        self.side_to_move = us;

        self.set_piece(m.from, Some((m.piece, us)));
        match m.move_type {
            MoveType::Normal | MoveType::Promotion => {
                self.set_piece(m.to, m.captured.map(|p| (p, them)));
            }
            MoveType::EnPassant => {
                self.set_piece(m.to, None);
                self.set_piece(en_passant_victim(&m), Some((Piece::Pawn, them)));
            }
            MoveType::Castling => {
                self.set_piece(m.to, None);
                let (rook_from, rook_to) = castling_rook_squares(&m);
                self.set_piece(rook_to, None);
                self.set_piece(rook_from, Some((Piece::Rook, us)));
            }
        }
        Some(m)
    }

    /// Resolves UCI move text into the matching legal move.
    pub fn parse_move(&mut self, text: &str) -> Result<Move, MoveError> {
        let uci = UciMove::parse(text).ok_or_else(|| MoveError::InvalidUci(text.to_string()))?;
        let piece = match self.piece_at(uci.from) {
            Some((piece, color)) if color == self.side_to_move => piece,
            _ => return Err(MoveError::IllegalMove(text.to_string())),
        };
        movegen::moves(piece, uci.from, self)
            .iter()
            .find(|m| uci.matches(m))
            .copied()
            .ok_or_else(|| MoveError::IllegalMove(text.to_string()))
    }

    /// Parses and applies a UCI move, returning the resolved move.
    pub fn apply_uci(&mut self, text: &str) -> Result<Move, MoveError> {
        let m = self.parse_move(text)?;
        self.apply(m)?;
        Ok(m)
    }

    /// Checks the castling preconditions of `m` for the side to move: rights
    /// held, king and rook on their home squares, the squares between them
    /// empty, and the king neither in check nor passing over or landing on
    /// an attacked square.
    pub fn check_castling(&self, m: &Move) -> Result<(), MoveError> {
        if !self.variant.allows_castling() {
            return Err(MoveError::CastlingNotAllowed("variant has no castling"));
        }
        let us = self.side_to_move;
        let back = self.variant.back_rank(us);
        if m.piece != Piece::King || m.from != Square::new(File::E, back) {
            return Err(MoveError::CastlingNotAllowed("king is not on its home square"));
        }
        let side = match CastlingSide::from_king_target(m.to) {
            Some(side) if m.to.rank() == back => side,
            _ => return Err(MoveError::CastlingNotAllowed("invalid king destination")),
        };
        if !self.state().castling.has(us, side) {
            return Err(MoveError::CastlingNotAllowed("no castling right"));
        }
        let rook_from = Square::new(side.rook_from_file(), back);
        if self.piece_at(rook_from) != Some((Piece::Rook, us)) {
            return Err(MoveError::CastlingNotAllowed("rook is not on its home square"));
        }

        let (lo, hi) = match side {
            CastlingSide::KingSide => (m.from.file().index(), rook_from.file().index()),
            CastlingSide::QueenSide => (rook_from.file().index(), m.from.file().index()),
        };
        let blocked = (lo + 1..hi)
            .filter_map(File::from_index)
            .any(|f| self.piece_at(Square::new(f, back)).is_some());
        if blocked {
            return Err(MoveError::CastlingNotAllowed("path is blocked"));
        }

        let them = us.opposite();
        if self.attacked(m.from, them) {
            return Err(MoveError::CastlingNotAllowed("king is in check"));
        }
        let transit = Square::new(side.rook_to_file(), back);
        if self.attacked(transit, them) || self.attacked(m.to, them) {
            return Err(MoveError::CastlingNotAllowed(
                "king passes through an attacked square",
            ));
        }
        Ok(())
    }

    fn validate(&self, m: &Move) -> Result<(), MoveError> {
        for square in [m.from, m.to] {
            if !self.variant.contains(square) {
                return Err(MoveError::SquareOutsideBoard {
                    square,
                    variant: self.variant,
                });
            }
        }

        let us = self.side_to_move;
        match self.piece_at(m.from) {
            None => return Err(MoveError::EmptySquare(m.from)),
            Some((_, color)) if color != us => return Err(MoveError::WrongColor(m.from)),
            Some((found, _)) if found != m.piece => {
                return Err(MoveError::PieceMismatch {
                    square: m.from,
                    expected: m.piece,
                    found,
                })
            }
            Some(_) => {}
        }

        let target = self.piece_at(m.to);
        if let Some((_, color)) = target {
            if color == us {
                return Err(MoveError::OwnPieceOnTarget(m.to));
            }
        }

        let last_rank = m.to.rank() == self.variant.promotion_rank(us);
        match m.move_type {
            MoveType::Normal => {
                if m.promotion.is_some() {
                    return Err(MoveError::InvalidMoveType("promotion on a normal move"));
                }
                if m.piece == Piece::Pawn && last_rank {
                    return Err(MoveError::InvalidMoveType("pawn on the last rank must promote"));
                }
                if m.captured != target.map(|(p, _)| p) {
                    return Err(MoveError::CaptureMismatch(m.to));
                }
            }
            MoveType::Promotion => {
                if m.piece != Piece::Pawn || !last_rank {
                    return Err(MoveError::InvalidMoveType(
                        "only a pawn reaching the last rank promotes",
                    ));
                }
                match m.promotion {
                    Some(p) if self.variant.promotion_pieces().contains(&p) => {}
                    _ => {
                        return Err(MoveError::InvalidMoveType(
                            "promotion piece not allowed in this variant",
                        ))
                    }
                }
                if m.captured != target.map(|(p, _)| p) {
                    return Err(MoveError::CaptureMismatch(m.to));
                }
            }
            MoveType::EnPassant => {
                if m.piece != Piece::Pawn || self.state().en_passant != Some(m.to) {
                    return Err(MoveError::InvalidMoveType(
                        "en passant must target the en passant square",
                    ));
                }
                let victim = en_passant_victim(m);
                if target.is_some()
                    || m.captured != Some(Piece::Pawn)
                    || self.piece_at(victim) != Some((Piece::Pawn, us.opposite()))
                {
                    return Err(MoveError::CaptureMismatch(victim));
                }
            }
            MoveType::Castling => {
                if m.promotion.is_some() || m.captured.is_some() {
                    return Err(MoveError::InvalidMoveType("castling never captures"));
                }
                self.check_castling(m)?;
            }
        }
        Ok(())
    }

    #[inline]
    fn set_piece(&mut self, sq: Square, piece: Option<(Piece, Color)>) {
        self.board[sq.index() as usize] = piece;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Square of the pawn removed by an en passant capture: the destination
/// file on the origin rank.
fn en_passant_victim(m: &Move) -> Square {
    Square::new(m.to.file(), m.from.rank())
}

/// Rook origin and destination of a castling move.
fn castling_rook_squares(m: &Move) -> (Square, Square) {
    let rank = m.from.rank();
    match CastlingSide::from_king_target(m.to) {
        Some(CastlingSide::QueenSide) => (
            Square::new(CastlingSide::QueenSide.rook_from_file(), rank),
            Square::new(CastlingSide::QueenSide.rook_to_file(), rank),
        ),
        _ => (
            Square::new(CastlingSide::KingSide.rook_from_file(), rank),
            Square::new(CastlingSide::KingSide.rook_to_file(), rank),
        ),
    }
}
