//! Game termination rules.
//!
//! Only conditions detectable from the current position are covered:
//! checkmate, stalemate, insufficient material and the move-count rules.

use crate::movegen::all_moves;
use crate::Position;
use chess_core::{Color, Piece};

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White wins (checkmate).
    WhiteWins,
    /// Black wins (checkmate).
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// Stalemate - no legal moves but not in check.
    Stalemate,
    /// Insufficient material to checkmate.
    InsufficientMaterial,
    /// 75-move rule (150 half-moves) - automatic draw.
    SeventyFiveMoveRule,
}

/// Halfmove clock at which a draw may be claimed.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Halfmove clock at which the game is drawn automatically.
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Returns the game result if the game is over, otherwise `None`.
///
/// Mate and stalemate take precedence over the move-count rule.
pub fn game_result(position: &mut Position) -> Option<GameResult> {
    if all_moves(position).is_empty() {
        if position.in_check() {
            return Some(match position.side_to_move() {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            });
        }
        return Some(GameResult::Draw(DrawReason::Stalemate));
    }

    if is_insufficient_material(position) {
        return Some(GameResult::Draw(DrawReason::InsufficientMaterial));
    }

    if position.state().halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES {
        return Some(GameResult::Draw(DrawReason::SeventyFiveMoveRule));
    }

    None
}

/// Returns true if the game is over.
pub fn is_game_over(position: &mut Position) -> bool {
    game_result(position).is_some()
}

pub fn is_checkmate(position: &mut Position) -> bool {
    position.in_check() && all_moves(position).is_empty()
}

pub fn is_stalemate(position: &mut Position) -> bool {
    !position.in_check() && all_moves(position).is_empty()
}

/// Returns true if the side to move may claim a draw under the fifty-move rule.
pub fn can_claim_fifty_moves(position: &Position) -> bool {
    position.state().halfmove_clock >= FIFTY_MOVE_PLIES
}

/// Returns true if neither side has material to deliver mate.
///
/// That is king versus king, king and one minor piece versus king, or any
/// number of bishops with all of them on squares of one color. Two knights
/// can still mate with help and do not qualify.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut minors = 0;
    let mut knights = 0;
    let mut bishop_colors = [false; 2];

    for color in Color::ALL {
        for (square, piece) in position.squares_of(color) {
            match piece {
                Piece::King => {}
                Piece::Pawn | Piece::Rook | Piece::Queen => return false,
                Piece::Knight => {
                    minors += 1;
                    knights += 1;
                }
                Piece::Bishop => {
                    minors += 1;
                    bishop_colors[square.is_dark() as usize] = true;
                }
            }
        }
    }

    match minors {
        0 | 1 => true,
        _ => knights == 0 && !(bishop_colors[0] && bishop_colors[1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn startpos_is_not_over() {
        let mut p = Position::startpos();
        assert_eq!(game_result(&mut p), None);
        assert!(!is_game_over(&mut p));
    }

    #[test]
    fn fools_mate() {
        let mut p = Position::startpos();
        for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            p.apply_uci(m).unwrap();
        }
        assert!(is_checkmate(&mut p));
        assert_eq!(game_result(&mut p), Some(GameResult::BlackWins));
    }

    #[test]
    fn back_rank_mate_for_white() {
        let mut p = pos("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert_eq!(game_result(&mut p), Some(GameResult::WhiteWins));
    }

    #[test]
    fn stalemate() {
        let mut p = pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(is_stalemate(&mut p));
        assert!(!is_checkmate(&mut p));
        assert_eq!(
            game_result(&mut p),
            Some(GameResult::Draw(DrawReason::Stalemate))
        );
    }

    #[test]
    fn insufficient_material_cases() {
        assert!(is_insufficient_material(&pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1")));
        assert!(is_insufficient_material(&pos("4k3/8/8/8/8/8/8/4KN2 w - - 0 1")));
        assert!(is_insufficient_material(&pos("4kb2/8/8/8/8/8/8/4K3 w - - 0 1")));
        // Bishops on c1 and f8 are both on dark squares.
        assert!(is_insufficient_material(&pos("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1")));
        // Opposite-colored bishops can mate.
        assert!(!is_insufficient_material(&pos("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1")));
        assert!(!is_insufficient_material(&pos("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1")));
        assert!(!is_insufficient_material(&pos("4kn2/8/8/8/8/8/8/4KB2 w - - 0 1")));
        assert!(!is_insufficient_material(&pos("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")));
    }

    #[test]
    fn insufficient_material_ends_the_game() {
        let mut p = pos("4k3/8/8/8/8/8/8/4KN2 w - - 0 1");
        assert_eq!(
            game_result(&mut p),
            Some(GameResult::Draw(DrawReason::InsufficientMaterial))
        );
    }

    #[test]
    fn move_count_rules() {
        let mut p = pos("4k3/8/8/8/8/8/8/R3K3 w - - 99 80");
        assert!(!can_claim_fifty_moves(&p));
        assert_eq!(game_result(&mut p), None);

        let mut p = pos("4k3/8/8/8/8/8/8/R3K3 w - - 100 80");
        assert!(can_claim_fifty_moves(&p));
        assert_eq!(game_result(&mut p), None);

        let mut p = pos("4k3/8/8/8/8/8/8/R3K3 w - - 150 100");
        assert_eq!(
            game_result(&mut p),
            Some(GameResult::Draw(DrawReason::SeventyFiveMoveRule))
        );
    }
}
