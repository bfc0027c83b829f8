//! Principal variations reported by an engine.

use uci::{EngineInfo, Score};

/// One ranked line of a search: score, depth and the moves of the variation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based multipv index.
    pub multipv: u32,
    pub depth: u32,
    /// Centipawns, or the signed mate distance when `is_mate`.
    pub eval: i32,
    pub is_mate: bool,
    /// UCI move strings, best first.
    pub moves: Vec<String>,
}

impl Line {
    /// Builds a line from an `info` message that carries both a score and a pv.
    pub fn from_info(info: &EngineInfo) -> Option<Line> {
        let score = info.score?;
        if info.pv.is_empty() {
            return None;
        }
        let (eval, is_mate) = match score {
            Score::Cp(cp) => (cp, false),
            Score::Mate(m) => (m, true),
        };
        Some(Line {
            multipv: info.multipv.unwrap_or(1).max(1),
            depth: info.depth.unwrap_or(0),
            eval,
            is_mate,
            moves: info.pv.clone(),
        })
    }

    pub fn score(&self) -> Score {
        if self.is_mate {
            Score::Mate(self.eval)
        } else {
            Score::Cp(self.eval)
        }
    }

    pub fn best_move(&self) -> Option<&str> {
        self.moves.first().map(String::as_str)
    }

    /// Mate distance in moves, negative when the engine is being mated.
    pub fn mate_in(&self) -> Option<i32> {
        self.is_mate.then_some(self.eval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(line: &str) -> EngineInfo {
        EngineInfo::parse(line).unwrap()
    }

    #[test]
    fn builds_from_scored_pv() {
        let line = Line::from_info(&info("info depth 14 multipv 2 score cp -35 pv g8f6 c2c4")).unwrap();
        assert_eq!(line.multipv, 2);
        assert_eq!(line.depth, 14);
        assert_eq!(line.score(), Score::Cp(-35));
        assert_eq!(line.best_move(), Some("g8f6"));
        assert_eq!(line.mate_in(), None);
    }

    #[test]
    fn mate_scores() {
        let line = Line::from_info(&info("info depth 9 score mate 3 pv d1h5 g7g6 h5e5")).unwrap();
        assert_eq!(line.multipv, 1);
        assert!(line.is_mate);
        assert_eq!(line.mate_in(), Some(3));
    }

    #[test]
    fn skips_incomplete_info() {
        assert!(Line::from_info(&info("info depth 3 currmove e2e4 currmovenumber 1")).is_none());
        assert!(Line::from_info(&info("info depth 3 score cp 12")).is_none());
        assert!(Line::from_info(&info("info pv e2e4")).is_none());
    }
}
