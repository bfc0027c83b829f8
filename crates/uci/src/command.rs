//! Commands sent from the GUI side to an engine.

use crate::UciError;

/// Commands sent from GUI to engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiCommand {
    /// Initialize UCI mode.
    Uci,
    /// Check if engine is ready.
    IsReady,
    /// The next position belongs to a different game.
    UciNewGame,
    /// Set an engine option. `value` is absent for button options.
    SetOption { name: String, value: Option<String> },
    /// Set up position. `fen: None` means the standard start position.
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    /// Start calculating.
    Go(GoOptions),
    /// Stop calculating.
    Stop,
    /// Quit the engine.
    Quit,
    /// Unknown command (for forward compatibility).
    Unknown(String),
}

/// Options for the `go` command.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoOptions {
    /// Search for exactly this time in milliseconds.
    pub movetime: Option<u64>,
    /// Search to this depth.
    pub depth: Option<u32>,
    /// Search for a mate in this many moves.
    pub mate: Option<u32>,
    /// White time remaining in milliseconds.
    pub wtime: Option<u64>,
    /// Black time remaining in milliseconds.
    pub btime: Option<u64>,
    /// White increment per move in milliseconds.
    pub winc: Option<u64>,
    /// Black increment per move in milliseconds.
    pub binc: Option<u64>,
    /// Moves to go until next time control.
    pub movestogo: Option<u32>,
    /// Search indefinitely until `stop`.
    pub infinite: bool,
}

impl GoOptions {
    pub fn movetime(ms: u64) -> Self {
        GoOptions {
            movetime: Some(ms),
            ..Default::default()
        }
    }

    pub fn depth(depth: u32) -> Self {
        GoOptions {
            depth: Some(depth),
            ..Default::default()
        }
    }

    /// Formats the options as `go` arguments, e.g. `go depth 12`.
    pub fn to_uci(&self) -> String {
        let mut out = String::from("go");
        let numeric: [(&str, Option<u64>); 8] = [
            ("wtime", self.wtime),
            ("btime", self.btime),
            ("winc", self.winc),
            ("binc", self.binc),
            ("movestogo", self.movestogo.map(u64::from)),
            ("depth", self.depth.map(u64::from)),
            ("mate", self.mate.map(u64::from)),
            ("movetime", self.movetime),
        ];
        for (name, value) in numeric {
            if let Some(v) = value {
                out.push_str(&format!(" {} {}", name, v));
            }
        }
        if self.infinite {
            out.push_str(" infinite");
        }
        out
    }
}

impl GuiCommand {
    /// Parse a UCI command string.
    pub fn parse(input: &str) -> Result<Self, UciError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = parts.next().unwrap_or("");

        match cmd {
            "uci" => Ok(GuiCommand::Uci),
            "isready" => Ok(GuiCommand::IsReady),
            "ucinewgame" => Ok(GuiCommand::UciNewGame),
            "setoption" => Self::parse_setoption(parts),
            "stop" => Ok(GuiCommand::Stop),
            "quit" => Ok(GuiCommand::Quit),
            "position" => Self::parse_position(parts),
            "go" => Ok(GuiCommand::Go(Self::parse_go(parts))),
            _ => Ok(GuiCommand::Unknown(input.to_string())),
        }
    }

    /// Formats the command as one protocol line, without the newline.
    pub fn to_uci(&self) -> String {
        match self {
            GuiCommand::Uci => "uci".to_string(),
            GuiCommand::IsReady => "isready".to_string(),
            GuiCommand::UciNewGame => "ucinewgame".to_string(),
            GuiCommand::SetOption { name, value } => match value {
                Some(v) => format!("setoption name {} value {}", name, v),
                None => format!("setoption name {}", name),
            },
            GuiCommand::Position { fen, moves } => {
                let mut out = match fen {
                    Some(f) => format!("position fen {}", f),
                    None => "position startpos".to_string(),
                };
                if !moves.is_empty() {
                    out.push_str(" moves ");
                    out.push_str(&moves.join(" "));
                }
                out
            }
            GuiCommand::Go(opts) => opts.to_uci(),
            GuiCommand::Stop => "stop".to_string(),
            GuiCommand::Quit => "quit".to_string(),
            GuiCommand::Unknown(s) => s.clone(),
        }
    }

    fn parse_setoption<'a>(parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        let parts: Vec<&str> = parts.collect();
        if parts.first() != Some(&"name") {
            return Err(UciError::ParseError(
                "setoption: expected 'name'".to_string(),
            ));
        }
        let rest = &parts[1..];
        let value_at = rest.iter().position(|&s| s == "value");
        let (name, value) = match value_at {
            Some(idx) => (rest[..idx].join(" "), Some(rest[idx + 1..].join(" "))),
            None => (rest.join(" "), None),
        };
        if name.is_empty() {
            return Err(UciError::ParseError("setoption: empty name".to_string()));
        }
        Ok(GuiCommand::SetOption { name, value })
    }

    fn parse_position<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        let fen = match parts.next() {
            Some("startpos") => {
                // Skip ahead to an optional "moves" keyword.
                for part in parts.by_ref() {
                    if part == "moves" {
                        break;
                    }
                }
                None
            }
            Some("fen") => {
                let mut fen_parts = Vec::new();
                for part in parts.by_ref() {
                    if part == "moves" {
                        break;
                    }
                    fen_parts.push(part);
                }
                if fen_parts.is_empty() {
                    return Err(UciError::ParseError("position fen: missing FEN".to_string()));
                }
                Some(fen_parts.join(" "))
            }
            Some(other) => {
                return Err(UciError::ParseError(format!(
                    "Expected 'startpos' or 'fen', got '{}'",
                    other
                )));
            }
            None => {
                return Err(UciError::ParseError(
                    "Expected 'startpos' or 'fen'".to_string(),
                ));
            }
        };

        let moves = parts.map(str::to_string).collect();
        Ok(GuiCommand::Position { fen, moves })
    }

    fn parse_go<'a>(parts: impl Iterator<Item = &'a str>) -> GoOptions {
        let mut opts = GoOptions::default();
        let mut parts = parts.peekable();

        fn number<'a, T: std::str::FromStr>(
            parts: &mut std::iter::Peekable<impl Iterator<Item = &'a str>>,
        ) -> Option<T> {
            parts.next().and_then(|s| s.parse().ok())
        }

        while let Some(token) = parts.next() {
            match token {
                "movetime" => opts.movetime = number(&mut parts),
                "depth" => opts.depth = number(&mut parts),
                "mate" => opts.mate = number(&mut parts),
                "wtime" => opts.wtime = number(&mut parts),
                "btime" => opts.btime = number(&mut parts),
                "winc" => opts.winc = number(&mut parts),
                "binc" => opts.binc = number(&mut parts),
                "movestogo" => opts.movestogo = number(&mut parts),
                "infinite" => opts.infinite = true,
                _ => {}
            }
        }

        opts
    }
}
