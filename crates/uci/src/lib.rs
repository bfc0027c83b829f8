//! UCI (Universal Chess Interface) protocol library.
//!
//! This crate provides types, parsing and formatting for both directions of the
//! UCI protocol: [`GuiCommand`] for what a GUI (or engine driver) sends, and
//! [`EngineMessage`] for what the engine answers.
//!
//! # Commands used
//!
//! - `uci` / `uciok` - Initialize engine, get id and options
//! - `isready` / `readyok` - Synchronization
//! - `ucinewgame` - Next position starts a new game
//! - `setoption name <n> [value <v>]` - Configure the engine
//! - `position startpos|fen <fen> [moves <move>...]` - Set position
//! - `go [movetime <ms>] [depth <d>] ...` / `bestmove` - Search
//! - `stop` - Stop search
//! - `quit` - Exit engine
//!
//! ```
//! use uci::{EngineMessage, Score};
//!
//! let msg = EngineMessage::parse("info depth 8 multipv 1 score cp 21 pv e2e4 e7e5");
//! let EngineMessage::Info(info) = msg else { unreachable!() };
//! assert_eq!(info.score, Some(Score::Cp(21)));
//! ```

mod command;
mod info;

pub use command::{GoOptions, GuiCommand};
pub use info::{EngineInfo, InfoBuilder, Score};

use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UciError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Messages sent from engine to GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    /// Engine identification.
    Id {
        name: Option<String>,
        author: Option<String>,
    },
    /// UCI initialization complete.
    UciOk,
    /// Engine is ready.
    ReadyOk,
    /// Search information.
    Info(EngineInfo),
    /// Best move found. `"(none)"` or `"0000"` when there is no legal move.
    BestMove { mv: String, ponder: Option<String> },
    /// Option declaration, kept as the text after `option`.
    Option(String),
    /// Anything else the engine printed.
    Unknown(String),
}

impl EngineMessage {
    /// Parse one line of engine output. Never fails: unrecognised lines
    /// become [`EngineMessage::Unknown`].
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((k, r)) => (k, r.trim_start()),
            None => (line, ""),
        };

        match keyword {
            "uciok" => EngineMessage::UciOk,
            "readyok" => EngineMessage::ReadyOk,
            "option" => EngineMessage::Option(rest.to_string()),
            "info" => match EngineInfo::parse(line) {
                Some(info) => EngineMessage::Info(info),
                None => EngineMessage::Unknown(line.to_string()),
            },
            "bestmove" => {
                let mut tokens = rest.split_whitespace();
                match tokens.next() {
                    Some(mv) => {
                        let ponder = match tokens.next() {
                            Some("ponder") => tokens.next().map(str::to_string),
                            _ => None,
                        };
                        EngineMessage::BestMove {
                            mv: mv.to_string(),
                            ponder,
                        }
                    }
                    None => EngineMessage::Unknown(line.to_string()),
                }
            }
            "id" => match rest.split_once(char::is_whitespace) {
                Some(("name", value)) => EngineMessage::Id {
                    name: Some(value.trim().to_string()),
                    author: None,
                },
                Some(("author", value)) => EngineMessage::Id {
                    name: None,
                    author: Some(value.trim().to_string()),
                },
                _ => EngineMessage::Unknown(line.to_string()),
            },
            _ => EngineMessage::Unknown(line.to_string()),
        }
    }

    /// Format message for output.
    pub fn to_uci(&self) -> String {
        match self {
            EngineMessage::Id { name, author } => {
                let mut parts = Vec::new();
                if let Some(n) = name {
                    parts.push(format!("id name {}", n));
                }
                if let Some(a) = author {
                    parts.push(format!("id author {}", a));
                }
                parts.join("\n")
            }
            EngineMessage::UciOk => "uciok".to_string(),
            EngineMessage::ReadyOk => "readyok".to_string(),
            EngineMessage::Info(info) => info.to_uci(),
            EngineMessage::BestMove { mv, ponder } => match ponder {
                Some(p) => format!("bestmove {} ponder {}", mv, p),
                None => format!("bestmove {}", mv),
            },
            EngineMessage::Option(text) => format!("option {}", text),
            EngineMessage::Unknown(text) => text.clone(),
        }
    }
}

/// Simple UCI engine wrapper for writing engines.
pub struct UciEngine<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> UciEngine<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read and parse the next command from GUI. End of input reads as `quit`.
    pub fn read_command(&mut self) -> Result<GuiCommand, UciError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(GuiCommand::Quit);
        }
        GuiCommand::parse(&line)
    }

    /// Send a message to the GUI.
    pub fn send(&mut self, msg: &EngineMessage) -> Result<(), UciError> {
        writeln!(self.writer, "{}", msg.to_uci())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Send engine identification.
    pub fn send_id(&mut self, name: &str, author: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::Id {
            name: Some(name.to_string()),
            author: Some(author.to_string()),
        })
    }

    /// Declare an option, e.g. `name MultiPV type spin default 1 min 1 max 500`.
    pub fn send_option(&mut self, declaration: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::Option(declaration.to_string()))
    }

    /// Send uciok.
    pub fn send_uciok(&mut self) -> Result<(), UciError> {
        self.send(&EngineMessage::UciOk)
    }

    /// Send readyok.
    pub fn send_readyok(&mut self) -> Result<(), UciError> {
        self.send(&EngineMessage::ReadyOk)
    }

    /// Send best move.
    pub fn send_bestmove(&mut self, mv: &str, ponder: Option<&str>) -> Result<(), UciError> {
        self.send(&EngineMessage::BestMove {
            mv: mv.to_string(),
            ponder: ponder.map(str::to_string),
        })
    }

    /// Send search info.
    pub fn send_info(&mut self, info: EngineInfo) -> Result<(), UciError> {
        self.send(&EngineMessage::Info(info))
    }

    /// Consumes the wrapper, returning the underlying writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Create a UCI engine using stdin/stdout.
pub fn stdio_engine() -> UciEngine<std::io::BufReader<std::io::Stdin>, std::io::Stdout> {
    UciEngine::new(
        std::io::BufReader::new(std::io::stdin()),
        std::io::stdout(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_handshake_messages() {
        assert_eq!(EngineMessage::parse("uciok\n"), EngineMessage::UciOk);
        assert_eq!(EngineMessage::parse("  readyok "), EngineMessage::ReadyOk);
        assert_eq!(
            EngineMessage::parse("id name Stockfish 17"),
            EngineMessage::Id {
                name: Some("Stockfish 17".to_string()),
                author: None
            }
        );
        assert_eq!(
            EngineMessage::parse("id author the Stockfish developers"),
            EngineMessage::Id {
                name: None,
                author: Some("the Stockfish developers".to_string())
            }
        );
        assert_eq!(
            EngineMessage::parse("option name Hash type spin default 16 min 1 max 33554432"),
            EngineMessage::Option("name Hash type spin default 16 min 1 max 33554432".to_string())
        );
    }

    #[test]
    fn parse_bestmove() {
        assert_eq!(
            EngineMessage::parse("bestmove e2e4 ponder e7e5"),
            EngineMessage::BestMove {
                mv: "e2e4".to_string(),
                ponder: Some("e7e5".to_string())
            }
        );
        assert_eq!(
            EngineMessage::parse("bestmove a7a8q"),
            EngineMessage::BestMove {
                mv: "a7a8q".to_string(),
                ponder: None
            }
        );
        assert_eq!(
            EngineMessage::parse("bestmove"),
            EngineMessage::Unknown("bestmove".to_string())
        );
    }

    #[test]
    fn parse_info_line() {
        let EngineMessage::Info(info) =
            EngineMessage::parse("info depth 5 multipv 2 score mate 2 pv h5f7")
        else {
            panic!("expected info");
        };
        assert_eq!(info.depth, Some(5));
        assert_eq!(info.multipv, Some(2));
        assert_eq!(info.score, Some(Score::Mate(2)));
        assert_eq!(info.pv, vec!["h5f7"]);
    }

    #[test]
    fn unknown_lines_are_kept() {
        assert_eq!(
            EngineMessage::parse("Stockfish 17 by the Stockfish developers"),
            EngineMessage::Unknown("Stockfish 17 by the Stockfish developers".to_string())
        );
        assert_eq!(EngineMessage::parse(""), EngineMessage::Unknown(String::new()));
    }

    #[test]
    fn engine_wrapper_round_trip() {
        let input = Cursor::new("uci\nisready\n");
        let mut engine = UciEngine::new(input, Vec::new());

        assert_eq!(engine.read_command().unwrap(), GuiCommand::Uci);
        engine.send_id("stub", "nobody").unwrap();
        engine.send_uciok().unwrap();
        assert_eq!(engine.read_command().unwrap(), GuiCommand::IsReady);
        engine.send_readyok().unwrap();
        engine.send_bestmove("e2e4", Some("e7e5")).unwrap();
        // Input is exhausted.
        assert_eq!(engine.read_command().unwrap(), GuiCommand::Quit);

        let output = String::from_utf8(engine.into_writer()).unwrap();
        let messages: Vec<EngineMessage> = output.lines().map(EngineMessage::parse).collect();
        assert_eq!(
            messages,
            vec![
                EngineMessage::Id {
                    name: Some("stub".to_string()),
                    author: None
                },
                EngineMessage::Id {
                    name: None,
                    author: Some("nobody".to_string())
                },
                EngineMessage::UciOk,
                EngineMessage::ReadyOk,
                EngineMessage::BestMove {
                    mv: "e2e4".to_string(),
                    ponder: Some("e7e5".to_string())
                },
            ]
        );
    }
}
