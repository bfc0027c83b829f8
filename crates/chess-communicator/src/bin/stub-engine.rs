//! Scriptable UCI engine for exercising the communicator.
//!
//! With `--moves` it reports those moves as its principal variations and
//! best move. Without it, it tracks the position it is given and answers
//! with the first legal moves in generation order.

use std::thread;
use std::time::Duration;

use chess_core::Variant;
use chess_engine::{movegen, Position};
use clap::Parser;
use uci::{stdio_engine, GuiCommand, InfoBuilder, UciError};

#[derive(Parser)]
#[command(name = "stub-engine")]
#[command(about = "Minimal UCI engine with scripted answers")]
struct Args {
    /// Comma separated moves to report instead of legal moves.
    #[arg(long, value_delimiter = ',')]
    moves: Vec<String>,

    /// Milliseconds to "think" before answering `go`.
    #[arg(long, default_value = "0")]
    delay_ms: u64,

    /// Never answer `isready`.
    #[arg(long)]
    mute: bool,

    /// Exit as soon as a search is requested.
    #[arg(long)]
    exit_on_go: bool,

    /// Name reported in `id name`.
    #[arg(long, default_value = "stub-engine")]
    name: String,
}

struct State {
    variant: Variant,
    multipv: usize,
    position: Position,
}

impl State {
    fn set_position(&mut self, fen: Option<&str>, moves: &[String]) {
        let position = match fen {
            Some(fen) => Position::from_fen_variant(fen, self.variant),
            None => Ok(Position::new(self.variant)),
        };
        self.position = match position {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("bad position: {}", e);
                Position::new(self.variant)
            }
        };
        for m in moves {
            if let Err(e) = self.position.apply_uci(m) {
                tracing::warn!("bad move {}: {}", m, e);
                break;
            }
        }
    }

    /// Candidate variations, best first.
    fn lines(&mut self, scripted: &[String]) -> Vec<Vec<String>> {
        if scripted.is_empty() {
            movegen::all_moves(&mut self.position)
                .iter()
                .take(self.multipv)
                .map(|m| vec![m.to_uci()])
                .collect()
        } else {
            (0..scripted.len().min(self.multipv))
                .map(|k| scripted[k..].to_vec())
                .collect()
        }
    }
}

fn main() -> Result<(), UciError> {
    chess_communicator::init_tracing("info");
    let args = Args::parse();
    let mut engine = stdio_engine();
    let mut state = State {
        variant: Variant::Standard,
        multipv: 1,
        position: Position::startpos(),
    };

    loop {
        let cmd = match engine.read_command() {
            Ok(cmd) => cmd,
            Err(e @ UciError::IoError(_)) => return Err(e),
            Err(e) => {
                tracing::warn!("Error reading command: {}", e);
                continue;
            }
        };

        match cmd {
            GuiCommand::Uci => {
                engine.send_id(&args.name, "chess-devtools")?;
                engine.send_option("name MultiPV type spin default 1 min 1 max 16")?;
                engine.send_option("name UCI_Variant type combo default chess var chess var losalamos var gardner")?;
                engine.send_uciok()?;
            }
            GuiCommand::IsReady => {
                if !args.mute {
                    engine.send_readyok()?;
                }
            }
            GuiCommand::UciNewGame => state.set_position(None, &[]),
            GuiCommand::SetOption { name, value } => {
                let value = value.unwrap_or_default();
                if name.eq_ignore_ascii_case("MultiPV") {
                    state.multipv = value.parse::<usize>().unwrap_or(1).max(1);
                } else if name.eq_ignore_ascii_case("UCI_Variant") {
                    match value.parse::<Variant>() {
                        Ok(variant) => {
                            state.variant = variant;
                            state.set_position(None, &[]);
                        }
                        Err(e) => tracing::warn!("{}", e),
                    }
                }
            }
            GuiCommand::Position { fen, moves } => state.set_position(fen.as_deref(), &moves),
            GuiCommand::Go(_) => {
                if args.exit_on_go {
                    tracing::info!("exiting on go");
                    break;
                }
                thread::sleep(Duration::from_millis(args.delay_ms));

                let lines = state.lines(&args.moves);
                for (k, pv) in lines.iter().enumerate() {
                    let info = InfoBuilder::new()
                        .depth(1)
                        .multipv(k as u32 + 1)
                        .score_cp(50 - 10 * k as i32)
                        .nodes(1)
                        .pv(pv.clone())
                        .build();
                    engine.send_info(info)?;
                }
                match lines.first() {
                    Some(pv) => engine.send_bestmove(&pv[0], pv.get(1).map(String::as_str))?,
                    None => engine.send_bestmove("(none)", None)?,
                }
            }
            GuiCommand::Stop => {}
            GuiCommand::Quit => break,
            GuiCommand::Unknown(text) => {
                if !text.is_empty() {
                    tracing::debug!("ignored: {}", text);
                }
            }
        }
    }
    Ok(())
}
