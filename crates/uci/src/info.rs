//! UCI info command types.

/// Score in centipawns or mate distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawn score (100 = 1 pawn advantage).
    Cp(i32),
    /// Mate in N moves (positive = engine winning, negative = engine losing).
    Mate(i32),
}

/// Search information from engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineInfo {
    /// Search depth in plies.
    pub depth: Option<u32>,
    /// Selective search depth.
    pub seldepth: Option<u32>,
    /// Index of the principal variation this line describes, starting at 1.
    pub multipv: Option<u32>,
    /// Score evaluation.
    pub score: Option<Score>,
    /// Nodes searched.
    pub nodes: Option<u64>,
    /// Nodes per second.
    pub nps: Option<u64>,
    /// Time spent in milliseconds.
    pub time: Option<u64>,
    /// Principal variation (best line found).
    pub pv: Vec<String>,
    /// Current move being searched.
    pub currmove: Option<String>,
    /// Current move number.
    pub currmovenumber: Option<u32>,
    /// Hash table usage (per mille).
    pub hashfull: Option<u32>,
    /// Arbitrary string info.
    pub string: Option<String>,
}

impl EngineInfo {
    /// Create a new empty info.
    pub fn new() -> Self {
        Self::default()
    }

    /// Format as UCI info string.
    pub fn to_uci(&self) -> String {
        let mut parts = vec!["info".to_string()];

        let mut number = |name: &str, value: Option<u64>| {
            if let Some(v) = value {
                parts.push(format!("{} {}", name, v));
            }
        };
        number("depth", self.depth.map(u64::from));
        number("seldepth", self.seldepth.map(u64::from));
        number("multipv", self.multipv.map(u64::from));

        match self.score {
            Some(Score::Cp(cp)) => parts.push(format!("score cp {}", cp)),
            Some(Score::Mate(m)) => parts.push(format!("score mate {}", m)),
            None => {}
        }

        let mut number = |name: &str, value: Option<u64>| {
            if let Some(v) = value {
                parts.push(format!("{} {}", name, v));
            }
        };
        number("nodes", self.nodes);
        number("nps", self.nps);
        number("time", self.time);
        number("hashfull", self.hashfull.map(u64::from));

        if let Some(ref m) = self.currmove {
            parts.push(format!("currmove {}", m));
        }
        if let Some(n) = self.currmovenumber {
            parts.push(format!("currmovenumber {}", n));
        }
        if !self.pv.is_empty() {
            parts.push(format!("pv {}", self.pv.join(" ")));
        }
        // `string` swallows the rest of the line, so it goes last.
        if let Some(ref s) = self.string {
            parts.push(format!("string {}", s));
        }

        parts.join(" ")
    }

    /// Parse UCI info line. Unknown keywords and unparsable values are skipped.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().peekable();
        if tokens.next() != Some("info") {
            return None;
        }

        let mut info = EngineInfo::new();

        while let Some(token) = tokens.next() {
            match token {
                "depth" => info.depth = tokens.next().and_then(|s| s.parse().ok()),
                "seldepth" => info.seldepth = tokens.next().and_then(|s| s.parse().ok()),
                "multipv" => info.multipv = tokens.next().and_then(|s| s.parse().ok()),
                "nodes" => info.nodes = tokens.next().and_then(|s| s.parse().ok()),
                "nps" => info.nps = tokens.next().and_then(|s| s.parse().ok()),
                "time" => info.time = tokens.next().and_then(|s| s.parse().ok()),
                "hashfull" => info.hashfull = tokens.next().and_then(|s| s.parse().ok()),
                "currmove" => info.currmove = tokens.next().map(str::to_string),
                "currmovenumber" => {
                    info.currmovenumber = tokens.next().and_then(|s| s.parse().ok())
                }
                "score" => {
                    let kind = tokens.next();
                    let value = tokens.next().and_then(|s| s.parse().ok());
                    info.score = match (kind, value) {
                        (Some("cp"), Some(v)) => Some(Score::Cp(v)),
                        (Some("mate"), Some(v)) => Some(Score::Mate(v)),
                        _ => info.score,
                    };
                    // Bounds are reported but not tracked.
                    while matches!(tokens.peek(), Some(&"lowerbound") | Some(&"upperbound")) {
                        tokens.next();
                    }
                }
                "pv" => {
                    info.pv.clear();
                    while let Some(&next) = tokens.peek() {
                        if is_info_keyword(next) {
                            break;
                        }
                        info.pv.push(next.to_string());
                        tokens.next();
                    }
                }
                "string" => {
                    let rest: Vec<&str> = tokens.by_ref().collect();
                    info.string = Some(rest.join(" "));
                }
                _ => {}
            }
        }

        Some(info)
    }
}

fn is_info_keyword(s: &str) -> bool {
    matches!(
        s,
        "depth"
            | "seldepth"
            | "multipv"
            | "score"
            | "nodes"
            | "nps"
            | "time"
            | "pv"
            | "currmove"
            | "currmovenumber"
            | "hashfull"
            | "tbhits"
            | "cpuload"
            | "string"
    )
}

/// Builder for constructing EngineInfo.
#[derive(Default)]
pub struct InfoBuilder {
    info: EngineInfo,
}

impl InfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(mut self, d: u32) -> Self {
        self.info.depth = Some(d);
        self
    }

    pub fn multipv(mut self, n: u32) -> Self {
        self.info.multipv = Some(n);
        self
    }

    pub fn score_cp(mut self, cp: i32) -> Self {
        self.info.score = Some(Score::Cp(cp));
        self
    }

    pub fn score_mate(mut self, moves: i32) -> Self {
        self.info.score = Some(Score::Mate(moves));
        self
    }

    pub fn nodes(mut self, n: u64) -> Self {
        self.info.nodes = Some(n);
        self
    }

    pub fn time(mut self, ms: u64) -> Self {
        self.info.time = Some(ms);
        self
    }

    pub fn pv(mut self, moves: Vec<String>) -> Self {
        self.info.pv = moves;
        self
    }

    pub fn string(mut self, s: &str) -> Self {
        self.info.string = Some(s.to_string());
        self
    }

    pub fn build(self) -> EngineInfo {
        self.info
    }
}
