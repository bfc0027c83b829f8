//! Engine and registry configuration loaded from TOML.
//!
//! ```toml
//! ready_timeout_ms = 5000
//!
//! [engines.stockfish]
//! path = "/usr/bin/stockfish"
//! kind = "stockfish"
//! multipv = 3
//! options = { Threads = 4, Hash = 256 }
//!
//! [engines.fairy]
//! path = "fairy-stockfish"
//! kind = "fairy-stockfish"
//! variant = "los-alamos"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chess_core::Variant;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Requested engine was not found in the configuration.
    #[error("Engine not found: {0}")]
    EngineNotFound(String),
}

/// Family of the engine binary, which decides the options sent on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    /// Any UCI engine. Nothing beyond the explicit options is sent.
    #[default]
    Generic,
    Stockfish,
    Lc0,
    FairyStockfish,
}

impl EngineKind {
    /// Options this kind of engine needs for `variant` and `multipv` lines.
    pub fn default_options(self, variant: Variant, multipv: u32) -> Vec<(String, OptionValue)> {
        let multipv = ("MultiPV".to_string(), OptionValue::Int(i64::from(multipv)));
        match self {
            EngineKind::Generic => Vec::new(),
            EngineKind::Stockfish | EngineKind::Lc0 => vec![multipv],
            EngineKind::FairyStockfish => vec![
                (
                    "UCI_Variant".to_string(),
                    OptionValue::Text(variant.uci_name().to_string()),
                ),
                multipv,
            ],
        }
    }
}

/// Value of a UCI option as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One engine to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to the engine executable.
    pub path: PathBuf,
    /// Command line arguments.
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub kind: EngineKind,
    #[serde(default)]
    pub variant: Variant,
    /// Number of principal variations to request. Defaults to 1.
    #[serde(default = "default_multipv")]
    pub multipv: u32,
    /// Explicit UCI options. These override kind defaults of the same name.
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
}

fn default_multipv() -> u32 {
    1
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EngineConfig {
            path: path.into(),
            args: Vec::new(),
            kind: EngineKind::default(),
            variant: Variant::default(),
            multipv: default_multipv(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_kind(mut self, kind: EngineKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_multipv(mut self, multipv: u32) -> Self {
        self.multipv = multipv;
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    /// All `setoption` pairs to send after `uci`, kind defaults first.
    ///
    /// UCI option names are case-insensitive, so an explicit option replaces
    /// a default regardless of case.
    pub fn uci_options(&self) -> Vec<(String, String)> {
        let mut options = self.kind.default_options(self.variant, self.multipv);
        for (name, value) in &self.options {
            match options
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                Some(slot) => slot.1 = value.clone(),
                None => options.push((name.clone(), value.clone())),
            }
        }
        options
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect()
    }
}

/// Registry configuration: timeouts and named engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicatorConfig {
    /// Upper bound for an `isready` round trip.
    #[serde(default = "default_ready_timeout_ms")]
    pub ready_timeout_ms: u64,
    #[serde(default)]
    pub engines: HashMap<String, EngineConfig>,
}

fn default_ready_timeout_ms() -> u64 {
    5000
}

impl Default for CommunicatorConfig {
    fn default() -> Self {
        CommunicatorConfig {
            ready_timeout_ms: default_ready_timeout_ms(),
            engines: HashMap::new(),
        }
    }
}

impl CommunicatorConfig {
    /// Loads configuration from `path`, or the defaults if the file is absent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    pub fn get_engine(&self, name: &str) -> Result<&EngineConfig, ConfigError> {
        self.engines
            .get(name)
            .ok_or_else(|| ConfigError::EngineNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
ready_timeout_ms = 750

[engines.stockfish]
path = "/usr/bin/stockfish"
kind = "stockfish"
multipv = 3
options = { Threads = 4, Hash = 256, Ponder = false }

[engines.fairy]
path = "fairy-stockfish"
args = ["--nnue", "off"]
kind = "fairy-stockfish"
variant = "los-alamos"

[engines.plain]
path = "./engine"
"#;

    #[test]
    fn parses_full_config() {
        let config = CommunicatorConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.ready_timeout(), Duration::from_millis(750));
        assert_eq!(config.engines.len(), 3);

        let sf = config.get_engine("stockfish").unwrap();
        assert_eq!(sf.kind, EngineKind::Stockfish);
        assert_eq!(sf.multipv, 3);
        assert_eq!(sf.options.get("Threads"), Some(&OptionValue::Int(4)));
        assert_eq!(sf.options.get("Ponder"), Some(&OptionValue::Bool(false)));

        let fairy = config.get_engine("fairy").unwrap();
        assert_eq!(fairy.variant, Variant::LosAlamos);
        assert_eq!(fairy.args, vec!["--nnue", "off"]);
    }

    #[test]
    fn defaults_for_missing_fields() {
        let config = CommunicatorConfig::from_toml_str(SAMPLE).unwrap();
        let plain = config.get_engine("plain").unwrap();
        assert_eq!(plain, &EngineConfig::new("./engine"));
        assert!(plain.uci_options().is_empty());

        let empty = CommunicatorConfig::from_toml_str("").unwrap();
        assert_eq!(empty, CommunicatorConfig::default());
        assert_eq!(empty.ready_timeout_ms, 5000);
    }

    #[test]
    fn unknown_engine_is_an_error() {
        let config = CommunicatorConfig::default();
        match config.get_engine("komodo") {
            Err(ConfigError::EngineNotFound(name)) => assert_eq!(name, "komodo"),
            other => panic!("Expected EngineNotFound, got {:?}", other),
        }
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let result = CommunicatorConfig::from_toml_str("[engines.x]\nkind = \"stockfish\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
        let result = CommunicatorConfig::from_toml_str("[engines.x]\npath = \"e\"\nkind = \"crafty\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn kind_defaults_and_overrides() {
        let sf = EngineConfig::new("sf")
            .with_kind(EngineKind::Stockfish)
            .with_multipv(4)
            .with_option("Threads", OptionValue::Int(2));
        assert_eq!(
            sf.uci_options(),
            vec![
                ("MultiPV".to_string(), "4".to_string()),
                ("Threads".to_string(), "2".to_string()),
            ]
        );

        let fairy = EngineConfig::new("fsf")
            .with_kind(EngineKind::FairyStockfish)
            .with_variant(Variant::Gardner)
            .with_option("multipv", OptionValue::Int(2));
        assert_eq!(
            fairy.uci_options(),
            vec![
                ("UCI_Variant".to_string(), "gardner".to_string()),
                ("MultiPV".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn load_reads_file_or_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engines.toml");
        assert_eq!(
            CommunicatorConfig::load(&path).unwrap(),
            CommunicatorConfig::default()
        );

        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        drop(file);
        let config = CommunicatorConfig::load(&path).unwrap();
        assert_eq!(config.ready_timeout_ms, 750);
    }

    #[test]
    fn engine_config_round_trips_through_toml() {
        let engine = EngineConfig::new("/opt/lc0")
            .with_kind(EngineKind::Lc0)
            .with_option("WeightsFile", OptionValue::Text("net.pb".to_string()));
        let text = toml::to_string(&engine).unwrap();
        let back: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, engine);
    }
}
