//! Layered configuration: defaults, then a TOML file named by
//! `HOLDEM_CONFIG`, then `HOLDEM_*` environment variables. Command-line
//! flags are applied on top by each command.

use holdem_engine::config::TableConfig;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_points: u32,
    pub players: usize,
    pub seed: Option<u64>,
    /// Bot kind seated when `--bots` is not given
    pub bot: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub starting_points: ValueSource,
    pub players: ValueSource,
    pub seed: ValueSource,
    pub bot: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            starting_points: ValueSource::Default,
            players: ValueSource::Default,
            seed: ValueSource::Default,
            bot: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            starting_points: table.starting_points,
            players: 4,
            seed: None,
            bot: "baseline".into(),
        }
    }
}

impl Config {
    /// Table rules for these stakes. `seed` overrides the configured one.
    pub fn table_config(&self, seed: Option<u64>) -> TableConfig {
        TableConfig {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            starting_points: self.starting_points,
            seed: seed.or(self.seed),
            ..TableConfig::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.starting_points {
            cfg.starting_points = v;
            sources.starting_points = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.bot {
            cfg.bot = v;
            sources.bot = ValueSource::File;
        }
    }

    if let Some(v) = env_value("HOLDEM_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_BIG_BLIND")? {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_STARTING_POINTS")? {
        cfg.starting_points = v;
        sources.starting_points = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_PLAYERS")? {
        cfg.players = v;
        sources.players = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Ok(bot) = std::env::var("HOLDEM_BOT")
        && !bot.is_empty()
    {
        cfg.bot = bot;
        sources.bot = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid value for {}: {}", key, raw))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_points: Option<u32>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    bot: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let table = cfg.table_config(None);
    table
        .validate()
        .and_then(|_| table.validate_seats(cfg.players))
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    if holdem_ai::create_bot(&cfg.bot).is_err() {
        return Err(ConfigError::Invalid(format!("unknown bot `{}`", cfg.bot)));
    }
    Ok(())
}
