//! Table configuration: defaults, an optional TOML file named by
//! `RIVERHOLD_CONFIG`, then `RIVERHOLD_*` environment overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Blinds;
use crate::evaluator::{MonteCarlo, DEFAULT_TRIALS};
use crate::player::STARTING_STACK;

pub const CONFIG_ENV: &str = "RIVERHOLD_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    /// Stacks below this sit out between hands
    pub min_continuable_stack: u32,
    pub monte_carlo_trials: usize,
    /// Seeds both the session shuffles and Monte-Carlo sampling
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            small_blind: 50,
            big_blind: 100,
            starting_stack: STARTING_STACK,
            min_continuable_stack: 1,
            monte_carlo_trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind,
            big: self.big_blind,
        }
    }

    pub fn monte_carlo(&self) -> MonteCarlo {
        MonteCarlo {
            trials: self.monte_carlo_trials,
            seed: self.seed,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind == 0 {
            return Err(ConfigError::Invalid("big_blind must be >0".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(format!(
                "small_blind {} exceeds big_blind {}",
                self.small_blind, self.big_blind
            )));
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid("starting_stack must be >0".into()));
        }
        if self.min_continuable_stack == 0 {
            return Err(ConfigError::Invalid("min_continuable_stack must be >=1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub starting_stack: ValueSource,
    pub min_continuable_stack: ValueSource,
    pub monte_carlo_trials: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            starting_stack: ValueSource::Default,
            min_continuable_stack: ValueSource::Default,
            monte_carlo_trials: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: EngineConfig,
    pub sources: ConfigSources,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    min_continuable_stack: Option<u32>,
    #[serde(default)]
    monte_carlo_trials: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
}

pub fn load() -> Result<EngineConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves the configuration from the file named by `RIVERHOLD_CONFIG`
/// (if set) and the environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let file = match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.is_empty() => Some(read_file(Path::new(&path))?),
        _ => None,
    };
    resolve(file)
}

/// Like [`load_with_sources`] with an explicit file instead of
/// `RIVERHOLD_CONFIG`. Environment overrides still apply.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigResolved, ConfigError> {
    resolve(Some(read_file(path.as_ref())?))
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    Ok(toml::from_str(&s)?)
}

fn resolve(file: Option<FileConfig>) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = EngineConfig::default();
    let mut sources = ConfigSources::default();

    if let Some(f) = file {
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.min_continuable_stack {
            cfg.min_continuable_stack = v;
            sources.min_continuable_stack = ValueSource::File;
        }
        if let Some(v) = f.monte_carlo_trials {
            cfg.monte_carlo_trials = v;
            sources.monte_carlo_trials = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(v) = env_parse("RIVERHOLD_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_parse("RIVERHOLD_BIG_BLIND")? {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_parse("RIVERHOLD_STARTING_STACK")? {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(v) = env_parse("RIVERHOLD_MIN_CONTINUABLE_STACK")? {
        cfg.min_continuable_stack = v;
        sources.min_continuable_stack = ValueSource::Env;
    }
    if let Some(v) = env_parse("RIVERHOLD_MC_TRIALS")? {
        cfg.monte_carlo_trials = v;
        sources.monte_carlo_trials = ValueSource::Env;
    }
    if let Some(v) = env_parse("RIVERHOLD_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Empty or unset variables are ignored.
fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{key}={v:?} is not a valid number"))),
        _ => Ok(None),
    }
}
