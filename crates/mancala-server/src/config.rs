//! Party configuration read from the environment.

use mancala_core::{
    BotDifficulty, PartyRules, PartySettings, DEFAULT_HOUSES_PER_PLAYER, DEFAULT_STONES_PER_HOUSE,
};
use std::str::FromStr;
use thiserror::Error;

const HOUSES_VAR: &str = "MANCALA_HOUSES";
const STONES_VAR: &str = "MANCALA_STONES";
const EXTRA_TURN_VAR: &str = "MANCALA_EXTRA_TURN";
const BOT_VAR: &str = "MANCALA_BOT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{key} must be at least 1")]
    Zero { key: &'static str },
}

/// Settings for new parties and the bots that play them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyConfig {
    pub houses_per_player: usize,
    pub stones_per_house: u32,
    pub extra_turn_on_store: bool,
    pub bot_difficulty: BotDifficulty,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            houses_per_player: DEFAULT_HOUSES_PER_PLAYER,
            stones_per_house: DEFAULT_STONES_PER_HOUSE,
            extra_turn_on_store: true,
            bot_difficulty: BotDifficulty::Medium,
        }
    }
}

impl PartyConfig {
    /// Read the config from `MANCALA_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through `lookup`; missing keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let houses_per_player = parse_var(&lookup, HOUSES_VAR, defaults.houses_per_player)?;
        if houses_per_player == 0 {
            return Err(ConfigError::Zero { key: HOUSES_VAR });
        }
        let stones_per_house = parse_var(&lookup, STONES_VAR, defaults.stones_per_house)?;
        if stones_per_house == 0 {
            return Err(ConfigError::Zero { key: STONES_VAR });
        }
        let extra_turn_on_store = parse_var(&lookup, EXTRA_TURN_VAR, defaults.extra_turn_on_store)?;

        let bot_difficulty = match lookup(BOT_VAR) {
            None => defaults.bot_difficulty,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "easy" => BotDifficulty::Easy,
                "medium" => BotDifficulty::Medium,
                "hard" => BotDifficulty::Hard,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: BOT_VAR,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            houses_per_player,
            stones_per_house,
            extra_turn_on_store,
            bot_difficulty,
        })
    }

    /// Settings used to build the first board of each party
    pub fn settings(&self) -> PartySettings {
        PartySettings {
            houses_per_player: self.houses_per_player,
            stones_per_house: self.stones_per_house,
            rules: PartyRules {
                extra_turn_on_store: self.extra_turn_on_store,
            },
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
