use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Dimensions of a Mastermind game.
///
/// Fixed for the lifetime of every session, filter and learner built from it.
/// Colors are `u8` values in `1..=n_colors` and feedback counts never exceed
/// `len_code`, so both fit in a `u8`.
///
/// # Example
///
/// ```
/// use mastermind_engine::GameConfig;
///
/// let config = GameConfig::new(6, 10, 4).unwrap();
/// assert_eq!(config.guess_space_size(), Some(1296));
/// assert_eq!(config.observation_len(), 60);
///
/// assert!(GameConfig::new(0, 10, 4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{n_colors} colors, {len_code} pegs, {n_turns} turns")]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    n_colors: u8,
    n_turns: usize,
    len_code: u8,
}

#[derive(Deserialize)]
struct RawGameConfig {
    n_colors: u8,
    n_turns: usize,
    len_code: u8,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        Self::new(raw.n_colors, raw.n_turns, raw.len_code)
    }
}

impl GameConfig {
    pub fn new(n_colors: u8, n_turns: usize, len_code: u8) -> Result<Self, ConfigError> {
        if n_colors == 0 {
            return Err(ConfigError::NoColors);
        }
        if n_turns == 0 {
            return Err(ConfigError::NoTurns);
        }
        if len_code == 0 {
            return Err(ConfigError::EmptyCode);
        }
        Ok(Self {
            n_colors,
            n_turns,
            len_code,
        })
    }

    #[must_use]
    pub const fn n_colors(&self) -> u8 {
        self.n_colors
    }

    #[must_use]
    pub const fn n_turns(&self) -> usize {
        self.n_turns
    }

    #[must_use]
    pub fn len_code(&self) -> usize {
        usize::from(self.len_code)
    }

    /// Width of one turn inside an [`Observation`](crate::Observation):
    /// the guess colors followed by the correct and misplaced counts.
    #[must_use]
    pub fn slot_width(&self) -> usize {
        self.len_code() + 2
    }

    #[must_use]
    pub fn observation_len(&self) -> usize {
        self.n_turns * self.slot_width()
    }

    /// Number of distinct codes (`n_colors ^ len_code`), or `None` on overflow.
    #[must_use]
    pub fn guess_space_size(&self) -> Option<u64> {
        u64::from(self.n_colors).checked_pow(u32::from(self.len_code))
    }
}
