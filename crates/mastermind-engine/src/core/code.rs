use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{GameConfig, InvalidGuess};

/// A peg color. Real colors are `1..=n_colors`.
pub type Color = u8;

/// Reserved color value filling unplayed turns of an [`Observation`](crate::Observation).
///
/// Never part of a real code or guess.
pub const PADDING: Color = 0;

/// Ordered sequence of peg colors.
///
/// Used both for the hidden code of a session and for the guesses played
/// against it; the two share the same domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(Vec<Color>);

/// A code submitted by the player as a hypothesis for the hidden code.
pub type Guess = Code;

impl Code {
    /// Samples `len_code` independent uniform colors in `1..=n_colors`.
    pub fn random<R>(config: &GameConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        (0..config.len_code())
            .map(|_| rng.random_range(1..=config.n_colors()))
            .collect()
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks the length and color range against `config`.
    pub fn validate(&self, config: &GameConfig) -> Result<(), InvalidGuess> {
        if self.len() != config.len_code() {
            return Err(InvalidGuess::WrongLength {
                expected: config.len_code(),
                actual: self.len(),
            });
        }
        if let Some((position, &color)) = self
            .0
            .iter()
            .enumerate()
            .find(|(_, c)| !(1..=config.n_colors()).contains(*c))
        {
            return Err(InvalidGuess::ColorOutOfRange {
                position,
                color,
                n_colors: config.n_colors(),
            });
        }
        Ok(())
    }
}

impl From<Vec<Color>> for Code {
    fn from(colors: Vec<Color>) -> Self {
        Self(colors)
    }
}

impl From<&[Color]> for Code {
    fn from(colors: &[Color]) -> Self {
        Self(colors.to_vec())
    }
}

impl FromIterator<Color> for Code {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[Color]> for Code {
    fn as_ref(&self) -> &[Color] {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{color}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_code_in_range() {
        let config = GameConfig::new(3, 5, 6).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let code = Code::random(&config, &mut rng);
            assert_eq!(code.len(), 6);
            assert!(code.colors().iter().all(|c| (1..=3).contains(c)));
            assert_eq!(code.validate(&config), Ok(()));
        }
    }

    #[test]
    fn test_random_code_covers_all_colors() {
        let config = GameConfig::new(4, 1, 1).unwrap();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; 5];
        for _ in 0..200 {
            seen[usize::from(Code::random(&config, &mut rng).colors()[0])] = true;
        }
        assert_eq!(seen, [false, true, true, true, true]);
    }

    #[test]
    fn test_validate_wrong_length() {
        let config = GameConfig::new(3, 5, 2).unwrap();
        assert_eq!(
            Code::from(vec![1, 2, 3]).validate(&config),
            Err(InvalidGuess::WrongLength {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_validate_color_out_of_range() {
        let config = GameConfig::new(3, 5, 2).unwrap();
        assert_eq!(
            Code::from(vec![1, 4]).validate(&config),
            Err(InvalidGuess::ColorOutOfRange {
                position: 1,
                color: 4,
                n_colors: 3
            })
        );
        assert_eq!(
            Code::from(vec![PADDING, 1]).validate(&config),
            Err(InvalidGuess::ColorOutOfRange {
                position: 0,
                color: PADDING,
                n_colors: 3
            })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Code::from(vec![1, 12, 3]).to_string(), "1 12 3");
    }
}
