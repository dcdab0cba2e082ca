use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 128-bit seed for the random sources of sessions and learners.
///
/// Serialized (and parsed) as a 32-character hex string, so runs can be
/// recorded in reports and reproduced from the command line.
///
/// # Example
///
/// ```
/// use mastermind_engine::{GameConfig, GameSession, Seed};
/// use rand::Rng as _;
///
/// let config = GameConfig::new(6, 10, 4).unwrap();
/// let seed: Seed = rand::rng().random();
///
/// let session1 = GameSession::with_seed(config, seed);
/// let session2 = GameSession::with_seed(config, seed);
/// assert_eq!(session1.code(), session2.code());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed([u8; 16]);

impl Seed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates the random number generator this seed stands for.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Error returned when parsing a [`Seed`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for Seed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for Seed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `Seed` values with `rng.random()`.
impl Distribution<Seed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Seed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        Seed(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;

    use super::*;

    #[test]
    fn test_roundtrip_random_seed() {
        let seed: Seed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: Seed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed, deserialized);
    }

    #[test]
    fn test_known_value_sequential_bytes() {
        // big-endian: bytes appear in order as hex pairs
        let seed = Seed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        assert_eq!(
            serde_json::to_string(&seed).unwrap(),
            "\"0123456789abcdeffedcba9876543210\""
        );
    }

    #[test]
    fn test_parse_uppercase_hex() {
        let seed: Seed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_parse_errors() {
        for input in [
            "",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
        ] {
            assert!(input.parse::<Seed>().is_err(), "{input:?} should not parse");
            let result: Result<Seed, _> = serde_json::from_str(&format!("\"{input}\""));
            assert!(result.unwrap_err().to_string().contains("invalid hex"));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let seed: Seed = rand::rng().random();
        let mut rng1 = seed.rng();
        let mut rng2 = seed.rng();
        for _ in 0..20 {
            assert_eq!(rng1.random::<u32>(), rng2.random::<u32>());
        }
    }
}
