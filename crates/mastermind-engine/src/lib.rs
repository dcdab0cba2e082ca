//! Mastermind game rules and candidate enumeration.
//!
//! This crate holds everything about the game itself and nothing about learning:
//!
//! - [`Code`] / [`Guess`] - ordered peg colors (`1..=n_colors`, `0` is padding)
//! - [`Feedback`] and [`feedback::score`] - duplicate-safe (correct, misplaced) scoring
//! - [`GameConfig`] - alphabet size, turn budget and code length
//! - [`GameSession`] - one episode: hidden code plus the turns played against it
//! - [`Observation`] - fixed-width flattened view of a session's turns
//! - [`ConsistencyFilter`] - guesses still compatible with every recorded feedback
//!
//! # Example
//!
//! ```
//! use mastermind_engine::{Code, ConsistencyFilter, GameConfig, GameSession};
//!
//! let config = GameConfig::new(3, 4, 2).unwrap();
//! let mut session = GameSession::with_code(config, Code::from(vec![2, 3])).unwrap();
//!
//! let feedback = session.play(Code::from(vec![1, 2])).unwrap();
//! assert_eq!((feedback.correct, feedback.misplaced), (0, 1));
//!
//! let filter = ConsistencyFilter::new(config);
//! let candidates = filter.legal_actions_for(&session.observation());
//! assert!(candidates.contains(session.code()));
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a game configuration has an empty dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("number of colors must be at least 1")]
    NoColors,
    #[display("number of turns must be at least 1")]
    NoTurns,
    #[display("code length must be at least 1")]
    EmptyCode,
}

/// Error returned when a guess does not fit the game configuration.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidGuess {
    #[display("guess has {actual} colors, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
    #[display("color {color} at position {position} is outside 1..={n_colors}")]
    ColorOutOfRange {
        position: usize,
        color: Color,
        n_colors: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlayError {
    #[display("invalid guess: {_0}")]
    InvalidGuess(InvalidGuess),
    #[display("session already terminated")]
    SessionTerminated,
}

impl From<InvalidGuess> for PlayError {
    fn from(err: InvalidGuess) -> Self {
        Self::InvalidGuess(err)
    }
}
