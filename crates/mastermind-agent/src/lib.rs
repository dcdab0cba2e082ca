//! Tabular Q-learning for Mastermind.
//!
//! This crate trains an agent to find hidden codes by trial, on top of the game
//! rules in `mastermind-engine`.
//!
//! # How Learning Works
//!
//! 1. **Reset** - [`MastermindEnv::reset`] starts a session with a fresh hidden code
//! 2. **Act** - [`QLearningAgent::act`] picks a guess among the legal actions of
//!    the current observation (coherent with all feedback, not yet played)
//! 3. **Step** - [`MastermindEnv::step`] plays it; reward is `+1` when solved, `-1` otherwise
//! 4. **Learn** - the step applies one Q-learning update from the pre-step and
//!    post-step observations
//! 5. **Repeat** - until the code is found or the turn budget is spent
//!
//! [`training::Trainer`] drives this loop for many episodes and records the
//! win-rate curve.
//!
//! # Architecture
//!
//! ```text
//! Trainer (episodes, checkpoints, win rate)
//!     ↓ drives
//! MastermindEnv (reset / step / render)
//!     ↓ owns
//! QLearningAgent (ε-greedy policy, update rule) ── QTable (sparse values)
//!     ↓ asks
//! ConsistencyFilter (mastermind-engine)
//! ```
//!
//! # Current Limitations
//!
//! - **Strictly tabular**: states never seen before are worth zero; nothing
//!   generalizes between observations that differ in a single peg
//! - **Unbounded table**: entries are never pruned
//! - **Brute-force actions**: every decision enumerates the whole guess space,
//!   which limits practical configurations to a few thousand codes

use std::io;

use mastermind_engine::GameConfig;

pub use self::{agent::*, env::*, q_table::QTable};

mod agent;
mod env;
pub mod q_table;
pub mod training;

/// Error returned when saving or loading an agent snapshot.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PersistError {
    #[display("snapshot I/O failed: {_0}")]
    Io(io::Error),
    #[display("snapshot is not valid JSON: {_0}")]
    Json(serde_json::Error),
    #[display("snapshot was trained for {found}, expected {expected}")]
    ConfigMismatch {
        expected: GameConfig,
        found: GameConfig,
    },
}

impl From<io::Error> for PersistError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
