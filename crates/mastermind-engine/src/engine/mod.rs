//! Sessions, seeding and candidate filtering built on the [`core`](crate::core) types.
//!
//! - [`GameSession`] - one episode against a hidden code
//! - [`Seed`] - 128-bit seed for reproducible random sources
//! - [`CodeSpace`] - lexicographic enumeration of every code of a configuration
//! - [`ConsistencyFilter`] - codes compatible with all feedback recorded so far
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the hidden code is sampled once
//! 2. Read the [`Observation`](crate::Observation) and pick a guess, typically
//!    from [`ConsistencyFilter::legal_actions_for`]
//! 3. [`GameSession::play`] scores it and records the turn
//! 4. Repeat until the code is found or the turn budget is spent

pub use self::{consistency::*, game_session::*, seed::*};

mod consistency;
mod game_session;
mod seed;
