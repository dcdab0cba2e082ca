use std::fmt;

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{Code, Feedback, GameConfig, Guess, InvalidGuess, Observation, PlayError, feedback};

use super::Seed;

/// A guess and the feedback it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub guess: Guess,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Active,
    Solved,
    Exhausted,
}

impl SessionState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

/// One episode: a hidden code and the turns played against it.
///
/// The session is `Active` until a guess scores `len_code` correct pegs
/// (`Solved`) or the turn budget is spent (`Exhausted`), whichever comes
/// first. [`Self::play`] is the only way to add turns.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    code: Code,
    turns: Vec<Turn>,
    state: SessionState,
}

impl GameSession {
    /// Starts a session with a code sampled from a random seed.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but the code is sampled from `seed`.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: Seed) -> Self {
        let code = Code::random(&config, &mut seed.rng());
        Self::from_valid_code(config, code)
    }

    /// Starts a session against a known code.
    pub fn with_code(config: GameConfig, code: Code) -> Result<Self, InvalidGuess> {
        code.validate(&config)?;
        Ok(Self::from_valid_code(config, code))
    }

    fn from_valid_code(config: GameConfig, code: Code) -> Self {
        Self {
            config,
            code,
            turns: Vec::with_capacity(config.n_turns()),
            state: SessionState::Active,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The hidden code.
    #[must_use]
    pub fn code(&self) -> &Code {
        &self.code
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn played_guesses(&self) -> impl Iterator<Item = &Guess> + '_ {
        self.turns.iter().map(|turn| &turn.guess)
    }

    /// Scores `guess` against the hidden code and records the turn.
    ///
    /// Fails without recording anything if the guess does not fit the
    /// configuration or the session is already terminal.
    pub fn play(&mut self, guess: Guess) -> Result<Feedback, PlayError> {
        if self.state.is_terminal() {
            return Err(PlayError::SessionTerminated);
        }
        guess.validate(&self.config)?;

        let feedback = feedback::score(guess.colors(), self.code.colors());
        self.turns.push(Turn { guess, feedback });
        if feedback.is_solved(self.config.len_code()) {
            self.state = SessionState::Solved;
        } else if self.turns.len() == self.config.n_turns() {
            self.state = SessionState::Exhausted;
        }
        Ok(feedback)
    }

    /// Projects the turns played so far into an [`Observation`].
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation::from_turns(&self.config, &self.turns)
    }
}

/// Plain-text rendering: the hidden code, then one line per turn with the
/// guess followed by `C` per correct peg and `M` per misplaced peg.
impl fmt::Display for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Code:   {}", self.code)?;
        for (i, turn) in self.turns.iter().enumerate() {
            write!(f, "Turn {}: {} ", i + 1, turn.guess)?;
            for _ in 0..turn.feedback.correct {
                f.write_str("C")?;
            }
            for _ in 0..turn.feedback.misplaced {
                f.write_str("M")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
