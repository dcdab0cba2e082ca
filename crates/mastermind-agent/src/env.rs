use std::io;

use mastermind_engine::{
    Feedback, GameConfig, GameSession, Guess, Observation, PlayError, Seed,
};
use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::QLearningAgent;

/// Reward for the step that finds the code.
pub const WIN_REWARD: f64 = 1.0;
/// Reward for every other step.
pub const STEP_REWARD: f64 = -1.0;

/// Result of one [`MastermindEnv::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub feedback: Feedback,
    pub reward: f64,
    /// The code was found or the turn budget is spent.
    pub terminated: bool,
}

/// Episode driver around a learning agent.
///
/// Each [`Self::reset`] starts a new [`GameSession`] with a freshly sampled
/// code; each [`Self::step`] plays one guess and immediately applies the
/// agent's learning update for that transition.
///
/// # Example
///
/// ```
/// use mastermind_agent::{LearnerParams, MastermindEnv, QLearningAgent};
/// use mastermind_engine::{GameConfig, Seed};
///
/// let config = GameConfig::new(3, 4, 2).unwrap();
/// let agent = QLearningAgent::with_seed(config, LearnerParams::default(), Seed::from_bytes([1; 16]));
/// let mut env = MastermindEnv::with_seed(agent, Seed::from_bytes([2; 16]));
///
/// let mut observation = env.reset();
/// loop {
///     let Some(action) = env.agent_mut().act(&observation) else {
///         break;
///     };
///     let step = env.step(action).unwrap();
///     observation = step.observation;
///     if step.terminated {
///         break;
///     }
/// }
/// assert!(env.session().is_terminal());
/// ```
#[derive(Debug, Clone)]
pub struct MastermindEnv {
    agent: QLearningAgent,
    session: GameSession,
    rng: Pcg32,
}

impl MastermindEnv {
    /// Creates an environment whose codes come from a random seed.
    #[must_use]
    pub fn new(agent: QLearningAgent) -> Self {
        Self::with_seed(agent, rand::rng().random())
    }

    /// Like [`Self::new`], but the sequence of hidden codes is drawn from `seed`.
    #[must_use]
    pub fn with_seed(agent: QLearningAgent, seed: Seed) -> Self {
        let mut rng = seed.rng();
        let session = GameSession::with_seed(*agent.config(), rng.random());
        Self {
            agent,
            session,
            rng,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.agent.config()
    }

    #[must_use]
    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut QLearningAgent {
        &mut self.agent
    }

    #[must_use]
    pub fn into_agent(self) -> QLearningAgent {
        self.agent
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Starts a new episode and returns its all-padding observation.
    pub fn reset(&mut self) -> Observation {
        self.session = GameSession::with_seed(*self.config(), self.rng.random());
        self.session.observation()
    }

    /// Plays `action`, rewards it and lets the agent learn from the transition.
    ///
    /// Fails without learning if the guess is invalid or the episode is over.
    pub fn step(&mut self, action: Guess) -> Result<Step, PlayError> {
        let state = self.session.observation();
        let feedback = self.session.play(action.clone())?;
        let solved = self.session.state().is_solved();
        let reward = if solved { WIN_REWARD } else { STEP_REWARD };
        let observation = self.session.observation();
        self.agent.learn(&state, &action, &observation, reward);
        Ok(Step {
            observation,
            feedback,
            reward,
            terminated: self.session.is_terminal(),
        })
    }

    /// Writes the hidden code and the turns played so far.
    pub fn render<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: io::Write + ?Sized,
    {
        write!(out, "{}", self.session)
    }
}
