//! Training and evaluation loops.
//!
//! [`Trainer`] runs episodes through a [`MastermindEnv`], letting the agent
//! learn at every step, and records whether each episode was won. The
//! resulting [`TrainingHistory`] provides the cumulative win-rate curve
//! (`wins so far / games so far`) used to judge progress.
//!
//! [`evaluate`] plays greedy games without learning, to measure a trained
//! agent.
//!
//! # Example
//!
//! ```
//! use mastermind_agent::{LearnerParams, MastermindEnv, QLearningAgent, training::Trainer};
//! use mastermind_engine::{GameConfig, Seed};
//!
//! let config = GameConfig::new(2, 2, 1).unwrap();
//! let agent = QLearningAgent::with_seed(config, LearnerParams::default(), Seed::from_bytes([1; 16]));
//! let mut env = MastermindEnv::with_seed(agent, Seed::from_bytes([2; 16]));
//!
//! let history = Trainer::new(50).train(&mut env, |_, _, _| {}).unwrap();
//! assert_eq!(history.games(), 50);
//! assert_eq!(history.cumulative_win_rate().len(), 50);
//! ```

use std::path::PathBuf;

use mastermind_engine::{GameSession, PlayError, Seed};
use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{MastermindEnv, PersistError, QLearningAgent};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TrainError {
    #[display("episode failed: {_0}")]
    Play(PlayError),
    #[display("checkpoint failed: {_0}")]
    Persist(PersistError),
}

impl From<PlayError> for TrainError {
    fn from(err: PlayError) -> Self {
        Self::Play(err)
    }
}

impl From<PersistError> for TrainError {
    fn from(err: PersistError) -> Self {
        Self::Persist(err)
    }
}

/// How one training episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOutcome {
    pub won: bool,
    pub turns: usize,
    /// The agent had no legal action before the episode terminated.
    pub stuck: bool,
}

/// Per-episode wins of a training run, in play order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingHistory {
    wins: Vec<bool>,
}

impl TrainingHistory {
    pub fn record(&mut self, won: bool) {
        self.wins.push(won);
    }

    #[must_use]
    pub fn games(&self) -> usize {
        self.wins.len()
    }

    #[must_use]
    pub fn wins(&self) -> usize {
        self.wins.iter().filter(|won| **won).count()
    }

    /// Overall win rate, `None` before the first game.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        rate(&self.wins)
    }

    /// Win rate over the last `window` games.
    #[must_use]
    pub fn recent_win_rate(&self, window: usize) -> Option<f64> {
        rate(&self.wins[self.wins.len().saturating_sub(window)..])
    }

    /// Win rate after each game: `cumsum(wins) / [1, 2, ..., n]`.
    #[must_use]
    pub fn cumulative_win_rate(&self) -> Vec<f64> {
        let mut wins = 0_usize;
        self.wins
            .iter()
            .enumerate()
            .map(|(i, won)| {
                wins += usize::from(*won);
                ratio(wins, i + 1)
            })
            .collect()
    }

    /// At most `points` evenly spaced `(games played, cumulative win rate)`
    /// pairs, always ending at the last game.
    #[must_use]
    pub fn sampled_curve(&self, points: usize) -> Vec<(usize, f64)> {
        let curve = self.cumulative_win_rate();
        if curve.is_empty() || points == 0 {
            return vec![];
        }
        let step = curve.len().div_ceil(points);
        let mut sampled = curve
            .iter()
            .enumerate()
            .skip(step - 1)
            .step_by(step)
            .map(|(i, rate)| (i + 1, *rate))
            .collect::<Vec<_>>();
        if sampled.last().map(|(games, _)| *games) != Some(curve.len()) {
            sampled.push((curve.len(), curve[curve.len() - 1]));
        }
        sampled
    }
}

#[expect(clippy::cast_precision_loss)]
fn ratio(count: usize, total: usize) -> f64 {
    count as f64 / total as f64
}

fn rate(wins: &[bool]) -> Option<f64> {
    if wins.is_empty() {
        return None;
    }
    Some(ratio(wins.iter().filter(|won| **won).count(), wins.len()))
}

/// Periodic agent snapshot written during training.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub path: PathBuf,
    /// Save after game `i` whenever `i % every == 0`; `0` saves only at the end.
    pub every: usize,
}

/// Runs a fixed number of learning episodes.
#[derive(Debug, Clone)]
pub struct Trainer {
    n_games: usize,
    checkpoint: Option<Checkpoint>,
}

impl Trainer {
    #[must_use]
    pub fn new(n_games: usize) -> Self {
        Self {
            n_games,
            checkpoint: None,
        }
    }

    #[must_use]
    pub fn with_checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Plays `n_games` episodes, calling `on_episode(outcome, history, env)`
    /// after each one, once the outcome is recorded in `history` and while the
    /// finished session is still in `env`.
    ///
    /// With a checkpoint configured, the agent is also saved once more after
    /// the last game.
    pub fn train<F>(
        &self,
        env: &mut MastermindEnv,
        mut on_episode: F,
    ) -> Result<TrainingHistory, TrainError>
    where
        F: FnMut(&EpisodeOutcome, &TrainingHistory, &MastermindEnv),
    {
        let mut history = TrainingHistory::default();
        for game in 0..self.n_games {
            let outcome = run_episode(env)?;
            history.record(outcome.won);
            on_episode(&outcome, &history, env);

            if let Some(checkpoint) = &self.checkpoint {
                if checkpoint.every > 0 && game % checkpoint.every == 0 {
                    env.agent().save(&checkpoint.path)?;
                }
            }
        }
        if let Some(checkpoint) = &self.checkpoint {
            env.agent().save(&checkpoint.path)?;
        }
        Ok(history)
    }
}

/// Plays one learning episode from a fresh reset.
///
/// An episode in which the agent has no legal action ends early as a loss.
pub fn run_episode(env: &mut MastermindEnv) -> Result<EpisodeOutcome, PlayError> {
    let mut observation = env.reset();
    loop {
        let Some(action) = env.agent_mut().act(&observation) else {
            return Ok(EpisodeOutcome {
                won: false,
                turns: env.session().turns().len(),
                stuck: true,
            });
        };
        let step = env.step(action)?;
        if step.terminated {
            return Ok(EpisodeOutcome {
                won: env.session().state().is_solved(),
                turns: env.session().turns().len(),
                stuck: false,
            });
        }
        observation = step.observation;
    }
}

/// Result of [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub games: usize,
    pub wins: usize,
    /// Mean number of turns of the won games, `None` if none was won.
    pub mean_turns_to_win: Option<f64>,
}

impl Evaluation {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        ratio(self.wins, self.games)
    }
}

/// Plays `n_games` greedy games with [`QLearningAgent::policy`], without
/// learning, calling `on_game` with each finished session.
///
/// Hidden codes are drawn from `seed`.
pub fn evaluate<F>(
    agent: &mut QLearningAgent,
    n_games: usize,
    seed: Seed,
    mut on_game: F,
) -> Result<Evaluation, PlayError>
where
    F: FnMut(&GameSession),
{
    let mut rng = seed.rng();
    let mut wins = 0;
    let mut winning_turns = 0;
    for _ in 0..n_games {
        let mut session = GameSession::with_seed(*agent.config(), rng.random());
        while !session.is_terminal() {
            let Some(action) = agent.policy(&session.observation()) else {
                break;
            };
            session.play(action)?;
        }
        if session.state().is_solved() {
            wins += 1;
            winning_turns += session.turns().len();
        }
        on_game(&session);
    }
    Ok(Evaluation {
        games: n_games,
        wins,
        mean_turns_to_win: (wins > 0).then(|| ratio(winning_turns, wins)),
    })
}
