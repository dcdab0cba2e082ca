use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write as _},
    path::Path,
};

use mastermind_engine::{ConsistencyFilter, GameConfig, Guess, Observation, Seed};
use rand::{Rng, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{PersistError, q_table::QTable};

/// Learning hyperparameters, fixed for the lifetime of an agent.
///
/// Conventionally each lies in `(0, 1]`; this is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearnerParams {
    /// Learning rate (α): weight of the new estimate in each update.
    pub alpha: f64,
    /// Exploration rate (ε): probability of acting uniformly at random.
    pub epsilon: f64,
    /// Discount factor (γ) applied to the value of the next state.
    pub discount: f64,
}

impl Default for LearnerParams {
    fn default() -> Self {
        Self {
            alpha: 0.9,
            epsilon: 0.9,
            discount: 0.99,
        }
    }
}

/// Tabular Q-learning agent for one game configuration.
///
/// Actions are always drawn from the [`ConsistencyFilter`]'s legal actions
/// for the state, never from the full guess space: guesses already known to
/// contradict the history are neither explored nor exploited.
///
/// # Example
///
/// ```
/// use mastermind_agent::{LearnerParams, QLearningAgent};
/// use mastermind_engine::{GameConfig, Observation, Seed};
///
/// let config = GameConfig::new(2, 2, 1).unwrap();
/// let mut agent =
///     QLearningAgent::with_seed(config, LearnerParams::default(), Seed::from_bytes([7; 16]));
///
/// let state = Observation::empty(&config);
/// let action = agent.act(&state).unwrap();
/// assert_eq!(agent.value(&state, &action), 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "AgentSnapshot")]
pub struct QLearningAgent {
    config: GameConfig,
    params: LearnerParams,
    q_table: QTable,
    #[serde(skip_serializing)]
    filter: ConsistencyFilter,
    #[serde(skip_serializing)]
    rng: Pcg32,
}

#[derive(Deserialize)]
struct AgentSnapshot {
    config: GameConfig,
    params: LearnerParams,
    q_table: QTable,
}

impl From<AgentSnapshot> for QLearningAgent {
    fn from(snapshot: AgentSnapshot) -> Self {
        let mut agent = Self::new(snapshot.config, snapshot.params);
        agent.q_table = snapshot.q_table;
        agent
    }
}

impl QLearningAgent {
    /// Creates an agent with an empty table and a randomly seeded generator.
    #[must_use]
    pub fn new(config: GameConfig, params: LearnerParams) -> Self {
        Self::with_seed(config, params, rand::rng().random())
    }

    /// Like [`Self::new`], but exploration and tie-breaking draw from `seed`.
    #[must_use]
    pub fn with_seed(config: GameConfig, params: LearnerParams, seed: Seed) -> Self {
        Self {
            config,
            params,
            q_table: QTable::new(),
            filter: ConsistencyFilter::new(config),
            rng: seed.rng(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn params(&self) -> &LearnerParams {
        &self.params
    }

    #[must_use]
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Reseeds the generator used for exploration and tie-breaking.
    pub fn reseed(&mut self, seed: Seed) {
        self.rng = seed.rng();
    }

    #[must_use]
    pub fn legal_actions(&self, state: &Observation) -> Vec<Guess> {
        self.filter.legal_actions_for(state)
    }

    /// Q(state, action), `0.0` if never updated.
    #[must_use]
    pub fn value(&self, state: &Observation, action: &Guess) -> f64 {
        self.q_table.get(state, action)
    }

    /// The best value over the legal actions of `state`, and those actions.
    ///
    /// Returns `(0.0, [])` when there is no legal action, which is how
    /// terminal states get a value of zero.
    #[must_use]
    pub fn best_value_and_actions(&self, state: &Observation) -> (f64, Vec<Guess>) {
        let actions = self.legal_actions(state);
        let best = actions
            .iter()
            .map(|action| self.value(state, action))
            .max_by(f64::total_cmp)
            .unwrap_or(0.0);
        (best, actions)
    }

    /// Greedy choice: uniformly random among the legal actions of maximal value.
    ///
    /// Returns `None` if `state` has no legal action.
    pub fn policy(&mut self, state: &Observation) -> Option<Guess> {
        let actions = self.legal_actions(state);
        self.policy_among(state, actions)
    }

    #[expect(clippy::float_cmp)]
    fn policy_among(&mut self, state: &Observation, actions: Vec<Guess>) -> Option<Guess> {
        let best = actions
            .iter()
            .map(|action| self.value(state, action))
            .max_by(f64::total_cmp)?;
        let best_actions = actions
            .into_iter()
            .filter(|action| self.value(state, action) == best)
            .collect::<Vec<_>>();
        best_actions.choose(&mut self.rng).cloned()
    }

    /// Epsilon-greedy choice: a uniformly random legal action with probability
    /// ε, otherwise [`Self::policy`].
    ///
    /// Returns `None` if `state` has no legal action; the caller must treat
    /// the state as unplayable.
    pub fn act(&mut self, state: &Observation) -> Option<Guess> {
        let actions = self.legal_actions(state);
        if actions.is_empty() {
            return None;
        }
        if self.rng.random::<f64>() < self.params.epsilon {
            return actions.choose(&mut self.rng).cloned();
        }
        self.policy_among(state, actions)
    }

    /// One-step Q-learning update, applied once per environment step:
    ///
    /// ```text
    /// Q(s, a) <- (1 - α) Q(s, a) + α (r + γ max_a' Q(s', a'))
    /// ```
    pub fn learn(
        &mut self,
        state: &Observation,
        action: &Guess,
        next_state: &Observation,
        reward: f64,
    ) {
        let LearnerParams {
            alpha, discount, ..
        } = self.params;
        let (next_value, _) = self.best_value_and_actions(next_state);
        let value =
            (1.0 - alpha) * self.value(state, action) + alpha * (reward + discount * next_value);
        self.q_table.set(state, action, value);
    }

    /// Writes the configuration, hyperparameters and table to `path` as JSON.
    ///
    /// The snapshot is written to a sibling temporary file first and renamed
    /// into place, so an existing snapshot is never left half-written.
    pub fn save<P>(&self, path: P) -> Result<(), PersistError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let mut tmp_name = path.file_name().unwrap_or_default().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        let result = write_json_file(&tmp_path, self)
            .and_then(|()| fs::rename(&tmp_path, path).map_err(PersistError::from));
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    /// Restores an agent written by [`Self::save`].
    ///
    /// The generator is freshly seeded; it is not part of the snapshot.
    pub fn load<P>(path: P) -> Result<Self, PersistError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        let agent = serde_json::from_reader(BufReader::new(file))?;
        Ok(agent)
    }

    /// Like [`Self::load`], but fails if the snapshot was trained for a
    /// different configuration than `config`.
    pub fn load_for<P>(path: P, config: &GameConfig) -> Result<Self, PersistError>
    where
        P: AsRef<Path>,
    {
        let agent = Self::load(path)?;
        if agent.config != *config {
            return Err(PersistError::ConfigMismatch {
                expected: *config,
                found: agent.config,
            });
        }
        Ok(agent)
    }
}

fn write_json_file<T>(path: &Path, value: &T) -> Result<(), PersistError>
where
    T: Serialize,
{
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
