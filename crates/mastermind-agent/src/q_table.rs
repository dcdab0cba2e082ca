//! Sparse action-value table.
//!
//! Values are stored per (state, action) pair, where the state is an
//! [`Observation`] and the action a [`Guess`], both compared by value. Pairs
//! never written read as `0.0`; reading never creates an entry, so the table
//! can be inspected without changing it.
//!
//! # Serialized Format
//!
//! The table serializes as a nested JSON object. Keys are the state's
//! observation values and the action's colors joined with `.`:
//!
//! ```text
//! {
//!   "0.0.0.0.0.0": { "1": -0.9, "2": 0.99 },
//!   "1.0.0.0.0.0": { "2": 0.9 }
//! }
//! ```

use std::{borrow::Borrow, collections::HashMap, fmt};

use mastermind_engine::{Code, Guess, Observation};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Key(Vec<u8>);

impl Borrow<[u8]> for Key {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key_str = String::deserialize(deserializer)?;
        key_str
            .split('.')
            .map(str::parse)
            .collect::<Result<Vec<u8>, _>>()
            .map(Key)
            .map_err(|e| serde::de::Error::custom(format!("invalid table key {key_str:?} ({e})")))
    }
}

/// Action values keyed by state, then by action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QTable {
    values: HashMap<Key, HashMap<Key, f64>>,
}

impl QTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value, or `0.0` for a pair never written.
    #[must_use]
    pub fn get(&self, state: &Observation, action: &Guess) -> f64 {
        self.values
            .get(state.as_slice())
            .and_then(|actions| actions.get(action.colors()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, state: &Observation, action: &Guess, value: f64) {
        let action = Key(action.colors().to_vec());
        if let Some(actions) = self.values.get_mut(state.as_slice()) {
            actions.insert(action, value);
            return;
        }
        self.values.insert(
            Key(state.as_slice().to_vec()),
            HashMap::from([(action, value)]),
        );
    }

    /// Number of states with at least one stored value.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.values.len()
    }

    /// Number of stored (state, action) values.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored values of `state`, best first; ties in lexicographic action order.
    #[must_use]
    pub fn action_values(&self, state: &Observation) -> Vec<(Code, f64)> {
        let Some(actions) = self.values.get(state.as_slice()) else {
            return vec![];
        };
        let mut values = actions
            .iter()
            .map(|(action, value)| (Code::from(action.0.as_slice()), *value))
            .collect::<Vec<_>>();
        values.sort_by(|(a1, v1), (a2, v2)| v2.total_cmp(v1).then_with(|| a1.cmp(a2)));
        values
    }
}
