use serde::{Deserialize, Serialize};

use crate::{Color, Feedback, GameConfig, PADDING, Turn};

/// Fixed-width flattened view of the turns played in a session.
///
/// Holds `n_turns` slot groups of `len_code + 2` values each. Group `i` is turn
/// `i`'s guess colors followed by its correct and misplaced counts. Groups for
/// turns not yet played are filled with [`PADDING`].
///
/// `0` doubles as the padding color and as a legitimate feedback count. A
/// group is treated as played iff none of its guess colors is [`PADDING`],
/// which is unambiguous because real guesses never contain it.
///
/// ```text
/// n_turns = 3, len_code = 2, one turn played: guess [1, 2] -> (0, 1)
///
/// [1, 2, 0, 1 | 0, 0, 0, 0 | 0, 0, 0, 0]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    slot_width: usize,
    values: Vec<u8>,
}

impl Observation {
    /// Creates the all-padding observation of a fresh session.
    #[must_use]
    pub fn empty(config: &GameConfig) -> Self {
        Self {
            slot_width: config.slot_width(),
            values: vec![PADDING; config.observation_len()],
        }
    }

    /// Projects `turns` into an observation.
    ///
    /// # Panics
    ///
    /// Panics if there are more turns than `config.n_turns()`.
    #[must_use]
    pub fn from_turns(config: &GameConfig, turns: &[Turn]) -> Self {
        assert!(
            turns.len() <= config.n_turns(),
            "{} turns played with a budget of {}",
            turns.len(),
            config.n_turns()
        );
        let mut this = Self::empty(config);
        for (group, turn) in this.values.chunks_exact_mut(this.slot_width).zip(turns) {
            let (colors, counts) = group.split_at_mut(config.len_code());
            colors.copy_from_slice(turn.guess.colors());
            counts[0] = turn.feedback.correct;
            counts[1] = turn.feedback.misplaced;
        }
        this
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over every slot group, played or padding.
    pub fn slot_groups(&self) -> impl Iterator<Item = (&[Color], Feedback)> + '_ {
        self.values.chunks_exact(self.slot_width).map(|group| {
            let (colors, counts) = group.split_at(self.slot_width - 2);
            (colors, Feedback::new(counts[0], counts[1]))
        })
    }

    /// Iterates over the slot groups of played turns, in play order.
    pub fn played_turns(&self) -> impl Iterator<Item = (&[Color], Feedback)> + '_ {
        self.slot_groups()
            .take_while(|(colors, _)| !colors.contains(&PADDING))
    }

    #[must_use]
    pub fn turns_played(&self) -> usize {
        self.played_turns().count()
    }

    /// Returns `true` if no padding group is left, i.e. the turn budget is spent.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.turns_played() * self.slot_width == self.values.len()
    }
}
