use std::{iter::FusedIterator, thread};

use crate::{Code, Color, GameConfig, Guess, Observation, feedback};

/// Guess spaces at least this large are enumerated on one thread per first color.
const PARALLEL_THRESHOLD: u64 = 1 << 15;

/// Every code of a configuration, in lexicographic order.
///
/// Equivalent to counting in base `n_colors` with digits `1..=n_colors`:
///
/// ```
/// use mastermind_engine::{CodeSpace, GameConfig};
///
/// let config = GameConfig::new(2, 1, 2).unwrap();
/// let codes = CodeSpace::new(&config)
///     .map(|code| code.colors().to_vec())
///     .collect::<Vec<_>>();
/// assert_eq!(codes, [[1, 1], [1, 2], [2, 1], [2, 2]]);
/// ```
#[derive(Debug, Clone)]
pub struct CodeSpace {
    n_colors: Color,
    fixed: usize,
    next: Option<Vec<Color>>,
}

impl CodeSpace {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            n_colors: config.n_colors(),
            fixed: 0,
            next: Some(vec![1; config.len_code()]),
        }
    }

    /// Only the codes whose first peg is `first`.
    #[must_use]
    pub fn with_first_color(config: &GameConfig, first: Color) -> Self {
        let mut start = vec![1; config.len_code()];
        start[0] = first;
        Self {
            n_colors: config.n_colors(),
            fixed: 1,
            next: Some(start),
        }
    }

    fn advance(&mut self) {
        let Some(colors) = &mut self.next else {
            return;
        };
        for color in colors[self.fixed..].iter_mut().rev() {
            if *color < self.n_colors {
                *color += 1;
                return;
            }
            *color = 1;
        }
        self.next = None;
    }
}

impl Iterator for CodeSpace {
    type Item = Code;

    fn next(&mut self) -> Option<Self::Item> {
        let code = Code::from(self.next.clone()?);
        self.advance();
        Some(code)
    }
}

impl FusedIterator for CodeSpace {}

/// Prunes the guess space down to the guesses worth playing.
///
/// A candidate is **coherent** with an observation if, taken as the hidden
/// code, it reproduces the feedback of every played turn. It is **novel** if
/// it has not been played yet. Legal actions are the candidates that are both.
///
/// The filter enumerates all `n_colors ^ len_code` codes on every call, so its
/// cost grows exponentially with the code length; it is meant for small games.
///
/// Terminal observations have no legal actions: once the turn budget is spent
/// the result is empty, and once the code is found the only coherent
/// candidate is the winning guess, which is not novel.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyFilter {
    config: GameConfig,
}

impl ConsistencyFilter {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Returns `true` if `candidate` reproduces every played turn's feedback.
    ///
    /// Padding groups are not constraints.
    #[must_use]
    pub fn is_coherent(&self, candidate: &[Color], observation: &Observation) -> bool {
        observation
            .played_turns()
            .all(|(guess, expected)| feedback::score(candidate, guess) == expected)
    }

    /// Coherent candidates that are not in `played`, in lexicographic order.
    #[must_use]
    pub fn legal_actions(&self, observation: &Observation, played: &[Guess]) -> Vec<Guess> {
        if observation.is_full() {
            return vec![];
        }
        let is_legal = |code: &Code| {
            self.is_coherent(code.colors(), observation) && !played.contains(code)
        };

        let parallel = self.config.n_colors() > 1
            && self
                .config
                .guess_space_size()
                .is_none_or(|size| size >= PARALLEL_THRESHOLD);
        if !parallel {
            return CodeSpace::new(&self.config).filter(is_legal).collect();
        }

        let mut chunks: Vec<Vec<Guess>> = vec![vec![]; usize::from(self.config.n_colors())];
        thread::scope(|s| {
            for (chunk, first) in chunks.iter_mut().zip(1..=self.config.n_colors()) {
                let config = &self.config;
                let is_legal = &is_legal;
                s.spawn(move || {
                    *chunk = CodeSpace::with_first_color(config, first)
                        .filter(is_legal)
                        .collect();
                });
            }
        });
        chunks.concat()
    }

    /// Like [`Self::legal_actions`], with the guesses recorded in the
    /// observation as the played set.
    #[must_use]
    pub fn legal_actions_for(&self, observation: &Observation) -> Vec<Guess> {
        let played = observation
            .played_turns()
            .map(|(colors, _)| Code::from(colors))
            .collect::<Vec<_>>();
        self.legal_actions(observation, &played)
    }
}
