//! Scoring a guess against a target code.
//!
//! The score is the usual Mastermind key-peg pair:
//!
//! - **correct**: positions where guess and target hold the same color
//! - **misplaced**: colors shared by both, ignoring position, minus `correct`
//!
//! "Shared colors" is the size of the multiset intersection: for every color the
//! smaller of its two counts. Repeated colors are therefore never counted twice.
//!
//! ```text
//! guess  = [1, 1, 2]
//! target = [2, 1, 3]
//! correct    = 1                                    (position 1)
//! shared     = min(2, 1) + min(1, 1) + min(0, 1) = 2  (colors 1 and 2)
//! misplaced  = 2 - 1 = 1
//! ```

use std::iter;

use serde::{Deserialize, Serialize};

use crate::Color;

/// Outcome of scoring one guess.
///
/// Invariant: `correct + misplaced <= len_code`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("({correct}, {misplaced})")]
pub struct Feedback {
    pub correct: u8,
    pub misplaced: u8,
}

impl Feedback {
    #[must_use]
    pub const fn new(correct: u8, misplaced: u8) -> Self {
        Self { correct, misplaced }
    }

    /// Returns `true` if every peg of a code of length `len_code` is correct.
    #[must_use]
    pub fn is_solved(self, len_code: usize) -> bool {
        usize::from(self.correct) == len_code
    }
}

/// Scores `guess` against `target`.
///
/// Both slices must have the same length, at most `u8::MAX`. Symmetric in its
/// arguments.
///
/// # Example
///
/// ```
/// use mastermind_engine::{Feedback, feedback::score};
///
/// assert_eq!(score(&[1, 1, 2], &[2, 1, 3]), Feedback::new(1, 1));
/// assert_eq!(score(&[1, 1, 2], &[1, 2, 2]), Feedback::new(2, 0));
/// assert_eq!(score(&[1, 2, 3, 4], &[4, 3, 2, 1]), Feedback::new(0, 4));
/// ```
#[must_use]
pub fn score(guess: &[Color], target: &[Color]) -> Feedback {
    debug_assert_eq!(guess.len(), target.len());

    let mut correct = 0;
    for (g, t) in iter::zip(guess, target) {
        if g == t {
            correct += 1;
        }
    }

    let mut remaining = [0_u8; 1 << Color::BITS];
    for &color in guess {
        remaining[usize::from(color)] += 1;
    }
    let mut shared = 0;
    for &color in target {
        let count = &mut remaining[usize::from(color)];
        if *count > 0 {
            *count -= 1;
            shared += 1;
        }
    }

    Feedback {
        correct,
        misplaced: shared - correct,
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    /// Pairwise reference scoring, independent of the counting implementation.
    fn naive_score(guess: &[Color], target: &[Color]) -> Feedback {
        let mut guess_used = vec![false; guess.len()];
        let mut target_used = vec![false; target.len()];
        let mut correct = 0;
        for i in 0..guess.len() {
            if guess[i] == target[i] {
                correct += 1;
                guess_used[i] = true;
                target_used[i] = true;
            }
        }
        let mut misplaced = 0;
        for i in 0..guess.len() {
            if guess_used[i] {
                continue;
            }
            if let Some(j) = (0..target.len()).find(|&j| !target_used[j] && target[j] == guess[i]) {
                target_used[j] = true;
                misplaced += 1;
            }
        }
        Feedback::new(correct, misplaced)
    }

    fn random_pair(rng: &mut Pcg32) -> (Vec<Color>, Vec<Color>) {
        let len = rng.random_range(1..=6);
        let n_colors = rng.random_range(1..=5);
        let guess = (0..len).map(|_| rng.random_range(1..=n_colors)).collect();
        let target = (0..len).map(|_| rng.random_range(1..=n_colors)).collect();
        (guess, target)
    }

    #[test]
    fn test_duplicate_colors_counted_once() {
        assert_eq!(score(&[1, 1, 2], &[1, 2, 2]), Feedback::new(2, 0));
        assert_eq!(score(&[1, 1, 2], &[2, 1, 3]), Feedback::new(1, 1));
        assert_eq!(score(&[1, 1, 1, 1], &[1, 2, 2, 2]), Feedback::new(1, 0));
        assert_eq!(score(&[2, 2, 1, 1], &[1, 1, 2, 2]), Feedback::new(0, 4));
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(score(&[1, 2, 3, 4], &[1, 2, 3, 4]), Feedback::new(4, 0));
        assert!(score(&[1, 2, 3, 4], &[1, 2, 3, 4]).is_solved(4));
    }

    #[test]
    fn test_all_misplaced() {
        assert_eq!(score(&[1, 2, 3, 4], &[4, 3, 2, 1]), Feedback::new(0, 4));
    }

    #[test]
    fn test_disjoint_colors() {
        assert_eq!(score(&[1, 1, 2], &[3, 3, 3]), Feedback::new(0, 0));
    }

    #[test]
    fn test_padding_row_scores_zero() {
        assert_eq!(score(&[1, 2, 3], &[0, 0, 0]), Feedback::new(0, 0));
    }

    #[test]
    fn test_matches_pairwise_reference() {
        let mut rng = Pcg32::seed_from_u64(0x5eed);
        for _ in 0..2000 {
            let (guess, target) = random_pair(&mut rng);
            assert_eq!(
                score(&guess, &target),
                naive_score(&guess, &target),
                "guess={guess:?}, target={target:?}"
            );
        }
    }

    #[test]
    fn test_score_bounded_by_length() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..2000 {
            let (guess, target) = random_pair(&mut rng);
            let feedback = score(&guess, &target);
            assert!(usize::from(feedback.correct + feedback.misplaced) <= guess.len());
        }
    }

    #[test]
    fn test_score_is_symmetric() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..2000 {
            let (a, b) = random_pair(&mut rng);
            assert_eq!(score(&a, &b), score(&b, &a), "a={a:?}, b={b:?}");
        }
    }
}
