//! Pattern analysis over an opponent history.
//!
//! Pure helpers shared by the decision policies. Every "pick the best
//! gesture" step breaks ties in `Gesture::ALL` order (Rock, Paper,
//! Scissors) so results never depend on iteration order.

use crate::core::Gesture;

use super::history::OpponentHistory;

/// How many times each gesture appears, indexed by `Gesture::index`.
#[must_use]
pub fn frequency_counts(history: &OpponentHistory) -> [u32; 3] {
    let mut counts = [0u32; 3];
    for gesture in history.iter() {
        counts[gesture.index()] += 1;
    }
    counts
}

/// The most common gesture, or `None` for an empty history.
#[must_use]
pub fn most_frequent(history: &OpponentHistory) -> Option<Gesture> {
    if history.is_empty() {
        return None;
    }
    Some(argmax(&frequency_counts(history)))
}

/// Recency-weighted score per gesture plus the summed weight.
///
/// Entry `i` (oldest = 0) weighs `base^i`. Scores are scaled so the newest
/// entry weighs exactly 1; the scaling is uniform, so rankings and the
/// score-to-total ratio match the unscaled form while long histories stay
/// finite.
#[must_use]
pub fn recency_scores(history: &OpponentHistory, base: f64) -> ([f64; 3], f64) {
    let mut scores = [0.0f64; 3];
    let mut total = 0.0f64;
    let newest = history.len().saturating_sub(1) as f64;

    for (i, gesture) in history.iter().enumerate() {
        let weight = base.powf(i as f64 - newest);
        scores[gesture.index()] += weight;
        total += weight;
    }

    (scores, total)
}

/// Continue a 3-cycle started by `second_last -> last`.
///
/// Forward cycle: Rock, Paper, Scissors, Rock.
/// Reverse cycle: Rock, Scissors, Paper, Rock.
/// Repeats are not a cycle and predict nothing.
#[must_use]
pub fn predict_cycle(second_last: Gesture, last: Gesture) -> Option<Gesture> {
    if second_last == last {
        return None;
    }

    if last == second_last.counter() {
        // Forward: each step moves to the gesture that beats the previous one.
        Some(last.counter())
    } else if second_last.beats(last) {
        // Reverse: each step moves to the gesture the previous one beats.
        Some(last.counter().counter())
    } else {
        None
    }
}

/// Highest-scoring gesture; the earliest in `Gesture::ALL` wins ties.
#[must_use]
pub fn argmax<T: PartialOrd + Copy>(scores: &[T; 3]) -> Gesture {
    let mut best = Gesture::ALL[0];
    for gesture in Gesture::ALL.into_iter().skip(1) {
        if scores[gesture.index()] > scores[best.index()] {
            best = gesture;
        }
    }
    best
}
