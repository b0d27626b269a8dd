//! Pairing-track auto-assignment.
//!
//! Fills the day's active tracks from the pool of unplaced developers
//! while keeping repeated pairings rare.
//!
//! # Algorithm
//!
//! 1. Count, over every stored day before the target date, how often
//!    each unordered pair of people shared a track ([`PairingHistory`]).
//! 2. Pool = active plain developers not yet placed today (in a track
//!    or absent) and without a full day off.
//! 3. For each active track in configured order, until it is full or
//!    the pool is empty:
//!    - empty track: pick a pool member uniformly at random;
//!    - otherwise: shuffle the pool, then take the first candidate with
//!      the lowest summed pair count against the current members.
//!
//! Team holidays are left untouched.
//!
//! This is a greedy heuristic, O(capacity * pool) per track. Later
//! tracks may stay under capacity when the pool runs out.
//!
//! Pair counts are not normalized by how often a person has been
//! present, so newcomers look cheap to pair with.
//!
//! # Randomness
//! The random source is injected. Tests pass a seeded
//! `rand::rngs::SmallRng`; production callers can use
//! [`auto_assign_random`].

use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{DailyTrackAssignment, Settings};

/// Symmetric pair-frequency table built from stored track assignments.
#[derive(Debug, Clone, Default)]
pub struct PairingHistory {
    counts: HashMap<(String, String), u32>,
}

impl PairingHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts co-memberships over the given days (absent buckets excluded).
    pub fn from_assignments<'a, I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = &'a DailyTrackAssignment>,
    {
        let mut history = Self::new();
        for day in assignments {
            for (_, members) in day.tracks() {
                for (i, a) in members.iter().enumerate() {
                    for b in &members[i + 1..] {
                        history.record(a, b);
                    }
                }
            }
        }
        history
    }

    /// History from the stored days strictly before `date`.
    pub fn from_settings(settings: &Settings, date: NaiveDate) -> Self {
        Self::from_assignments(settings.track_assignments.range(..date).map(|(_, a)| a))
    }

    /// Records one co-membership.
    pub fn record(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        *self.counts.entry(pair_key(a, b)).or_default() += 1;
    }

    /// Times `a` and `b` shared a track.
    pub fn count(&self, a: &str, b: &str) -> u32 {
        self.counts.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    /// Summed pair count of `candidate` against `members`.
    pub fn score(&self, candidate: &str, members: &[String]) -> u32 {
        members.iter().map(|m| self.count(candidate, m)).sum()
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// People eligible for auto-assignment on `date`, in roster order.
pub fn assignable_pool(
    date: NaiveDate,
    settings: &Settings,
    current: &DailyTrackAssignment,
) -> Vec<String> {
    settings
        .people
        .iter()
        .filter(|p| p.active)
        .filter(|p| settings.is_plain_dev(&p.id))
        .filter(|p| !current.is_placed(&p.id))
        .filter(|p| !settings.has_day_off(date, &p.id))
        .map(|p| p.id.clone())
        .collect()
}

/// Fills remaining track capacity for `date`.
///
/// Members already in `current` (tracks and absent) are kept in place.
/// On a team holiday `current` is returned as is.
pub fn auto_assign<R: Rng>(
    date: NaiveDate,
    settings: &Settings,
    current: &DailyTrackAssignment,
    rng: &mut R,
) -> DailyTrackAssignment {
    if settings.is_holiday(date) {
        debug!("auto-assign {}: holiday, skipped", date);
        let mut result = current.clone();
        result.date = date;
        return result;
    }

    let history = PairingHistory::from_settings(settings, date);
    let mut pool = assignable_pool(date, settings, current);
    let mut result = current.clone();
    result.date = date;

    debug!("auto-assign {}: {} assignable", date, pool.len());

    for track in settings.active_tracks() {
        if pool.is_empty() {
            break;
        }
        let mut members = result.members(&track.id).to_vec();
        while members.len() < track.capacity && !pool.is_empty() {
            let idx = if members.is_empty() {
                rng.random_range(0..pool.len())
            } else {
                least_paired(&pool, &members, &history, rng)
            };
            let person = pool.remove(idx);
            debug!("track '{}' <- {}", track.id, person);
            members.push(person);
        }
        if !members.is_empty() {
            result.buckets.insert(track.id.clone(), members);
        }
    }

    if !pool.is_empty() {
        debug!("auto-assign {}: {} left without a track", date, pool.len());
    }
    result
}

/// [`auto_assign`] with the thread-local generator.
pub fn auto_assign_random(
    date: NaiveDate,
    settings: &Settings,
    current: &DailyTrackAssignment,
) -> DailyTrackAssignment {
    auto_assign(date, settings, current, &mut rand::rng())
}

/// Index of the pool member with the lowest score; ties resolved by a
/// shuffled scan order.
fn least_paired<R: Rng>(
    pool: &[String],
    members: &[String],
    history: &PairingHistory,
    rng: &mut R,
) -> usize {
    let mut order: Vec<usize> = (0..pool.len()).collect();
    order.shuffle(rng);

    let mut best = order[0];
    let mut best_score = history.score(&pool[best], members);
    for &i in &order[1..] {
        let score = history.score(&pool[i], members);
        if score < best_score {
            best = i;
            best_score = score;
        }
    }
    best
}
