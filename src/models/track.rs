//! Pairing tracks and per-day track assignments.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reserved bucket key holding people unavailable for the day.
pub const ABSENT_KEY: &str = "absent";

/// A capacity-bounded pairing unit.
///
/// Inactive tracks are kept so historical assignments still resolve,
/// but they take no new members and are not rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Unique track identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Maximum members (default: 2).
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Whether the track takes part in assignment.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Role tag of the track.
    #[serde(default)]
    pub role_id: Option<String>,
}

fn default_capacity() -> usize {
    2
}

fn default_active() -> bool {
    true
}

impl Track {
    /// Creates an active pair track.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity: default_capacity(),
            active: true,
            role_id: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the role tag.
    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    /// Marks the track inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Who is in which track on one date.
///
/// Buckets map a track id (or [`ABSENT_KEY`]) to an ordered member list.
/// A person belongs to at most one bucket per date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyTrackAssignment {
    /// Date of the assignment.
    pub date: NaiveDate,
    /// Bucket key → members in placement order.
    #[serde(default)]
    pub buckets: BTreeMap<String, Vec<String>>,
}

impl DailyTrackAssignment {
    /// Creates an empty assignment for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            buckets: BTreeMap::new(),
        }
    }

    /// Adds members to a track.
    pub fn with_track(mut self, track_id: impl Into<String>, members: &[&str]) -> Self {
        self.buckets
            .entry(track_id.into())
            .or_default()
            .extend(members.iter().map(|m| m.to_string()));
        self
    }

    /// Marks people absent.
    pub fn with_absent(self, people: &[&str]) -> Self {
        self.with_track(ABSENT_KEY, people)
    }

    /// Members of a track (empty if none).
    pub fn members(&self, track_id: &str) -> &[String] {
        self.buckets.get(track_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// People marked absent.
    pub fn absent(&self) -> &[String] {
        self.members(ABSENT_KEY)
    }

    /// Iterates real tracks (excluding the absent bucket).
    pub fn tracks(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.buckets
            .iter()
            .filter(|(k, _)| k.as_str() != ABSENT_KEY)
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The bucket a person is in, if any.
    pub fn bucket_of(&self, person_id: &str) -> Option<&str> {
        self.buckets
            .iter()
            .find(|(_, members)| members.iter().any(|m| m == person_id))
            .map(|(k, _)| k.as_str())
    }

    /// Whether a person is placed in any bucket (including absent).
    pub fn is_placed(&self, person_id: &str) -> bool {
        self.bucket_of(person_id).is_some()
    }

    /// Whether a person is a member of one of `track_ids`.
    pub fn in_any_track(&self, person_id: &str, track_ids: &[String]) -> bool {
        track_ids
            .iter()
            .any(|t| self.members(t).iter().any(|m| m == person_id))
    }

    /// Appends a member to a bucket.
    pub fn push(&mut self, bucket: &str, person_id: impl Into<String>) {
        self.buckets
            .entry(bucket.to_string())
            .or_default()
            .push(person_id.into());
    }

    /// People placed in more than one bucket (should be empty).
    pub fn duplicate_placements(&self) -> Vec<String> {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for members in self.buckets.values() {
            for m in members {
                *seen.entry(m.as_str()).or_default() += 1;
            }
        }
        seen.into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(p, _)| p.to_string())
            .collect()
    }
}
