//! Settings snapshot.
//!
//! Plain data handed in by the caller for one computation. Nothing here
//! caches or mutates behind the caller's back.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use super::person::{Person, Role, RoleKind, PM_ROLE_ID};
use super::schedule_entry::PersonalScheduleEntry;
use super::time::{parse_time, TimeWindow};
use super::track::{DailyTrackAssignment, Track};
use crate::error::Result;

/// Daily break (`HH:MM` bounds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakTime {
    pub start: String,
    pub end: String,
}

/// Team settings snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Team members.
    #[serde(default)]
    pub people: Vec<Person>,
    /// Roles.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Tracks in configured order.
    #[serde(default)]
    pub tracks: Vec<Track>,
    /// Personal schedule entries.
    #[serde(default)]
    pub personal_schedules: Vec<PersonalScheduleEntry>,
    /// Track assignments by date (also the pairing history).
    #[serde(default)]
    pub track_assignments: BTreeMap<NaiveDate, DailyTrackAssignment>,
    /// Daily break.
    #[serde(default)]
    pub break_time: Option<BreakTime>,
    /// Team holidays.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

impl Settings {
    /// Creates an empty snapshot with the built-in roles.
    pub fn new() -> Self {
        Self {
            roles: vec![Role::pm(), Role::dev()],
            ..Self::default()
        }
    }

    /// Adds a person.
    pub fn with_person(mut self, person: Person) -> Self {
        self.people.push(person);
        self
    }

    /// Adds a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Adds a track.
    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    /// Adds a personal schedule entry.
    pub fn with_entry(mut self, entry: PersonalScheduleEntry) -> Self {
        self.personal_schedules.push(entry);
        self
    }

    /// Stores a track assignment under its date.
    pub fn with_assignment(mut self, assignment: DailyTrackAssignment) -> Self {
        self.track_assignments.insert(assignment.date, assignment);
        self
    }

    /// Inserts the `PM` and `Dev` roles if missing.
    ///
    /// Returns `true` if anything was added.
    pub fn ensure_default_roles(&mut self) -> bool {
        let mut changed = false;
        for role in [Role::pm(), Role::dev()] {
            if !self.roles.iter().any(|r| r.id == role.id) {
                warn!("settings missing built-in role '{}', restoring", role.id);
                self.roles.push(role);
                changed = true;
            }
        }
        changed
    }

    /// Person by id.
    pub fn person(&self, person_id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == person_id)
    }

    /// Role by id.
    pub fn role(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == role_id)
    }

    /// Track by id.
    pub fn track(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    /// Role capability of a person.
    ///
    /// No role, or a dangling role reference, counts as `Dev`. The
    /// built-in ids resolve even if the role records are missing.
    pub fn role_kind_of(&self, person_id: &str) -> RoleKind {
        let Some(role_id) = self.person(person_id).and_then(|p| p.role_id.as_deref()) else {
            return RoleKind::Dev;
        };
        match self.role(role_id) {
            Some(role) => role.kind,
            None if role_id == PM_ROLE_ID => RoleKind::Pm,
            None => RoleKind::Dev,
        }
    }

    /// Whether a person is a plain developer (neither PM nor designer).
    pub fn is_plain_dev(&self, person_id: &str) -> bool {
        self.role_kind_of(person_id) == RoleKind::Dev
    }

    /// All plain developers, in roster order.
    pub fn plain_devs(&self) -> impl Iterator<Item = &Person> {
        self.people.iter().filter(move |p| self.is_plain_dev(&p.id))
    }

    /// Active tracks in configured order.
    pub fn active_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.active)
    }

    /// Schedule entries of a person on a date.
    pub fn entries_for<'a>(
        &'a self,
        date: NaiveDate,
        person_id: &'a str,
    ) -> impl Iterator<Item = &'a PersonalScheduleEntry> + 'a {
        self.personal_schedules
            .iter()
            .filter(move |e| e.date == date && e.person_id == person_id)
    }

    /// Whether a person has a full day off on `date`.
    pub fn has_day_off(&self, date: NaiveDate, person_id: &str) -> bool {
        self.entries_for(date, person_id).any(|e| e.is_day_off())
    }

    /// Track assignment for a date.
    pub fn assignment_for(&self, date: NaiveDate) -> Option<&DailyTrackAssignment> {
        self.track_assignments.get(&date)
    }

    /// Whether `date` is a team holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Parsed break window, if configured.
    pub fn break_window(&self) -> Result<Option<TimeWindow>> {
        match &self.break_time {
            Some(b) => Ok(Some(TimeWindow::checked(
                parse_time(&b.start)?,
                parse_time(&b.end)?,
            )?)),
            None => Ok(None),
        }
    }
}
