//! Standup task model.
//!
//! A task may carry a date and a time window, and a role block saying
//! who works on it: an optional PM, designers, and a developer plan.
//! The developer plan keeps its mode and required track count as two
//! separate typed fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::{parse_time, TimeWindow};
use crate::error::Result;

/// Lifecycle status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    #[default]
    Draft,
    Planned,
    Scheduled,
    Done,
    Canceled,
}

/// How developer resourcing is expressed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DevMode {
    /// No developers involved.
    #[default]
    NoDev,
    /// A number of pairing tracks.
    Tracks,
    /// Every plain developer.
    AllDev,
}

/// Workflow phase of the developer plan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DevPhase {
    #[default]
    Draft,
    Phase1Planned,
    Phase2Fixed,
}

/// Developer plan of a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DevPlan {
    /// Resourcing mode.
    pub mode: DevMode,
    /// Tracks needed (meaningful in `Tracks` mode).
    #[serde(default)]
    pub required_track_count: usize,
    /// Tracks assigned so far.
    #[serde(default)]
    pub assigned_track_ids: Vec<String>,
    /// Workflow phase.
    #[serde(default)]
    pub phase: DevPhase,
}

impl DevPlan {
    /// A plan with no developers.
    pub fn no_dev() -> Self {
        Self::default()
    }

    /// A plan involving every plain developer.
    pub fn all_dev() -> Self {
        Self {
            mode: DevMode::AllDev,
            ..Self::default()
        }
    }

    /// A plan needing `required` tracks.
    pub fn tracks(required: usize) -> Self {
        Self {
            mode: DevMode::Tracks,
            required_track_count: required,
            ..Self::default()
        }
    }

    /// Sets the assigned tracks.
    pub fn with_assigned(mut self, track_ids: &[&str]) -> Self {
        self.assigned_track_ids = track_ids.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Sets the phase.
    pub fn with_phase(mut self, phase: DevPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Whether enough tracks are assigned.
    ///
    /// A zero requirement is never complete.
    pub fn is_complete(&self) -> bool {
        self.required_track_count > 0
            && self.assigned_track_ids.len() >= self.required_track_count
    }

    /// Tracks still missing.
    pub fn remaining_tracks(&self) -> usize {
        self.required_track_count
            .saturating_sub(self.assigned_track_ids.len())
    }
}

/// Who works on a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskRoles {
    /// Assigned PM.
    #[serde(default)]
    pub pm_id: Option<String>,
    /// Assigned designers.
    #[serde(default)]
    pub designer_ids: Vec<String>,
    /// Developer plan.
    #[serde(default)]
    pub dev_plan: DevPlan,
}

/// Edit locks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskConstraints {
    /// Time may not change.
    #[serde(default)]
    pub time_locked: bool,
    /// Role assignment may not change.
    #[serde(default)]
    pub roles_locked: bool,
}

/// A participant from another team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalParticipant {
    /// External team identifier.
    pub team_id: String,
    /// Attendance is required.
    #[serde(default)]
    pub required: bool,
    /// The external team fixed the time.
    #[serde(default)]
    pub time_fixed: bool,
}

/// A standup task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Scheduled date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Start time (`HH:MM`).
    #[serde(default)]
    pub start_time: Option<String>,
    /// Duration (minutes).
    #[serde(default)]
    pub duration_min: Option<i32>,
    /// Role block.
    #[serde(default)]
    pub roles: TaskRoles,
    /// Edit locks.
    #[serde(default)]
    pub constraints: TaskConstraints,
    /// External participants.
    #[serde(default)]
    pub external_participants: Vec<ExternalParticipant>,
}

impl Task {
    /// Creates a draft task with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            status: TaskStatus::Draft,
            date: None,
            start_time: None,
            duration_min: None,
            roles: TaskRoles::default(),
            constraints: TaskConstraints::default(),
            external_participants: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the date.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets start time and duration.
    pub fn at(mut self, start: impl Into<String>, duration_min: i32) -> Self {
        self.start_time = Some(start.into());
        self.duration_min = Some(duration_min);
        self
    }

    /// Sets the PM.
    pub fn with_pm(mut self, pm_id: impl Into<String>) -> Self {
        self.roles.pm_id = Some(pm_id.into());
        self
    }

    /// Adds a designer.
    pub fn with_designer(mut self, designer_id: impl Into<String>) -> Self {
        self.roles.designer_ids.push(designer_id.into());
        self
    }

    /// Sets the developer plan.
    pub fn with_dev_plan(mut self, plan: DevPlan) -> Self {
        self.roles.dev_plan = plan;
        self
    }

    /// Sets the edit locks.
    pub fn with_constraints(mut self, constraints: TaskConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Adds an external participant.
    pub fn with_external(mut self, participant: ExternalParticipant) -> Self {
        self.external_participants.push(participant);
        self
    }

    /// Whether the task is on `date`.
    #[inline]
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == Some(date)
    }

    /// Parsed start time, if set.
    pub fn start_min(&self) -> Result<Option<i32>> {
        self.start_time.as_deref().map(parse_time).transpose()
    }

    /// The task's time window.
    ///
    /// `None` unless both start time and duration are set.
    pub fn time_window(&self) -> Result<Option<TimeWindow>> {
        match (self.start_min()?, self.duration_min) {
            (Some(start), Some(duration)) => TimeWindow::from_duration(start, duration).map(Some),
            _ => Ok(None),
        }
    }

    /// Whether the time may not be edited.
    ///
    /// Locked by the task's own flag or by any external team that
    /// fixed the time.
    pub fn is_time_locked(&self) -> bool {
        self.constraints.time_locked
            || self.external_participants.iter().any(|p| p.time_fixed)
    }

    /// Whether roles may not be edited.
    pub fn is_roles_locked(&self) -> bool {
        self.constraints.roles_locked
    }
}
