//! Input validation for board snapshots.
//!
//! Checks structural integrity of settings and tasks before they reach
//! the engine, collecting every problem instead of stopping at the
//! first. Detects:
//! - Duplicate IDs
//! - References to unknown roles, people, or tracks
//! - Malformed or inverted personal schedule times
//! - A person placed in more than one bucket on a date
//! - Zero-capacity tracks
//! - Dev plans with more tracks assigned than required
//! - Malformed task start times and negative durations
//!
//! Validation never repairs data.

use std::collections::HashSet;

use crate::models::{DevMode, Settings, Task, TimeWindow, ABSENT_KEY};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A person references a role that doesn't exist.
    InvalidRoleReference,
    /// A record references a person that doesn't exist.
    InvalidPersonReference,
    /// A record references a track that doesn't exist.
    InvalidTrackReference,
    /// A time string or interval is malformed.
    InvalidTime,
    /// A person is in more than one bucket on one date.
    DuplicatePlacement,
    /// A track cannot hold anyone.
    ZeroCapacity,
    /// More tracks assigned than the dev plan requires.
    OverAssigned,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn check_unique<'a>(
    kind_name: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {kind_name} ID: {id}"),
            ));
        }
    }
    seen
}

/// Validates a settings snapshot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_settings(settings: &Settings) -> ValidationResult {
    let mut errors = Vec::new();

    let role_ids = check_unique("role", settings.roles.iter().map(|r| r.id.as_str()), &mut errors);
    let person_ids = check_unique("person", settings.people.iter().map(|p| p.id.as_str()), &mut errors);
    let track_ids = check_unique("track", settings.tracks.iter().map(|t| t.id.as_str()), &mut errors);
    check_unique(
        "schedule entry",
        settings.personal_schedules.iter().map(|e| e.id.as_str()),
        &mut errors,
    );

    for person in &settings.people {
        if let Some(role_id) = person.role_id.as_deref() {
            if !role_ids.contains(role_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidRoleReference,
                    format!("Person '{}' references unknown role '{}'", person.id, role_id),
                ));
            }
        }
    }

    for track in &settings.tracks {
        if track.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Track '{}' has zero capacity", track.id),
            ));
        }
    }

    for entry in &settings.personal_schedules {
        if !person_ids.contains(entry.person_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPersonReference,
                format!(
                    "Schedule entry '{}' references unknown person '{}'",
                    entry.id, entry.person_id
                ),
            ));
        }
        if let Err(e) = entry.busy_window(TimeWindow::working_day()) {
            errors.push(ValidationError::new(ValidationErrorKind::InvalidTime, e.to_string()));
        }
    }

    for (date, assignment) in &settings.track_assignments {
        for bucket in assignment.buckets.keys() {
            if bucket != ABSENT_KEY && !track_ids.contains(bucket.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTrackReference,
                    format!("Assignment on {date} references unknown track '{bucket}'"),
                ));
            }
        }
        for person in assignment.duplicate_placements() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePlacement,
                format!("Person '{person}' is placed more than once on {date}"),
            ));
        }
    }

    if let Err(e) = settings.break_window() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTime,
            format!("Break time: {e}"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates tasks against a settings snapshot.
pub fn validate_tasks(tasks: &[Task], settings: &Settings) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique("task", tasks.iter().map(|t| t.id.as_str()), &mut errors);

    for task in tasks {
        let mut people: Vec<&str> = task.roles.designer_ids.iter().map(String::as_str).collect();
        people.extend(task.roles.pm_id.as_deref());
        for person_id in people {
            if settings.person(person_id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPersonReference,
                    format!("Task '{}' references unknown person '{}'", task.id, person_id),
                ));
            }
        }

        let plan = &task.roles.dev_plan;
        for track_id in &plan.assigned_track_ids {
            if settings.track(track_id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTrackReference,
                    format!("Task '{}' references unknown track '{}'", task.id, track_id),
                ));
            }
        }
        if plan.mode == DevMode::Tracks && plan.assigned_track_ids.len() > plan.required_track_count {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverAssigned,
                format!(
                    "Task '{}' has {} tracks assigned but requires {}",
                    task.id,
                    plan.assigned_track_ids.len(),
                    plan.required_track_count
                ),
            ));
        }

        if let Err(e) = task.time_window() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTime,
                format!("Task '{}': {}", task.id, e),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
