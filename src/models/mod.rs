//! Standup board domain models.
//!
//! Plain data snapshots passed into the engine by the caller: people,
//! roles, tracks, personal schedules, daily track assignments, and
//! tasks. Derived [`CalendarEvent`]s are produced by projection and
//! never stored.
//!
//! # Time Model
//! Dates are [`chrono::NaiveDate`]. Times of day are minutes since
//! midnight, written as `HH:MM` on the wire.

mod event;
mod person;
mod schedule_entry;
mod settings;
mod task;
pub mod time;
mod track;

pub use event::{CalendarEvent, EventCategory};
pub use person::{Person, Role, RoleKind, DEV_ROLE_ID, PM_ROLE_ID};
pub use schedule_entry::{EntryKind, PersonalScheduleEntry};
pub use settings::{BreakTime, Settings};
pub use task::{
    DevMode, DevPhase, DevPlan, ExternalParticipant, Task, TaskConstraints, TaskRoles, TaskStatus,
};
pub use time::{format_time, parse_time, TimeWindow};
pub use track::{DailyTrackAssignment, Track, ABSENT_KEY};
