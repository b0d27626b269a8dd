//! Availability and conflict-resolution engine for team standup boards.
//!
//! Given a roster, personal time blocks, pairing-track assignments, and
//! tasks with time windows, the engine answers who is free and when,
//! what is on each person's plate, whether a placement collides, how to
//! fill today's pairing tracks fairly, and where each item goes on the
//! month board.
//!
//! # Modules
//!
//! - **`models`**: Snapshot types — `Person`, `Role`, `Track`,
//!   `DailyTrackAssignment`, `PersonalScheduleEntry`, `Task`, `Settings`,
//!   plus `TimeWindow` and the derived `CalendarEvent`
//! - **`availability`**: Busy/free intervals and common free slots
//! - **`projection`**: Which events apply to a person on a date
//! - **`conflict`**: Placement collision checks and time-write gating
//! - **`assignment`**: Pairing-frequency history and track auto-assignment
//! - **`layout`**: Month grid math, cell packing, batch reorganization
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling refs)
//! - **`config`**: Working day and board geometry
//!
//! # Architecture
//!
//! Every computation is a function of the snapshots passed in. There is
//! no cache and no shared mutable state; persistence, rendering, and
//! retries belong to the caller. The only nondeterminism is the
//! injected random source used by auto-assignment.

pub mod assignment;
pub mod availability;
pub mod config;
pub mod conflict;
pub mod error;
pub mod layout;
pub mod models;
pub mod projection;
pub mod validation;

pub use error::{Result, StandupError};
