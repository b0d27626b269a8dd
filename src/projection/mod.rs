//! Event projection: what is on one person's plate on a date.
//!
//! A task applies to a person when the person is its PM, one of its
//! designers, or satisfies its developer plan:
//!
//! | Mode | Plain developer sees the task when |
//! |------|-------------------------------------|
//! | `NoDev` | never |
//! | `AllDev` | always |
//! | `Tracks`, incomplete | always (nobody looks falsely free while tracks are pending) |
//! | `Tracks`, complete | they are in an assigned track on that date |
//!
//! Personal schedule entries on the date are always projected.
//!
//! Projection is a pure function of its inputs.

use chrono::NaiveDate;

use crate::config::WorkingDay;
use crate::error::Result;
use crate::models::{
    CalendarEvent, DevMode, EntryKind, EventCategory, PersonalScheduleEntry, Settings, Task,
};

/// Whether the task's developer plan covers `person_id` on `date`.
fn dev_plan_covers(person_id: &str, task: &Task, date: NaiveDate, settings: &Settings) -> bool {
    let plan = &task.roles.dev_plan;
    match plan.mode {
        DevMode::NoDev => false,
        DevMode::AllDev => settings.is_plain_dev(person_id),
        DevMode::Tracks => {
            if !settings.is_plain_dev(person_id) {
                return false;
            }
            if !plan.is_complete() {
                return true;
            }
            settings
                .assignment_for(date)
                .is_some_and(|a| a.in_any_track(person_id, &plan.assigned_track_ids))
        }
    }
}

/// Whether `task` applies to `person_id` on `date`.
pub fn sees_task(person_id: &str, task: &Task, date: NaiveDate, settings: &Settings) -> bool {
    task.roles.pm_id.as_deref() == Some(person_id)
        || task.roles.designer_ids.iter().any(|d| d == person_id)
        || dev_plan_covers(person_id, task, date, settings)
}

/// Everyone the task applies to on `date`.
///
/// PM first, then designers, then covered developers in roster order,
/// without duplicates.
pub fn confirmed_participants(task: &Task, date: NaiveDate, settings: &Settings) -> Vec<String> {
    let mut participants: Vec<String> = Vec::new();
    let mut add = |id: &str| {
        if !participants.iter().any(|p| p == id) {
            participants.push(id.to_string());
        }
    };

    if let Some(pm) = task.roles.pm_id.as_deref() {
        add(pm);
    }
    for designer in &task.roles.designer_ids {
        add(designer);
    }
    for person in &settings.people {
        if dev_plan_covers(&person.id, task, date, settings) {
            add(&person.id);
        }
    }
    participants
}

/// Projects tasks and personal entries onto calendars.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    working_day: WorkingDay,
}

impl Projector {
    /// Creates a projector over the default working day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the working day used for day-off events.
    pub fn with_working_day(mut self, working_day: WorkingDay) -> Self {
        self.working_day = working_day;
        self
    }

    /// Events for `person_id` on `date`.
    ///
    /// Only tasks on `date` with both a start time and a duration are
    /// considered. Fails on malformed task times or schedule entries.
    pub fn events_for(
        &self,
        date: NaiveDate,
        person_id: &str,
        tasks: &[Task],
        settings: &Settings,
    ) -> Result<Vec<CalendarEvent>> {
        let mut events = Vec::new();

        for task in tasks.iter().filter(|t| t.is_on(date)) {
            let Some(window) = task.time_window()? else {
                continue;
            };
            if sees_task(person_id, task, date, settings) {
                events.push(CalendarEvent::new(
                    &task.id,
                    &task.title,
                    window,
                    EventCategory::Task,
                ));
            }
        }

        for entry in settings.entries_for(date, person_id) {
            events.push(self.entry_event(entry)?);
        }

        Ok(events)
    }

    fn entry_event(&self, entry: &PersonalScheduleEntry) -> Result<CalendarEvent> {
        let window = entry.busy_window(self.working_day.window())?;
        let category = if entry.is_day_off() {
            EventCategory::DayOff
        } else {
            EventCategory::PersonalBlock
        };
        let title = if entry.reason.is_empty() {
            entry_label(entry.kind).to_string()
        } else {
            entry.reason.clone()
        };
        Ok(CalendarEvent::new(&entry.id, title, window, category))
    }
}

fn entry_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::DayOff => "Day off",
        EntryKind::Partial => "Unavailable",
        EntryKind::NonProject => "Non-project work",
        EntryKind::Personal => "Personal",
    }
}

/// Events for `person_id` on `date` over the default working day.
pub fn events_for(
    date: NaiveDate,
    person_id: &str,
    tasks: &[Task],
    settings: &Settings,
) -> Result<Vec<CalendarEvent>> {
    Projector::new().events_for(date, person_id, tasks, settings)
}

/// Sorts events by start time, keeping the input order for equal starts.
pub fn sort_events(events: &mut [CalendarEvent]) {
    events.sort_by_key(|e| e.window.start_min);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DailyTrackAssignment, DevPlan, Person, Role, RoleKind, TimeWindow, Track, PM_ROLE_ID,
    };

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    fn team() -> Settings {
        Settings::new()
            .with_role(Role::new("designer", "Designer", RoleKind::Designer))
            .with_person(Person::new("pm").with_role(PM_ROLE_ID))
            .with_person(Person::new("des").with_role("designer"))
            .with_person(Person::new("dev1"))
            .with_person(Person::new("dev2"))
            .with_person(Person::new("dev3"))
            .with_person(Person::new("dev4"))
            .with_track(Track::new("t1"))
            .with_track(Track::new("t2"))
            .with_track(Track::new("t3"))
            .with_assignment(
                DailyTrackAssignment::new(d())
                    .with_track("t1", &["dev1"])
                    .with_track("t2", &["dev2"])
                    .with_track("t3", &["dev3"]),
            )
    }

    fn task(plan: DevPlan) -> Task {
        Task::new("T1").with_title("Sync").on(d()).at("10:00", 30).with_dev_plan(plan)
    }

    fn ids(events: &[CalendarEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_incomplete_tracks_visible_to_every_dev() {
        let s = team();
        let tasks = vec![task(DevPlan::tracks(2).with_assigned(&["t1"]))];
        for dev in ["dev1", "dev2", "dev3", "dev4"] {
            assert_eq!(ids(&events_for(d(), dev, &tasks, &s).unwrap()), vec!["T1"], "{dev}");
        }
        assert!(events_for(d(), "pm", &tasks, &s).unwrap().is_empty());
        assert!(events_for(d(), "des", &tasks, &s).unwrap().is_empty());
    }

    #[test]
    fn test_complete_tracks_visible_to_members_only() {
        let s = team();
        let tasks = vec![task(DevPlan::tracks(2).with_assigned(&["t1", "t2"]))];
        assert_eq!(ids(&events_for(d(), "dev1", &tasks, &s).unwrap()), vec!["T1"]);
        assert_eq!(ids(&events_for(d(), "dev2", &tasks, &s).unwrap()), vec!["T1"]);
        assert!(events_for(d(), "dev3", &tasks, &s).unwrap().is_empty());
        assert!(events_for(d(), "dev4", &tasks, &s).unwrap().is_empty());
    }

    #[test]
    fn test_complete_tracks_without_assignment_record() {
        let mut s = team();
        s.track_assignments.clear();
        let tasks = vec![task(DevPlan::tracks(1).with_assigned(&["t1"]))];
        assert!(events_for(d(), "dev1", &tasks, &s).unwrap().is_empty());
    }

    #[test]
    fn test_all_dev_and_no_dev() {
        let s = team();
        let all = vec![task(DevPlan::all_dev())];
        assert_eq!(events_for(d(), "dev4", &all, &s).unwrap().len(), 1);
        assert!(events_for(d(), "pm", &all, &s).unwrap().is_empty());

        let none = vec![task(DevPlan::no_dev())];
        assert!(events_for(d(), "dev1", &none, &s).unwrap().is_empty());
    }

    #[test]
    fn test_pm_and_designer_always_see_their_task() {
        let s = team();
        let tasks = vec![task(DevPlan::no_dev()).with_pm("pm").with_designer("des")];
        assert_eq!(events_for(d(), "pm", &tasks, &s).unwrap().len(), 1);
        assert_eq!(events_for(d(), "des", &tasks, &s).unwrap().len(), 1);
    }

    #[test]
    fn test_untimed_and_other_date_tasks_skipped() {
        let s = team();
        let other = NaiveDate::from_ymd_opt(2025, 4, 11).unwrap();
        let tasks = vec![
            Task::new("untimed").on(d()).with_dev_plan(DevPlan::all_dev()),
            task(DevPlan::all_dev()).on(other),
        ];
        assert!(events_for(d(), "dev1", &tasks, &s).unwrap().is_empty());
    }

    #[test]
    fn test_personal_entries_projected() {
        let s = team()
            .with_entry(PersonalScheduleEntry::day_off("off", "dev1", d()))
            .with_entry(
                PersonalScheduleEntry::block("blk", "dev2", d(), EntryKind::Personal, "15:00", "15:30")
                    .with_reason("Bank"),
            );
        let dev1 = events_for(d(), "dev1", &[], &s).unwrap();
        assert_eq!(dev1[0].category, EventCategory::DayOff);
        assert_eq!(dev1[0].window, TimeWindow::working_day());
        assert_eq!(dev1[0].title, "Day off");

        let dev2 = events_for(d(), "dev2", &[], &s).unwrap();
        assert_eq!(dev2[0].category, EventCategory::PersonalBlock);
        assert_eq!(dev2[0].window, TimeWindow::new(900, 930));
        assert_eq!(dev2[0].title, "Bank");
    }

    #[test]
    fn test_confirmed_participants() {
        let s = team();
        let t = task(DevPlan::tracks(2).with_assigned(&["t1", "t3"])).with_pm("pm").with_designer("des");
        assert_eq!(confirmed_participants(&t, d(), &s), vec!["pm", "des", "dev1", "dev3"]);

        let draft = task(DevPlan::tracks(2)).with_pm("pm");
        assert_eq!(
            confirmed_participants(&draft, d(), &s),
            vec!["pm", "dev1", "dev2", "dev3", "dev4"]
        );
    }

    #[test]
    fn test_participants_match_projection() {
        let s = team();
        let plans = [
            DevPlan::no_dev(),
            DevPlan::all_dev(),
            DevPlan::tracks(2).with_assigned(&["t2"]),
            DevPlan::tracks(1).with_assigned(&["t2"]),
        ];
        for plan in plans {
            let t = task(plan).with_designer("des");
            let participants = confirmed_participants(&t, d(), &s);
            for person in &s.people {
                let sees = !events_for(d(), &person.id, std::slice::from_ref(&t), &s)
                    .unwrap()
                    .is_empty();
                assert_eq!(sees, participants.contains(&person.id));
            }
        }
    }

    #[test]
    fn test_sort_events() {
        let mut events = vec![
            CalendarEvent::new("b", "", TimeWindow::new(600, 630), EventCategory::Task),
            CalendarEvent::new("a", "", TimeWindow::new(540, 560), EventCategory::Task),
            CalendarEvent::new("c", "", TimeWindow::new(600, 610), EventCategory::PersonalBlock),
        ];
        sort_events(&mut events);
        assert_eq!(ids(&events), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_malformed_task_time_is_error() {
        let s = team();
        let tasks = vec![Task::new("bad").on(d()).at("9am", 30).with_dev_plan(DevPlan::all_dev())];
        assert!(events_for(d(), "dev1", &tasks, &s).is_err());
    }
}
