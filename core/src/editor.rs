//! Week schedule editor
//!
//! Holds the in-memory draft of the seven-day schedule and every operation
//! the console performs on it: eager start-time ordering, default inference
//! for new entries, and the day-to-day copy operations. Nothing here talks
//! to the network; the session layer owns fetching and saving.

use carillon_types::{
    Activity, DEFAULT_ANNOUNCEMENT_SOUND, DEFAULT_BELL_SOUND, DaySchedule, InterimAnnouncement,
    MAX_INTERIM_ANNOUNCEMENTS, NO_ANNOUNCEMENT, WEEKDAYS, WEEKEND, is_weekday,
};
use chrono::Datelike;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::clock::{self, TimeOfDay};

// ═══════════════════════════════════════════════════════════════════════════
// Defaults
// ═══════════════════════════════════════════════════════════════════════════

/// Name given to a freshly added activity.
pub const DEFAULT_ACTIVITY_NAME: &str = "New Activity";

/// Gap between the day's latest end time and a new activity's start.
const NEW_ACTIVITY_GAP_MIN: i64 = 15;
/// Span of a new activity.
const NEW_ACTIVITY_SPAN_MIN: i64 = 60;
/// Offset from an activity's start to its new interim announcement.
const INTERIM_OFFSET_MIN: i64 = 10;

/// Fallbacks when a day is empty or a stored time does not parse.
const FALLBACK_START: &str = "09:00";
const FALLBACK_END: &str = "10:00";
const FALLBACK_INTERIM_TIME: &str = "09:30";

/// Errors from draft edit operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("no schedule for day {0}")]
    UnknownDay(u8),

    #[error("no activity with id {0}")]
    UnknownActivity(String),

    #[error("no announcement with id {0}")]
    UnknownAnnouncement(String),

    #[error("activity already has {MAX_INTERIM_ANNOUNCEMENTS} interim announcements")]
    AnnouncementLimit,
}

// ═══════════════════════════════════════════════════════════════════════════
// Week Synthesis & Decoding
// ═══════════════════════════════════════════════════════════════════════════

/// The week the editor synthesizes when the appliance has nothing usable:
/// all seven days present, Monday..Friday enabled, weekend disabled, no
/// activities.
pub fn default_week() -> Vec<DaySchedule> {
    (0u8..7)
        .map(|day_of_week| DaySchedule {
            day_of_week,
            enabled: is_weekday(day_of_week),
            activities: Vec::new(),
        })
        .collect()
}

/// Decodes the appliance's schedule payload. Returns `None` when the payload
/// is empty, not an array, or in the legacy shape whose first element lacks
/// a `dayOfWeek` discriminator; the caller synthesizes the default week.
pub fn decode_week(raw: &Value) -> Option<Vec<DaySchedule>> {
    let first = raw.as_array()?.first()?;
    first.as_object()?.get("dayOfWeek")?;
    serde_json::from_value(raw.clone()).ok()
}

fn today_index() -> u8 {
    chrono::Local::now().weekday().num_days_from_sunday() as u8
}

// ═══════════════════════════════════════════════════════════════════════════
// Edit Patches
// ═══════════════════════════════════════════════════════════════════════════

/// Field overrides for an activity. Only set fields are applied.
#[derive(Debug, Clone, Default)]
pub struct ActivityEdit {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub start_sound_id: Option<String>,
    pub end_sound_id: Option<String>,
    /// `"None"` or empty clears the start announcement.
    pub start_announcement_id: Option<String>,
    /// `"None"` or empty clears the end announcement.
    pub end_announcement_id: Option<String>,
    pub play_music: Option<bool>,
}

impl ActivityEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.start_sound_id.is_none()
            && self.end_sound_id.is_none()
            && self.start_announcement_id.is_none()
            && self.end_announcement_id.is_none()
            && self.play_music.is_none()
    }
}

/// Field overrides for an interim announcement. Only set fields are applied.
#[derive(Debug, Clone, Default)]
pub struct InterimEdit {
    pub time: Option<String>,
    pub sound_id: Option<String>,
    pub enabled: Option<bool>,
}

impl InterimEdit {
    pub fn is_empty(&self) -> bool {
        self.time.is_none() && self.sound_id.is_none() && self.enabled.is_none()
    }
}

/// An edge announcement select value of `"None"` (or empty) means none.
fn normalize_announcement(value: String) -> Option<String> {
    if value.is_empty() || value == NO_ANNOUNCEMENT {
        None
    } else {
        Some(value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Week Editor
// ═══════════════════════════════════════════════════════════════════════════

/// The draft week plus transient selection state.
///
/// Days are kept in the storage order the appliance sent them and are always
/// located by their `day_of_week` key, never by position. Every mutation
/// raises the dirty flag; saving is the session's job.
#[derive(Debug, Clone)]
pub struct WeekEditor {
    days: Vec<DaySchedule>,
    /// Console-only selection, not persisted.
    active_day: u8,
    dirty: bool,
}

impl Default for WeekEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl WeekEditor {
    /// Editor over the synthesized default week.
    pub fn new() -> Self {
        Self {
            days: default_week(),
            active_day: today_index(),
            dirty: false,
        }
    }

    /// Builds the draft from the appliance's `/schedule` payload, falling
    /// back to the default week when the payload is legacy, empty, or not a
    /// week at all. The active day starts on today's real-world weekday.
    pub fn from_backend(raw: &Value) -> Self {
        let days = match decode_week(raw) {
            Some(days) => days,
            None => {
                debug!("schedule payload empty or legacy; synthesizing default week");
                default_week()
            }
        };
        Self {
            days,
            active_day: today_index(),
            dirty: false,
        }
    }

    /// Replaces the entire draft with a fresh fetch. No field-level merge:
    /// whatever was here is discarded. Selection survives, dirtiness does not.
    pub fn adopt(&mut self, raw: &Value) {
        let active = self.active_day;
        *self = Self::from_backend(raw);
        self.active_day = active;
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    /// The full draft, in storage order, ready to serialize for a save.
    pub fn week(&self) -> &[DaySchedule] {
        &self.days
    }

    pub fn day(&self, day_of_week: u8) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.day_of_week == day_of_week)
    }

    pub fn active_day(&self) -> u8 {
        self.active_day
    }

    pub fn set_active_day(&mut self, day_of_week: u8) -> Result<(), EditError> {
        if day_of_week > 6 {
            return Err(EditError::UnknownDay(day_of_week));
        }
        self.active_day = day_of_week;
        Ok(())
    }

    /// Whether the draft has edits the appliance has not seen.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the session once a save has been accepted.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn day_mut(&mut self, day_of_week: u8) -> Result<&mut DaySchedule, EditError> {
        self.days
            .iter_mut()
            .find(|d| d.day_of_week == day_of_week)
            .ok_or(EditError::UnknownDay(day_of_week))
    }

    // ── Day Operations ─────────────────────────────────────────────────────

    pub fn set_day_enabled(&mut self, day_of_week: u8, enabled: bool) -> Result<(), EditError> {
        self.day_mut(day_of_week)?.enabled = enabled;
        self.dirty = true;
        Ok(())
    }

    // ── Activity Operations ────────────────────────────────────────────────

    /// Adds an activity with inferred times and returns its id.
    ///
    /// Start = the day's latest end time + 15 minutes, end = start + 60,
    /// wrapping past midnight. An empty day, or a latest end time that does
    /// not parse, silently gets `09:00` to `10:00`.
    pub fn add_activity(&mut self, day_of_week: u8) -> Result<String, EditError> {
        let day = self.day_mut(day_of_week)?;
        let (start_time, end_time) = infer_activity_times(&day.activities);
        let id = clock::next_entity_id();
        day.activities.push(Activity {
            id: id.clone(),
            name: DEFAULT_ACTIVITY_NAME.to_string(),
            start_time,
            start_sound_id: DEFAULT_BELL_SOUND.to_string(),
            start_announcement_id: None,
            end_time,
            end_sound_id: DEFAULT_BELL_SOUND.to_string(),
            end_announcement_id: None,
            play_music: true,
            interim_announcements: Vec::new(),
        });
        sort_activities(day);
        self.dirty = true;
        Ok(id)
    }

    pub fn remove_activity(&mut self, day_of_week: u8, activity_id: &str) -> Result<(), EditError> {
        let day = self.day_mut(day_of_week)?;
        let before = day.activities.len();
        day.activities.retain(|a| a.id != activity_id);
        if day.activities.len() == before {
            return Err(EditError::UnknownActivity(activity_id.to_string()));
        }
        self.dirty = true;
        Ok(())
    }

    /// Applies the set fields of `edit`; a start-time change re-sorts the day
    /// immediately so the displayed order always reflects current values.
    pub fn edit_activity(
        &mut self,
        day_of_week: u8,
        activity_id: &str,
        edit: ActivityEdit,
    ) -> Result<(), EditError> {
        let day = self.day_mut(day_of_week)?;
        let activity = find_activity(day, activity_id)?;

        let resort = edit.start_time.is_some();
        if let Some(name) = edit.name {
            activity.name = name;
        }
        if let Some(start_time) = edit.start_time {
            activity.start_time = start_time;
        }
        if let Some(end_time) = edit.end_time {
            activity.end_time = end_time;
        }
        if let Some(sound) = edit.start_sound_id {
            activity.start_sound_id = sound;
        }
        if let Some(sound) = edit.end_sound_id {
            activity.end_sound_id = sound;
        }
        if let Some(announcement) = edit.start_announcement_id {
            activity.start_announcement_id = normalize_announcement(announcement);
        }
        if let Some(announcement) = edit.end_announcement_id {
            activity.end_announcement_id = normalize_announcement(announcement);
        }
        if let Some(play_music) = edit.play_music {
            activity.play_music = play_music;
        }

        if resort {
            sort_activities(day);
        }
        self.dirty = true;
        Ok(())
    }

    // ── Interim Announcement Operations ────────────────────────────────────

    /// Adds an interim announcement to an activity and returns its id.
    ///
    /// Time defaults to the activity's start + 10 minutes, `09:30` if the
    /// start does not parse. At most three per activity; the fourth is
    /// refused.
    pub fn add_interim(&mut self, day_of_week: u8, activity_id: &str) -> Result<String, EditError> {
        let day = self.day_mut(day_of_week)?;
        let activity = find_activity(day, activity_id)?;
        if activity.interim_announcements.len() >= MAX_INTERIM_ANNOUNCEMENTS {
            return Err(EditError::AnnouncementLimit);
        }
        let time = clock::shift_time(&activity.start_time, INTERIM_OFFSET_MIN)
            .unwrap_or_else(|| FALLBACK_INTERIM_TIME.to_string());
        let id = clock::next_entity_id();
        activity.interim_announcements.push(InterimAnnouncement {
            id: id.clone(),
            time,
            sound_id: DEFAULT_ANNOUNCEMENT_SOUND.to_string(),
            enabled: true,
        });
        self.dirty = true;
        Ok(id)
    }

    pub fn remove_interim(
        &mut self,
        day_of_week: u8,
        activity_id: &str,
        announcement_id: &str,
    ) -> Result<(), EditError> {
        let day = self.day_mut(day_of_week)?;
        let activity = find_activity(day, activity_id)?;
        let before = activity.interim_announcements.len();
        activity.interim_announcements.retain(|a| a.id != announcement_id);
        if activity.interim_announcements.len() == before {
            return Err(EditError::UnknownAnnouncement(announcement_id.to_string()));
        }
        self.dirty = true;
        Ok(())
    }

    /// Applies the set fields of `edit`. Interim announcements keep insertion
    /// order, so a time change never re-sorts.
    pub fn edit_interim(
        &mut self,
        day_of_week: u8,
        activity_id: &str,
        announcement_id: &str,
        edit: InterimEdit,
    ) -> Result<(), EditError> {
        let day = self.day_mut(day_of_week)?;
        let activity = find_activity(day, activity_id)?;
        let interim = activity
            .interim_announcements
            .iter_mut()
            .find(|a| a.id == announcement_id)
            .ok_or_else(|| EditError::UnknownAnnouncement(announcement_id.to_string()))?;

        if let Some(time) = edit.time {
            interim.time = time;
        }
        if let Some(sound) = edit.sound_id {
            interim.sound_id = sound;
        }
        if let Some(enabled) = edit.enabled {
            interim.enabled = enabled;
        }
        self.dirty = true;
        Ok(())
    }

    // ── Copy Propagation ───────────────────────────────────────────────────

    /// Overwrites every other day with the active day's enabled flag and a
    /// deep copy of its activities. Returns how many days were overwritten.
    pub fn copy_to_all(&mut self) -> Result<usize, EditError> {
        self.copy_active_to(|_| true)
    }

    /// Same, restricted to Monday..Friday.
    pub fn copy_to_weekdays(&mut self) -> Result<usize, EditError> {
        self.copy_active_to(|d| WEEKDAYS.contains(&d))
    }

    /// Same, restricted to Saturday and Sunday.
    pub fn copy_to_weekend(&mut self) -> Result<usize, EditError> {
        self.copy_active_to(|d| WEEKEND.contains(&d))
    }

    fn copy_active_to(&mut self, is_target: impl Fn(u8) -> bool) -> Result<usize, EditError> {
        let active = self.active_day;
        let source = self.day(active).ok_or(EditError::UnknownDay(active))?;
        let enabled = source.enabled;
        // Structural clone: targets must never alias the source's lists.
        let activities = source.activities.clone();

        let mut copied = 0;
        for day in &mut self.days {
            if day.day_of_week != active && is_target(day.day_of_week) {
                day.enabled = enabled;
                day.activities = activities.clone();
                copied += 1;
            }
        }
        if copied > 0 {
            self.dirty = true;
        }
        Ok(copied)
    }
}

fn sort_activities(day: &mut DaySchedule) {
    // Zero-padded HH:MM makes the lexicographic order the chronological one.
    day.activities.sort_by(|a, b| a.start_time.cmp(&b.start_time));
}

fn find_activity<'a>(
    day: &'a mut DaySchedule,
    activity_id: &str,
) -> Result<&'a mut Activity, EditError> {
    day.activities
        .iter_mut()
        .find(|a| a.id == activity_id)
        .ok_or_else(|| EditError::UnknownActivity(activity_id.to_string()))
}

fn infer_activity_times(existing: &[Activity]) -> (String, String) {
    if let Some(latest_end) = existing.iter().map(|a| a.end_time.as_str()).max()
        && let Some(end) = TimeOfDay::parse(latest_end)
    {
        let start = end.add_minutes(NEW_ACTIVITY_GAP_MIN);
        let span_end = start.add_minutes(NEW_ACTIVITY_SPAN_MIN);
        return (start.to_string(), span_end.to_string());
    }
    (FALLBACK_START.to_string(), FALLBACK_END.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn editor_with_week(days: Vec<DaySchedule>) -> WeekEditor {
        let raw = serde_json::to_value(days).unwrap();
        WeekEditor::from_backend(&raw)
    }

    fn activity(id: &str, start: &str, end: &str) -> Activity {
        Activity {
            id: id.to_string(),
            name: format!("activity {id}"),
            start_time: start.to_string(),
            start_sound_id: DEFAULT_BELL_SOUND.to_string(),
            start_announcement_id: None,
            end_time: end.to_string(),
            end_sound_id: DEFAULT_BELL_SOUND.to_string(),
            end_announcement_id: None,
            play_music: true,
            interim_announcements: Vec::new(),
        }
    }

    fn week_with_monday(activities: Vec<Activity>) -> Vec<DaySchedule> {
        let mut days = default_week();
        days[1].activities = activities;
        days
    }

    #[test]
    fn fetched_week_saves_back_unchanged() {
        let mut days = default_week();
        days[1].activities = vec![activity("a", "08:00", "09:00")];
        // Storage order is arbitrary; the editor must not reorder days.
        days.reverse();

        let raw = serde_json::to_value(&days).unwrap();
        let editor = WeekEditor::from_backend(&raw);
        assert_eq!(editor.week(), days.as_slice());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn empty_payload_synthesizes_default_week() {
        for raw in [json!([]), json!(null), json!({})] {
            let editor = WeekEditor::from_backend(&raw);
            let days = editor.week();
            assert_eq!(days.len(), 7);
            for day in days {
                assert_eq!(day.enabled, is_weekday(day.day_of_week));
                assert!(day.activities.is_empty());
            }
        }
    }

    #[test]
    fn legacy_shape_synthesizes_default_week() {
        // Pre-rework payloads keyed days by name instead of dayOfWeek.
        let raw = json!([{"day": "monday", "bells": ["08:00", "12:00"]}]);
        let editor = WeekEditor::from_backend(&raw);
        assert_eq!(editor.week().len(), 7);
        assert!(editor.day(1).unwrap().enabled);
        assert!(!editor.day(0).unwrap().enabled);
        assert!(!editor.day(6).unwrap().enabled);
    }

    #[test]
    fn new_activity_on_empty_day_gets_defaults() {
        let mut editor = editor_with_week(default_week());
        let id = editor.add_activity(1).unwrap();
        let day = editor.day(1).unwrap();
        let act = day.activities.iter().find(|a| a.id == id).unwrap();
        assert_eq!(act.start_time, "09:00");
        assert_eq!(act.end_time, "10:00");
        assert_eq!(act.name, DEFAULT_ACTIVITY_NAME);
        assert_eq!(act.start_sound_id, DEFAULT_BELL_SOUND);
        assert!(act.play_music);
        assert!(editor.is_dirty());
    }

    #[test]
    fn new_activity_follows_latest_end() {
        let week = week_with_monday(vec![
            activity("a", "08:00", "09:00"),
            activity("b", "12:00", "17:00"),
        ]);
        let mut editor = editor_with_week(week);
        let id = editor.add_activity(1).unwrap();
        let day = editor.day(1).unwrap();
        let act = day.activities.iter().find(|a| a.id == id).unwrap();
        assert_eq!(act.start_time, "17:15");
        assert_eq!(act.end_time, "18:15");
    }

    #[test]
    fn new_activity_wraps_past_midnight() {
        let week = week_with_monday(vec![activity("a", "22:00", "23:50")]);
        let mut editor = editor_with_week(week);
        let id = editor.add_activity(1).unwrap();
        let act = editor
            .day(1)
            .unwrap()
            .activities
            .iter()
            .find(|a| a.id == id)
            .unwrap()
            .clone();
        assert_eq!(act.start_time, "00:05");
        assert_eq!(act.end_time, "01:05");
    }

    #[test]
    fn malformed_latest_end_falls_back_to_defaults() {
        let week = week_with_monday(vec![activity("a", "08:00", "garbage")]);
        let mut editor = editor_with_week(week);
        let id = editor.add_activity(1).unwrap();
        let day = editor.day(1).unwrap();
        let act = day.activities.iter().find(|a| a.id == id).unwrap();
        assert_eq!(act.start_time, "09:00");
        assert_eq!(act.end_time, "10:00");
    }

    #[test]
    fn activities_stay_sorted_through_inserts_and_edits() {
        let mut editor = editor_with_week(default_week());
        let first = editor.add_activity(2).unwrap(); // 09:00-10:00
        let second = editor.add_activity(2).unwrap(); // 10:15-11:15

        // Move the later activity to the front of the day.
        editor
            .edit_activity(
                2,
                &second,
                ActivityEdit {
                    start_time: Some("06:00".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let times: Vec<&str> = editor
            .day(2)
            .unwrap()
            .activities
            .iter()
            .map(|a| a.start_time.as_str())
            .collect();
        assert_eq!(times, vec!["06:00", "09:00"]);
        assert_eq!(editor.day(2).unwrap().activities[0].id, second);
        assert_eq!(editor.day(2).unwrap().activities[1].id, first);
    }

    #[test]
    fn interim_defaults_ten_minutes_after_start() {
        let week = week_with_monday(vec![activity("a", "08:00", "09:00")]);
        let mut editor = editor_with_week(week);
        let id = editor.add_interim(1, "a").unwrap();
        let day = editor.day(1).unwrap();
        let interim = &day.activities[0].interim_announcements[0];
        assert_eq!(interim.id, id);
        assert_eq!(interim.time, "08:10");
        assert_eq!(interim.sound_id, DEFAULT_ANNOUNCEMENT_SOUND);
        assert!(interim.enabled);
    }

    #[test]
    fn interim_falls_back_when_start_unparseable() {
        let week = week_with_monday(vec![activity("a", "late", "09:00")]);
        let mut editor = editor_with_week(week);
        editor.add_interim(1, "a").unwrap();
        let day = editor.day(1).unwrap();
        assert_eq!(day.activities[0].interim_announcements[0].time, "09:30");
    }

    #[test]
    fn interim_cap_refuses_fourth_entry() {
        let week = week_with_monday(vec![activity("a", "08:00", "09:00")]);
        let mut editor = editor_with_week(week);
        for _ in 0..MAX_INTERIM_ANNOUNCEMENTS {
            editor.add_interim(1, "a").unwrap();
        }
        assert_eq!(editor.add_interim(1, "a"), Err(EditError::AnnouncementLimit));
        let day = editor.day(1).unwrap();
        assert_eq!(
            day.activities[0].interim_announcements.len(),
            MAX_INTERIM_ANNOUNCEMENTS
        );
    }

    #[test]
    fn interim_edits_keep_insertion_order() {
        let week = week_with_monday(vec![activity("a", "08:00", "09:00")]);
        let mut editor = editor_with_week(week);
        let first = editor.add_interim(1, "a").unwrap();
        let second = editor.add_interim(1, "a").unwrap();

        // An earlier time on the second entry must not move it up.
        editor
            .edit_interim(
                1,
                "a",
                &second,
                InterimEdit {
                    time: Some("08:01".to_string()),
                    enabled: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        let day = editor.day(1).unwrap();
        let ids: Vec<&str> = day.activities[0]
            .interim_announcements
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
        assert!(!day.activities[0].interim_announcements[1].enabled);
    }

    #[test]
    fn announcement_sentinel_clears_edge_announcement() {
        let week = week_with_monday(vec![activity("a", "08:00", "09:00")]);
        let mut editor = editor_with_week(week);
        editor
            .edit_activity(
                1,
                "a",
                ActivityEdit {
                    start_announcement_id: Some("welcome.mp3".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(
            editor.day(1).unwrap().activities[0].start_announcement_id.as_deref(),
            Some("welcome.mp3")
        );

        editor
            .edit_activity(
                1,
                "a",
                ActivityEdit {
                    start_announcement_id: Some(NO_ANNOUNCEMENT.to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(editor.day(1).unwrap().activities[0].start_announcement_id, None);
    }

    #[test]
    fn copy_to_all_deep_copies_to_every_other_day() {
        let week = week_with_monday(vec![activity("a", "08:00", "09:00")]);
        let mut editor = editor_with_week(week);
        editor.set_active_day(1).unwrap();
        let copied = editor.copy_to_all().unwrap();
        assert_eq!(copied, 6);

        for day_of_week in 0..7 {
            let day = editor.day(day_of_week).unwrap();
            assert_eq!(day.day_of_week, day_of_week);
            assert_eq!(day.activities, editor.day(1).unwrap().activities);
        }

        // Mutating Tuesday's copy must not reach Monday or Wednesday.
        editor
            .edit_activity(
                2,
                "a",
                ActivityEdit {
                    name: Some("Tuesday only".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(editor.day(2).unwrap().activities[0].name, "Tuesday only");
        assert_eq!(editor.day(1).unwrap().activities[0].name, "activity a");
        assert_eq!(editor.day(3).unwrap().activities[0].name, "activity a");
    }

    #[test]
    fn copy_to_all_propagates_enabled_flag() {
        let mut week = week_with_monday(vec![activity("a", "08:00", "09:00")]);
        week[1].enabled = false;
        let mut editor = editor_with_week(week);
        editor.set_active_day(1).unwrap();
        editor.copy_to_all().unwrap();
        assert!(!editor.day(6).unwrap().enabled);
        assert!(!editor.day(3).unwrap().enabled);
    }

    #[test]
    fn copy_to_weekdays_skips_weekend_and_active_day() {
        let week = week_with_monday(vec![]);
        let mut editor = editor_with_week(week);
        editor.set_active_day(3).unwrap();
        editor.add_activity(3).unwrap();
        let copied = editor.copy_to_weekdays().unwrap();
        assert_eq!(copied, 4);

        for day_of_week in [1, 2, 4, 5] {
            assert_eq!(editor.day(day_of_week).unwrap().activities.len(), 1);
        }
        for day_of_week in [0, 6] {
            assert!(editor.day(day_of_week).unwrap().activities.is_empty());
        }
    }

    #[test]
    fn copy_to_weekend_touches_only_weekend() {
        let mut editor = editor_with_week(default_week());
        editor.set_active_day(6).unwrap();
        editor.add_activity(6).unwrap();
        editor.set_day_enabled(6, true).unwrap();
        let copied = editor.copy_to_weekend().unwrap();
        assert_eq!(copied, 1);

        assert_eq!(editor.day(0).unwrap().activities.len(), 1);
        assert!(editor.day(0).unwrap().enabled);
        for day_of_week in 1..6 {
            assert!(editor.day(day_of_week).unwrap().activities.is_empty());
        }
    }

    #[test]
    fn disabled_day_keeps_its_activities() {
        let week = week_with_monday(vec![activity("a", "08:00", "09:00")]);
        let mut editor = editor_with_week(week);
        editor.set_day_enabled(1, false).unwrap();

        let day = editor.day(1).unwrap();
        assert!(!day.enabled);
        assert_eq!(day.activities.len(), 1);

        // The serialized draft still carries the hidden activities.
        let raw = serde_json::to_value(editor.week()).unwrap();
        let monday = raw
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["dayOfWeek"] == 1)
            .unwrap();
        assert_eq!(monday["enabled"], false);
        assert_eq!(monday["activities"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn unknown_targets_are_reported() {
        let mut editor = editor_with_week(default_week());
        assert_eq!(editor.add_activity(9), Err(EditError::UnknownDay(9)));
        assert_eq!(
            editor.remove_activity(1, "missing"),
            Err(EditError::UnknownActivity("missing".to_string()))
        );
        assert_eq!(
            editor.remove_interim(1, "missing", "x"),
            Err(EditError::UnknownActivity("missing".to_string()))
        );
        assert_eq!(editor.set_active_day(7), Err(EditError::UnknownDay(7)));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn adopt_replaces_draft_and_clears_dirty() {
        let mut editor = editor_with_week(default_week());
        editor.add_activity(1).unwrap();
        editor.set_active_day(4).unwrap();
        assert!(editor.is_dirty());

        let fresh = serde_json::to_value(default_week()).unwrap();
        editor.adopt(&fresh);
        assert!(!editor.is_dirty());
        assert!(editor.day(1).unwrap().activities.is_empty());
        // Selection is console state, not schedule state.
        assert_eq!(editor.active_day(), 4);
    }
}
