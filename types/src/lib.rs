//! Shared wire types for the Carillon console
//!
//! This crate contains the serializable types exchanged with the bell/PA
//! appliance over HTTP, shared between the engine (carillon-core) and any
//! frontend. Field names follow the appliance's JSON contract exactly:
//! the schedule family is camelCase, everything else snake_case.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Schedule Model
// ─────────────────────────────────────────────────────────────────────────────

/// Sentinel bell asset used when no explicit file is chosen.
pub const DEFAULT_BELL_SOUND: &str = "Melodi1.mp3";

/// Sentinel announcement asset for interim announcements.
pub const DEFAULT_ANNOUNCEMENT_SOUND: &str = "isg1.mp3";

/// Wire value meaning "no spoken announcement at this edge".
pub const NO_ANNOUNCEMENT: &str = "None";

/// Console-enforced cap on interim announcements per activity.
/// Storage does not enforce this; the editor refuses the 4th entry.
pub const MAX_INTERIM_ANNOUNCEMENTS: usize = 3;

fn default_true() -> bool {
    true
}

fn default_bell_sound() -> String {
    DEFAULT_BELL_SOUND.to_string()
}

/// A spoken message fired at a fixed time inside an activity's span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterimAnnouncement {
    /// Opaque unique token (millisecond timestamp string).
    pub id: String,
    /// Wall-clock time of day, `HH:MM` 24-hour, zero-padded.
    pub time: String,
    /// Announcement audio asset filename.
    pub sound_id: String,
    /// Disabled entries are retained but never triggered by the appliance.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// A named time block bounded by a start and end bell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Opaque unique token (millisecond timestamp string).
    pub id: String,
    pub name: String,
    /// `HH:MM`; the sort key within a day.
    pub start_time: String,
    #[serde(default = "default_bell_sound")]
    pub start_sound_id: String,
    /// Spoken announcement at the start edge; absent or `"None"` means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_announcement_id: Option<String>,
    /// `HH:MM`.
    pub end_time: String,
    #[serde(default = "default_bell_sound")]
    pub end_sound_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_announcement_id: Option<String>,
    /// Whether ambient music may play during this activity.
    #[serde(default = "default_true")]
    pub play_music: bool,
    /// Insertion order, not time order.
    #[serde(default)]
    pub interim_announcements: Vec<InterimAnnouncement>,
}

/// One weekday's schedule. Exactly one exists per `day_of_week` in a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// 0=Sunday .. 6=Saturday.
    pub day_of_week: u8,
    /// Whether this day's schedule fires at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Weekday indices considered working days (Monday..Friday).
pub const WEEKDAYS: [u8; 5] = [1, 2, 3, 4, 5];

/// Weekday indices considered the weekend (Saturday, Sunday).
pub const WEEKEND: [u8; 2] = [6, 0];

/// True for Monday..Friday under the 0=Sunday convention.
pub fn is_weekday(day_of_week: u8) -> bool {
    (1..=5).contains(&day_of_week)
}

/// English day name for a 0=Sunday..6=Saturday index.
pub fn day_name(day_of_week: u8) -> &'static str {
    match day_of_week {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "?",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Appliance Status
// ─────────────────────────────────────────────────────────────────────────────

/// Scheduler state reported by the appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplianceState {
    #[default]
    Idle,
    Work,
    Break,
    /// Forward compatibility with states this console does not know.
    #[serde(other)]
    Unknown,
}

impl ApplianceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplianceState::Idle => "IDLE",
            ApplianceState::Work => "WORK",
            ApplianceState::Break => "BREAK",
            ApplianceState::Unknown => "UNKNOWN",
        }
    }
}

/// Audio channel whose volume is currently authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeChannel {
    Music,
    Manual,
    Bell,
}

impl VolumeChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeChannel::Music => "music",
            VolumeChannel::Manual => "manual",
            VolumeChannel::Bell => "bell",
        }
    }
}

/// Where ambient music comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicSource {
    #[default]
    Local,
    Radio,
}

impl MusicSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicSource::Local => "local",
            MusicSource::Radio => "radio",
        }
    }
}

/// A named internet radio stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioStation {
    pub name: String,
    pub url: String,
}

/// One row of today's bell timeline as computed by the appliance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// `HH:MM`.
    pub time: String,
    pub name: String,
    /// Event kind label, e.g. "bell" or "announcement".
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the event time has already passed today.
    #[serde(default)]
    pub passed: bool,
}

/// Low-level playback statistics passed through from the media engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaStats {
    #[serde(default)]
    pub input_bitrate: f64,
    #[serde(default)]
    pub demux_bitrate: f64,
    #[serde(default)]
    pub read_bytes: u64,
    #[serde(default)]
    pub demux_read_bytes: u64,
}

/// Streaming server state reported inside `/status`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StreamingStatus {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub port: Option<u16>,
}

/// Full appliance status snapshot from `GET /status`.
///
/// Almost everything is optional: older appliance firmware omits fields, and
/// the console must keep rendering whatever subset it gets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplianceStatus {
    #[serde(default)]
    pub state: ApplianceState,
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub volume: u32,
    #[serde(default)]
    pub current_volume_type: Option<VolumeChannel>,
    #[serde(default)]
    pub current_media: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub radio_url: Option<String>,
    #[serde(default)]
    pub radio_stations: Option<Vec<RadioStation>>,
    #[serde(default)]
    pub music_source: Option<MusicSource>,
    #[serde(default)]
    pub next_event: Option<String>,
    #[serde(default)]
    pub next_event_time: Option<String>,
    #[serde(default)]
    pub next_event_name: Option<String>,
    /// Seconds or milliseconds depending on firmware; display code normalizes.
    #[serde(default)]
    pub media_time: Option<f64>,
    #[serde(default)]
    pub media_duration: Option<f64>,
    #[serde(default)]
    pub daily_timeline: Option<Vec<TimelineEntry>>,
    #[serde(default)]
    pub scheduler_running: Option<bool>,
    #[serde(default)]
    pub start_on_boot: Option<bool>,
    #[serde(default)]
    pub volume_bell: Option<u32>,
    #[serde(default)]
    pub volume_music: Option<u32>,
    #[serde(default)]
    pub volume_manual: Option<u32>,
    #[serde(default)]
    pub media_stats: Option<MediaStats>,
    #[serde(default)]
    pub streaming: Option<StreamingStatus>,
    #[serde(default)]
    pub tts_engine: Option<String>,
    #[serde(default)]
    pub system_ip: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Control & Settings Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Audio asset folder on the appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFolder {
    Bells,
    Music,
    Announcements,
}

impl AudioFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFolder::Bells => "bells",
            AudioFolder::Music => "music",
            AudioFolder::Announcements => "announcements",
        }
    }

    /// Parse the wire/CLI name of a folder.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bells" => Some(AudioFolder::Bells),
            "music" => Some(AudioFolder::Music),
            "announcements" => Some(AudioFolder::Announcements),
            _ => None,
        }
    }
}

impl std::fmt::Display for AudioFolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AudioFolder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AudioFolder::from_name(s)
            .ok_or_else(|| format!("unknown folder '{s}' (expected bells, music or announcements)"))
    }
}

/// `POST /control/preview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub folder: AudioFolder,
    pub filename: String,
}

/// `POST /control/manual_music`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ManualMusicRequest {
    pub enable: bool,
}

/// `POST /control/tts_announce`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
}

/// `POST /settings/volume`. Adjusts whichever channel is currently active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolumeRequest {
    pub volume: u32,
}

/// `POST /settings/volumes`. All three channels at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelVolumes {
    pub bell: u32,
    pub music: u32,
    pub manual: u32,
}

/// `POST /settings/radio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioSettings {
    pub url: String,
    pub stations: Vec<RadioStation>,
    pub source: MusicSource,
}

/// `POST /settings/company`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyName {
    pub name: String,
}

/// `POST /settings/boot`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BootSettings {
    pub start_active: bool,
}

/// `POST /settings/tts-engine`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsEngine {
    pub engine: String,
}

/// `POST /files/{folder}` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub filenames: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Holidays
// ─────────────────────────────────────────────────────────────────────────────

/// One holiday row from `GET /settings/holidays`. Dates are ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: String,
    pub name: String,
    #[serde(default)]
    pub is_past: bool,
    #[serde(default)]
    pub is_today: bool,
    #[serde(default)]
    pub is_skipped: bool,
}

/// `GET /settings/holidays` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidayOverview {
    #[serde(default)]
    pub skipped_holidays: Vec<String>,
    #[serde(default)]
    pub upcoming_holidays: Vec<Holiday>,
    #[serde(default)]
    pub holiday_country: Option<String>,
}

/// `POST /settings/holidays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayUpdate {
    pub skipped_holidays: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Special Days (birthdays)
// ─────────────────────────────────────────────────────────────────────────────

/// Special-day announcement behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialDayConfig {
    pub enabled: bool,
    /// `HH:MM` times at which the appliance announces today's birthdays.
    pub announcement_times: Vec<String>,
    /// Announcement text template; `{name}` is substituted.
    pub template: String,
}

impl Default for SpecialDayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            announcement_times: vec!["09:00".to_string(), "14:00".to_string()],
            template: "Today is {name}'s birthday. We wish them a happy and healthy year."
                .to_string(),
        }
    }
}

/// One person on the birthday roster. `date` is `YYYY-MM-DD` or `MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub date: String,
}

/// `GET /special-days` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialDaysOverview {
    #[serde(default)]
    pub config: Option<SpecialDayConfig>,
    #[serde(default)]
    pub people: Vec<Person>,
}

/// `POST /special-days/announce`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnounceRequest {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_wire_names_are_camel_case() {
        let act = Activity {
            id: "1700000000000".to_string(),
            name: "Shift".to_string(),
            start_time: "09:00".to_string(),
            start_sound_id: DEFAULT_BELL_SOUND.to_string(),
            start_announcement_id: None,
            end_time: "10:00".to_string(),
            end_sound_id: DEFAULT_BELL_SOUND.to_string(),
            end_announcement_id: Some("brief.mp3".to_string()),
            play_music: true,
            interim_announcements: vec![InterimAnnouncement {
                id: "1700000000001".to_string(),
                time: "09:10".to_string(),
                sound_id: DEFAULT_ANNOUNCEMENT_SOUND.to_string(),
                enabled: true,
            }],
        };

        let json = serde_json::to_value(&act).unwrap();
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endSoundId"], DEFAULT_BELL_SOUND);
        assert_eq!(json["playMusic"], true);
        assert_eq!(json["interimAnnouncements"][0]["soundId"], DEFAULT_ANNOUNCEMENT_SOUND);
        // Absent start announcement is omitted, not serialized as null
        assert!(json.get("startAnnouncementId").is_none());
        assert_eq!(json["endAnnouncementId"], "brief.mp3");
    }

    #[test]
    fn day_schedule_tolerates_missing_optional_fields() {
        let day: DaySchedule = serde_json::from_str(r#"{"dayOfWeek": 3}"#).unwrap();
        assert_eq!(day.day_of_week, 3);
        assert!(day.enabled);
        assert!(day.activities.is_empty());
    }

    #[test]
    fn activity_fills_defaults_for_missing_fields() {
        let act: Activity = serde_json::from_str(
            r#"{"id":"1","name":"Old","startTime":"08:00","endTime":"12:00"}"#,
        )
        .unwrap();
        assert_eq!(act.start_sound_id, DEFAULT_BELL_SOUND);
        assert!(act.play_music);
        assert!(act.interim_announcements.is_empty());
        assert!(act.start_announcement_id.is_none());
    }

    #[test]
    fn status_ignores_unknown_fields_and_states() {
        let status: ApplianceStatus = serde_json::from_str(
            r#"{"state":"WORK","is_playing":true,"volume":70,"firmware_quirk":42}"#,
        )
        .unwrap();
        assert_eq!(status.state, ApplianceState::Work);
        assert!(status.is_playing);

        let status: ApplianceStatus =
            serde_json::from_str(r#"{"state":"REBOOTING"}"#).unwrap();
        assert_eq!(status.state, ApplianceState::Unknown);
    }

    #[test]
    fn preview_request_uses_lowercase_folder() {
        let req = PreviewRequest {
            folder: AudioFolder::Bells,
            filename: "Melodi1.mp3".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"folder":"bells","filename":"Melodi1.mp3"}"#);
    }

    #[test]
    fn folder_parsing_round_trips() {
        for folder in [AudioFolder::Bells, AudioFolder::Music, AudioFolder::Announcements] {
            assert_eq!(AudioFolder::from_name(folder.as_str()), Some(folder));
        }
        assert_eq!(AudioFolder::from_name("videos"), None);
    }

    #[test]
    fn weekday_classification() {
        assert!(is_weekday(1));
        assert!(is_weekday(5));
        assert!(!is_weekday(0));
        assert!(!is_weekday(6));
        for day in WEEKDAYS {
            assert!(is_weekday(day));
        }
        for day in WEEKEND {
            assert!(!is_weekday(day));
        }
    }
}
