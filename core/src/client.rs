//! HTTP client for the appliance
//!
//! One method per appliance endpoint, typed with the wire model from
//! carillon-types. The client decides nothing: callers own retry,
//! confirmation, and how failures are surfaced.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use carillon_types::{
    AnnounceRequest, ApplianceStatus, AudioFolder, BootSettings, ChannelVolumes, CompanyName,
    DaySchedule, HolidayOverview, HolidayUpdate, ManualMusicRequest, Person, PreviewRequest,
    RadioSettings, SpecialDayConfig, SpecialDaysOverview, TtsEngine, TtsRequest, UploadResponse,
    VolumeRequest,
};

use crate::error::ApiError;

const USER_AGENT: &str = "carillon v0.1.0";

/// Uploads move whole audio files; they get more room than control calls.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Typed wrapper around one appliance's HTTP surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// Builds a client for the appliance at `base_url` (scheme + host +
    /// port, e.g. `http://127.0.0.1:7777`). Every request carries `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|_| ApiError::InvalidUrl {
            url: base_url.to_string(),
        })?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Request {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // ── Schedule ───────────────────────────────────────────────────────────

    /// Raw `/schedule` payload. The editor decides whether it is a usable
    /// week or a legacy shape; only transport failures are errors here.
    pub async fn fetch_schedule(&self) -> Result<Value, ApiError> {
        self.get_json("/schedule").await
    }

    /// Persists the whole week as a bare JSON array of 7 day schedules.
    pub async fn save_schedule(&self, week: &[DaySchedule]) -> Result<(), ApiError> {
        self.post_json("/schedule", week).await
    }

    // ── Audio Library ──────────────────────────────────────────────────────

    pub async fn list_files(&self, folder: AudioFolder) -> Result<Vec<String>, ApiError> {
        self.get_json(&format!("/files/{folder}")).await
    }

    /// Uploads local `.mp3` files as repeated `files` multipart parts.
    /// Anything without an `.mp3` extension is refused before any bytes move.
    pub async fn upload_files(
        &self,
        folder: AudioFolder,
        paths: &[PathBuf],
    ) -> Result<UploadResponse, ApiError> {
        let mut form = Form::new();
        for path in paths {
            form = form.part("files", file_part(path, "mp3")?);
        }

        let url = self.endpoint(&format!("/files/{folder}"))?;
        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;
        let response = check_status(&url, response).await?;
        response.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    pub async fn delete_file(&self, folder: AudioFolder, filename: &str) -> Result<(), ApiError> {
        let mut url = self.endpoint(&format!("/files/{folder}"))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                url: self.base.to_string(),
            })?
            .push(filename);

        let response = self
            .client
            .delete(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;
        check_status(&url, response).await?;
        Ok(())
    }

    // ── Playback Control ───────────────────────────────────────────────────

    /// Plays an asset by name without touching persisted state.
    pub async fn preview(&self, folder: AudioFolder, filename: &str) -> Result<(), ApiError> {
        let request = PreviewRequest {
            folder,
            filename: filename.to_string(),
        };
        self.post_json("/control/preview", &request).await
    }

    /// Halts whatever the appliance is currently playing.
    pub async fn stop(&self) -> Result<(), ApiError> {
        self.post_empty("/control/stop").await
    }

    pub async fn set_manual_music(&self, enable: bool) -> Result<(), ApiError> {
        self.post_json("/control/manual_music", &ManualMusicRequest { enable })
            .await
    }

    pub async fn enable_scheduler(&self) -> Result<(), ApiError> {
        self.post_empty("/control/enable_scheduler").await
    }

    pub async fn disable_scheduler(&self) -> Result<(), ApiError> {
        self.post_empty("/control/disable_scheduler").await
    }

    /// Server-side TTS: the appliance synthesizes and plays the text.
    pub async fn tts_announce(&self, text: &str) -> Result<(), ApiError> {
        let request = TtsRequest {
            text: text.to_string(),
        };
        self.post_json("/control/tts_announce", &request).await
    }

    // ── Status ─────────────────────────────────────────────────────────────

    pub async fn status(&self) -> Result<ApplianceStatus, ApiError> {
        self.get_json("/status").await
    }

    // ── Settings ───────────────────────────────────────────────────────────

    /// Volume of whichever channel is currently active on the appliance.
    pub async fn set_volume(&self, volume: u32) -> Result<(), ApiError> {
        self.post_json("/settings/volume", &VolumeRequest { volume })
            .await
    }

    pub async fn set_volumes(&self, volumes: ChannelVolumes) -> Result<(), ApiError> {
        self.post_json("/settings/volumes", &volumes).await
    }

    pub async fn set_radio(&self, settings: &RadioSettings) -> Result<(), ApiError> {
        self.post_json("/settings/radio", settings).await
    }

    pub async fn set_company_name(&self, name: &str) -> Result<(), ApiError> {
        let payload = CompanyName {
            name: name.to_string(),
        };
        self.post_json("/settings/company", &payload).await
    }

    pub async fn set_boot(&self, start_active: bool) -> Result<(), ApiError> {
        self.post_json("/settings/boot", &BootSettings { start_active })
            .await
    }

    pub async fn set_tts_engine(&self, engine: &str) -> Result<(), ApiError> {
        let payload = TtsEngine {
            engine: engine.to_string(),
        };
        self.post_json("/settings/tts-engine", &payload).await
    }

    // ── Holidays ───────────────────────────────────────────────────────────

    pub async fn holidays(&self) -> Result<HolidayOverview, ApiError> {
        self.get_json("/settings/holidays").await
    }

    pub async fn update_holidays(&self, update: &HolidayUpdate) -> Result<(), ApiError> {
        self.post_json("/settings/holidays", update).await
    }

    // ── Special Days ───────────────────────────────────────────────────────

    pub async fn special_days(&self) -> Result<SpecialDaysOverview, ApiError> {
        self.get_json("/special-days").await
    }

    pub async fn set_special_day_config(&self, config: &SpecialDayConfig) -> Result<(), ApiError> {
        self.post_json("/special-days/config", config).await
    }

    /// Replaces the whole birthday roster; there is no per-person endpoint.
    pub async fn set_special_day_people(&self, people: &[Person]) -> Result<(), ApiError> {
        self.post_json("/special-days/people", people).await
    }

    pub async fn announce_special_day(&self, name: &str) -> Result<(), ApiError> {
        let request = AnnounceRequest {
            name: name.to_string(),
        };
        self.post_json("/special-days/announce", &request).await
    }

    pub async fn stop_special_day(&self) -> Result<(), ApiError> {
        self.post_empty("/special-days/stop").await
    }

    // ── Backup ─────────────────────────────────────────────────────────────

    /// The appliance's full JSON export (schedule plus configuration).
    pub async fn export_backup(&self) -> Result<Value, ApiError> {
        self.get_json("/backup/export").await
    }

    /// Uploads a previously exported `.json` document as the `file` part.
    pub async fn import_backup(&self, path: &Path) -> Result<(), ApiError> {
        let form = Form::new().part("file", file_part(path, "json")?);

        let url = self.endpoint("/backup/import")?;
        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;
        check_status(&url, response).await?;
        Ok(())
    }

    // ── Plumbing ───────────────────────────────────────────────────────────

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|_| ApiError::InvalidUrl {
            url: format!("{}{path}", self.base),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;
        let response = check_status(&url, response).await?;
        response.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;
        check_status(&url, response).await?;
        Ok(())
    }

    async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;
        check_status(&url, response).await?;
        Ok(())
    }
}

async fn check_status(url: &Url, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    // FastAPI puts the useful message in the body; keep a short excerpt.
    let detail: String = response
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(200)
        .collect();
    Err(ApiError::Status {
        url: url.to_string(),
        status,
        detail,
    })
}

/// Reads a local file into a multipart part, refusing the wrong extension
/// before any bytes are read.
fn file_part(path: &Path, expected: &'static str) -> Result<Part, ApiError> {
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(expected));
    if !matches {
        return Err(ApiError::WrongExtension {
            path: path.to_path_buf(),
            expected,
        });
    }

    let bytes = std::fs::read(path).map_err(|source| ApiError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(Part::bytes(bytes).file_name(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_base_url() {
        let err = ApiClient::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn joins_endpoint_paths_against_the_base() {
        let client = ApiClient::new("http://127.0.0.1:7777", Duration::from_secs(5)).unwrap();
        let url = client.endpoint("/files/bells").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:7777/files/bells");
    }

    #[test]
    fn refuses_non_mp3_uploads_before_reading() {
        let err = file_part(Path::new("/nonexistent/jingle.wav"), "mp3").unwrap_err();
        assert!(matches!(err, ApiError::WrongExtension { .. }));
    }

    #[test]
    fn missing_upload_file_reports_read_error() {
        let err = file_part(Path::new("/nonexistent/jingle.mp3"), "mp3").unwrap_err();
        assert!(matches!(err, ApiError::ReadFile { .. }));
    }
}
