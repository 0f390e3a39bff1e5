//! Editor session lifecycle
//!
//! Owns the week draft and the appliance client and runs the
//! load → edit → save cycle. The draft is replaced wholesale on every load;
//! a failed save keeps it untouched so no work is lost.

use thiserror::Error;
use tracing::{debug, warn};

use carillon_types::AudioFolder;

use crate::client::ApiClient;
use crate::editor::WeekEditor;
use crate::error::ApiError;

/// Where the session is in its load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    /// Initial fetch (or reload) has not completed.
    Loading,
    Ready,
    Saving,
    /// The week fetch failed; a reload is the retry.
    LoadFailed(String),
    /// A save failed; the draft is retained so the operator can retry.
    SaveFailed(String),
}

impl std::fmt::Display for EditorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorPhase::Loading => f.write_str("loading"),
            EditorPhase::Ready => f.write_str("ready"),
            EditorPhase::Saving => f.write_str("saving"),
            EditorPhase::LoadFailed(err) => write!(f, "load failed: {err}"),
            EditorPhase::SaveFailed(err) => write!(f, "save failed: {err}"),
        }
    }
}

/// Errors surfaced by session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no schedule loaded")]
    NoDraft,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One operator's editing session against one appliance.
pub struct EditorSession {
    client: ApiClient,
    phase: EditorPhase,
    editor: Option<WeekEditor>,
    bell_files: Vec<String>,
    announcement_files: Vec<String>,
}

impl EditorSession {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            phase: EditorPhase::Loading,
            editor: None,
            bell_files: Vec::new(),
            announcement_files: Vec::new(),
        }
    }

    pub fn phase(&self) -> &EditorPhase {
        &self.phase
    }

    /// The supplementary command groups share this client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Swaps the client without touching the draft. Used when the request
    /// timeout changes; switching appliances replaces the whole session.
    pub fn set_client(&mut self, client: ApiClient) {
        self.client = client;
    }

    pub fn editor(&self) -> Option<&WeekEditor> {
        self.editor.as_ref()
    }

    /// Mutable draft access. Edits are allowed while Ready and after a
    /// failed save (the retained draft is there to be fixed and retried).
    pub fn editor_mut(&mut self) -> Option<&mut WeekEditor> {
        if matches!(self.phase, EditorPhase::Ready | EditorPhase::SaveFailed(_)) {
            self.editor.as_mut()
        } else {
            None
        }
    }

    /// Bell filenames for selection prompts; empty when the lookup failed.
    pub fn bell_files(&self) -> &[String] {
        &self.bell_files
    }

    /// Announcement filenames for selection prompts.
    pub fn announcement_files(&self) -> &[String] {
        &self.announcement_files
    }

    /// Fetches the week and the asset option lists.
    ///
    /// A malformed or legacy week payload is not an error: the editor
    /// synthesizes the default week. A network failure leaves the session
    /// without a draft and is returned for the operator to see.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.phase = EditorPhase::Loading;
        match self.client.fetch_schedule().await {
            Ok(raw) => {
                self.editor = Some(WeekEditor::from_backend(&raw));
                self.phase = EditorPhase::Ready;
                debug!("week schedule loaded");
            }
            Err(err) => {
                self.editor = None;
                self.phase = EditorPhase::LoadFailed(err.to_string());
                return Err(err);
            }
        }

        self.bell_files = self.fetch_options(AudioFolder::Bells).await;
        self.announcement_files = self.fetch_options(AudioFolder::Announcements).await;
        Ok(())
    }

    /// Re-fetches the selection option lists, e.g. after an upload.
    pub async fn refresh_options(&mut self) {
        self.bell_files = self.fetch_options(AudioFolder::Bells).await;
        self.announcement_files = self.fetch_options(AudioFolder::Announcements).await;
    }

    // Option lists degrade silently: fewer dropdown choices, never an error.
    async fn fetch_options(&self, folder: AudioFolder) -> Vec<String> {
        match self.client.list_files(folder).await {
            Ok(files) => files,
            Err(err) => {
                warn!(%folder, error = %err, "asset list unavailable, options left empty");
                Vec::new()
            }
        }
    }

    /// Serializes the entire draft and submits it in one request.
    ///
    /// On success the canonical schedule is re-fetched and adopted (the
    /// appliance is the source of truth for what persisted). On failure the
    /// draft is left exactly as it was.
    pub async fn save(&mut self) -> Result<(), SessionError> {
        let week = self
            .editor
            .as_ref()
            .ok_or(SessionError::NoDraft)?
            .week()
            .to_vec();

        self.phase = EditorPhase::Saving;
        match self.client.save_schedule(&week).await {
            Ok(()) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.mark_clean();
                }
                match self.client.fetch_schedule().await {
                    Ok(raw) => {
                        if let Some(editor) = self.editor.as_mut() {
                            editor.adopt(&raw);
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "saved, but refreshing the schedule failed; keeping local copy");
                    }
                }
                self.phase = EditorPhase::Ready;
                Ok(())
            }
            Err(err) => {
                self.phase = EditorPhase::SaveFailed(err.to_string());
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn session() -> EditorSession {
        let client = ApiClient::new("http://127.0.0.1:7777", Duration::from_secs(10)).unwrap();
        EditorSession::new(client)
    }

    #[test]
    fn starts_without_a_draft() {
        let mut s = session();
        assert_eq!(*s.phase(), EditorPhase::Loading);
        assert!(s.editor().is_none());
        assert!(s.editor_mut().is_none());
        assert!(s.bell_files().is_empty());
    }

    #[test]
    fn phase_labels_read_naturally() {
        assert_eq!(EditorPhase::Ready.to_string(), "ready");
        assert_eq!(
            EditorPhase::SaveFailed("boom".to_string()).to_string(),
            "save failed: boom"
        );
    }
}
