//! Console commands
//!
//! Each command prints its outcome and returns `Err(String)` when the
//! operator should see a failure.
//!
//! # Command Categories
//!
//! - `schedule` - the week editor: view, edit, copy, save, reload
//! - `status` - appliance dashboard, timeline, polling
//! - `library` - audio file list/upload/delete, preview
//! - `player` - music, volumes, radio source, TTS announcements
//! - `holidays` - holiday skip-list and country
//! - `special` - birthday roster and announcements
//! - `settings` - company, boot, TTS engine, console configuration
//! - `backup` - appliance configuration export/import

pub mod backup;
pub mod holidays;
pub mod library;
pub mod player;
pub mod schedule;
pub mod settings;
pub mod special;
pub mod status;

use carillon_core::ApiClient;

use crate::context::CliContext;

/// Snapshot of the session's client: cloned under the read lock, used after
/// the lock is released so a slow request never blocks other state.
pub(crate) async fn client(ctx: &CliContext) -> ApiClient {
    ctx.session.read().await.client().clone()
}
