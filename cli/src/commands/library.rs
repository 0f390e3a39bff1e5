//! Sound library commands: listing, uploading, deleting, previewing.

use std::path::PathBuf;

use carillon_types::AudioFolder;
use tracing::warn;

use crate::commands::client;
use crate::context::CliContext;
use crate::repl::confirm;

pub async fn list(ctx: &CliContext, folder: AudioFolder) -> Result<(), String> {
    let client = client(ctx).await;
    let mut files = client.list_files(folder).await.map_err(|e| e.to_string())?;
    files.sort();

    if files.is_empty() {
        println!("no files in {folder}");
        return Ok(());
    }
    println!("{} ({} files)", folder, files.len());
    for file in &files {
        println!("  {file}");
    }
    Ok(())
}

/// Prints the sound options cached at the last load or refresh. These are
/// what the editor offers when picking bell and announcement sounds.
pub async fn sounds(ctx: &CliContext) -> Result<(), String> {
    let session = ctx.session.read().await;
    print_options("bell sounds", session.bell_files());
    print_options("announcements", session.announcement_files());
    Ok(())
}

fn print_options(label: &str, files: &[String]) {
    if files.is_empty() {
        println!("{label}: none cached (list was unavailable at last load)");
        return;
    }
    println!("{label}:");
    for file in files {
        println!("  {file}");
    }
}

pub async fn upload(
    ctx: &CliContext,
    folder: AudioFolder,
    paths: Vec<PathBuf>,
) -> Result<(), String> {
    let client = client(ctx).await;
    let uploaded = client
        .upload_files(folder, &paths)
        .await
        .map_err(|e| e.to_string())?;

    match uploaded.filenames.len() {
        0 => println!("the appliance accepted the upload but reported no filenames"),
        n => {
            println!("uploaded {n} file(s) to {folder}:");
            for name in &uploaded.filenames {
                println!("  {name}");
            }
        }
    }
    refresh_editor_options(ctx, folder).await;
    Ok(())
}

pub async fn delete(ctx: &CliContext, folder: AudioFolder, filename: &str) -> Result<(), String> {
    let question = format!("Delete {filename} from {folder}? The appliance removes it permanently.");
    if !confirm(&question)? {
        println!("delete cancelled");
        return Ok(());
    }

    let client = client(ctx).await;
    client
        .delete_file(folder, filename)
        .await
        .map_err(|e| e.to_string())?;
    println!("deleted {filename} from {folder}");
    refresh_editor_options(ctx, folder).await;
    Ok(())
}

/// Keeps the editor's cached sound lists in step after library changes.
async fn refresh_editor_options(ctx: &CliContext, folder: AudioFolder) {
    if matches!(folder, AudioFolder::Bells | AudioFolder::Announcements) {
        ctx.session.write().await.refresh_options().await;
    }
}

/// Fire-and-forget: a failed preview is logged, never surfaced, so a flaky
/// speaker test cannot interrupt an editing session.
pub async fn preview(ctx: &CliContext, folder: AudioFolder, filename: &str) -> Result<(), String> {
    let client = client(ctx).await;
    println!("preview of {filename} requested");
    if let Err(err) = client.preview(folder, filename).await {
        warn!(%folder, filename, error = %err, "preview request failed");
    }
    Ok(())
}

/// Fire-and-forget, same contract as [`preview`].
pub async fn stop(ctx: &CliContext) -> Result<(), String> {
    let client = client(ctx).await;
    println!("stop requested");
    if let Err(err) = client.stop().await {
        warn!(error = %err, "stop request failed");
    }
    Ok(())
}
