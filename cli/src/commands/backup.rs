//! Appliance backup export and import.

use std::path::PathBuf;

use crate::commands::client;
use crate::context::CliContext;
use crate::repl::confirm;

/// Saves the appliance's full export (schedule plus configuration) as
/// pretty-printed JSON. Without a path, a dated filename in the current
/// directory is used.
pub async fn export(ctx: &CliContext, path: Option<PathBuf>) -> Result<(), String> {
    let client = client(ctx).await;
    let data = client.export_backup().await.map_err(|e| e.to_string())?;
    let mut pretty = serde_json::to_string_pretty(&data).map_err(|e| e.to_string())?;
    pretty.push('\n');

    let path = path.unwrap_or_else(|| {
        PathBuf::from(format!(
            "carillon-backup-{}.json",
            chrono::Local::now().format("%Y-%m-%d")
        ))
    });
    std::fs::write(&path, pretty)
        .map_err(|e| format!("could not write {}: {e}", path.display()))?;
    println!("backup written to {}", path.display());
    Ok(())
}

/// Restores a previously exported backup. The appliance overwrites its
/// schedule and settings, so the local draft is reloaded afterwards.
pub async fn import(ctx: &CliContext, path: PathBuf) -> Result<(), String> {
    let question = format!(
        "Import {} and overwrite the appliance's schedule and settings?",
        path.display()
    );
    if !confirm(&question)? {
        println!("import cancelled");
        return Ok(());
    }

    let client = client(ctx).await;
    client
        .import_backup(&path)
        .await
        .map_err(|e| e.to_string())?;
    println!("backup imported");

    let mut session = ctx.session.write().await;
    match session.load().await {
        Ok(()) => println!("schedule reloaded from the appliance"),
        Err(err) => println!("schedule reload failed: {err} (run 'reload' to retry)"),
    }
    Ok(())
}
