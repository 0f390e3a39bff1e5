//! Console and appliance settings commands.

use carillon_core::{ApiClient, ConsoleConfig, EditorSession};

use crate::commands::client;
use crate::context::CliContext;
use crate::repl::confirm;

const MAX_TIMEOUT_SECS: u64 = 300;

/// Console settings plus whatever appliance settings `/status` reports.
pub async fn show(ctx: &CliContext) -> Result<(), String> {
    {
        let config = ctx.config.read().await;
        println!("configured url:  {}", config.appliance_url);
        println!("timeout:         {}s", config.request_timeout_secs);
    }
    if let Ok(path) = ConsoleConfig::path() {
        println!("config file:     {}", path.display());
    }

    let client = client(ctx).await;
    println!("connected to:    {}", client.base_url());

    match client.status().await {
        Ok(status) => {
            println!();
            if let Some(name) = &status.company_name {
                println!("company name:    {name}");
            }
            if let Some(boot) = status.start_on_boot {
                println!(
                    "start on boot:   {}",
                    if boot { "active" } else { "inactive" }
                );
            }
            if let Some(engine) = &status.tts_engine {
                println!("tts engine:      {engine}");
            }
            if let Some(running) = status.scheduler_running {
                println!(
                    "scheduler:       {}",
                    if running { "running" } else { "stopped" }
                );
            }
        }
        Err(err) => println!("\nappliance settings unavailable: {err}"),
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Console Side
// ─────────────────────────────────────────────────────────────────────────────

/// Points the console at a different appliance: validates the url, persists
/// it, and replaces the session with a fresh one loaded from the new address.
pub async fn set_url(ctx: &CliContext, url: &str) -> Result<(), String> {
    let url = url.trim().trim_end_matches('/');
    let timeout = { ctx.config.read().await.timeout() };
    let client = ApiClient::new(url, timeout).map_err(|e| e.to_string())?;

    let dirty = {
        let session = ctx.session.read().await;
        session.editor().map(|e| e.is_dirty()).unwrap_or(false)
    };
    if dirty && !confirm("Discard unsaved changes and connect to the new appliance?")? {
        println!("url unchanged");
        return Ok(());
    }

    {
        let mut config = ctx.config.write().await;
        config.appliance_url = url.to_string();
        if let Err(err) = config.save() {
            println!("note: could not persist the url ({err}); it applies to this session only");
        }
    }

    let mut session = ctx.session.write().await;
    *session = EditorSession::new(client);
    match session.load().await {
        Ok(()) => println!("now talking to {url}; schedule loaded"),
        Err(err) => println!(
            "now talking to {url}, but loading failed: {err} (run 'reload' to retry)"
        ),
    }
    Ok(())
}

/// Changes the request timeout and rebuilds the client in place, keeping
/// the current draft and any `--url` override.
pub async fn set_timeout(ctx: &CliContext, seconds: u64) -> Result<(), String> {
    if seconds == 0 || seconds > MAX_TIMEOUT_SECS {
        return Err(format!(
            "timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds"
        ));
    }

    let timeout = {
        let mut config = ctx.config.write().await;
        config.request_timeout_secs = seconds;
        if let Err(err) = config.save() {
            println!("note: could not persist the timeout ({err}); it applies to this session only");
        }
        config.timeout()
    };

    let mut session = ctx.session.write().await;
    let current = session.client().base_url().to_string();
    let client = ApiClient::new(&current, timeout).map_err(|e| e.to_string())?;
    session.set_client(client);
    println!("request timeout set to {seconds}s");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Appliance Side
// ─────────────────────────────────────────────────────────────────────────────

pub async fn company(ctx: &CliContext, name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("company name cannot be empty".to_string());
    }
    let client = client(ctx).await;
    client
        .set_company_name(name)
        .await
        .map_err(|e| e.to_string())?;
    println!("company name set to {name}");
    Ok(())
}

pub async fn boot(ctx: &CliContext, start_active: bool) -> Result<(), String> {
    let client = client(ctx).await;
    client
        .set_boot(start_active)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "scheduler will {} after the appliance boots",
        if start_active { "start" } else { "stay stopped" }
    );
    Ok(())
}

/// Engine names are opaque appliance identifiers (e.g. "edge-tr-emel");
/// the console passes them through unvalidated.
pub async fn tts_engine(ctx: &CliContext, engine: &str) -> Result<(), String> {
    let client = client(ctx).await;
    client
        .set_tts_engine(engine)
        .await
        .map_err(|e| e.to_string())?;
    println!("tts engine set to {engine}");
    Ok(())
}
