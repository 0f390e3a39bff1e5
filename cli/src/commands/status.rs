//! Appliance status views and the live watch loop.

use std::time::Duration;

use carillon_types::ApplianceStatus;
use tracing::warn;

use crate::commands::client;
use crate::context::CliContext;

/// Consecutive poll failures tolerated before `watch` gives up.
const WATCH_ERROR_LIMIT: u32 = 5;

pub async fn status(ctx: &CliContext) -> Result<(), String> {
    let client = client(ctx).await;
    let status = client.status().await.map_err(|e| e.to_string())?;
    print_status(&status);
    Ok(())
}

pub async fn timeline(ctx: &CliContext) -> Result<(), String> {
    let client = client(ctx).await;
    let status = client.status().await.map_err(|e| e.to_string())?;
    let Some(timeline) = status.daily_timeline.filter(|t| !t.is_empty()) else {
        println!("the appliance reported no events for today");
        return Ok(());
    };

    println!("{:<7} {:<16} {:<28} PASSED", "TIME", "KIND", "NAME");
    println!("{}", "-".repeat(60));
    for entry in &timeline {
        println!(
            "{:<7} {:<16} {:<28} {}",
            entry.time,
            entry.kind,
            entry.name,
            if entry.passed { "yes" } else { "" },
        );
    }
    Ok(())
}

/// Polls `/status` until Ctrl-C, printing one line per sample.
pub async fn watch(ctx: &CliContext, interval_secs: u64) -> Result<(), String> {
    let client = client(ctx).await;
    let period = Duration::from_secs(interval_secs.max(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut consecutive_errors = 0u32;

    println!(
        "watching appliance status every {}s; press Ctrl-C to stop",
        period.as_secs()
    );
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(());
            }
            _ = ticker.tick() => {
                match client.status().await {
                    Ok(status) => {
                        consecutive_errors = 0;
                        print_watch_line(&status);
                    }
                    Err(err) => {
                        consecutive_errors += 1;
                        warn!(error = %err, "status poll failed");
                        println!("[poll failed: {err}]");
                        if consecutive_errors >= WATCH_ERROR_LIMIT {
                            return Err(format!(
                                "giving up after {consecutive_errors} failed polls"
                            ));
                        }
                    }
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn print_status(status: &ApplianceStatus) {
    println!("state:            {}", status.state.as_str());
    println!("playing:          {}", yes_no(status.is_playing));

    if let Some(media) = &status.current_media {
        match (status.media_time, status.media_duration) {
            (Some(time), Some(duration)) if duration > 0.0 => println!(
                "media:            {} ({} / {})",
                media,
                format_clock(time),
                format_clock(duration)
            ),
            _ => println!("media:            {media}"),
        }
    }

    let volume = match status.current_volume_type {
        Some(channel) => format!("{} ({} channel)", status.volume, channel.as_str()),
        None => status.volume.to_string(),
    };
    println!("volume:           {volume}");
    if let (Some(bell), Some(music), Some(manual)) =
        (status.volume_bell, status.volume_music, status.volume_manual)
    {
        println!("channel volumes:  bell {bell}  music {music}  manual {manual}");
    }

    if let Some(source) = status.music_source {
        match (source, &status.radio_url) {
            (carillon_types::MusicSource::Radio, Some(url)) => {
                println!("music source:     radio ({url})");
            }
            _ => println!("music source:     {}", source.as_str()),
        }
    }

    if let Some(next) = format_next_event(status) {
        println!("next event:       {next}");
    }

    if let Some(running) = status.scheduler_running {
        println!(
            "scheduler:        {}",
            if running { "running" } else { "stopped" }
        );
    }
    if let Some(streaming) = &status.streaming
        && streaming.enabled
    {
        match streaming.port {
            Some(port) => println!("streaming:        on (port {port})"),
            None => println!("streaming:        on"),
        }
    }
    if let Some(ip) = &status.system_ip {
        println!("appliance ip:     {ip}");
    }
}

fn print_watch_line(status: &ApplianceStatus) {
    let now = chrono::Local::now().format("%H:%M:%S");
    let mut line = format!("{now}  {:<7} vol {:<3}", status.state.as_str(), status.volume);
    if status.is_playing {
        line.push_str("  playing ");
        line.push_str(status.current_media.as_deref().unwrap_or("?"));
    }
    if let Some(next) = format_next_event(status) {
        line.push_str("  next: ");
        line.push_str(&next);
    }
    println!("{line}");
}

/// Firmware variants disagree on where the next event's name lives, and the
/// time field may be empty or "-" when nothing is planned.
fn format_next_event(status: &ApplianceStatus) -> Option<String> {
    let name = status
        .next_event_name
        .as_deref()
        .or(status.next_event.as_deref())
        .filter(|name| !name.is_empty())?;
    match status.next_event_time.as_deref() {
        Some(time) if !time.is_empty() && time != "-" => Some(format!("{name} at {time}")),
        _ => Some(name.to_string()),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Current firmware reports media clocks in VLC milliseconds while older
/// builds send seconds; anything above 10000 is read as milliseconds.
fn format_clock(value: f64) -> String {
    let seconds = if value > 10_000.0 { value / 1000.0 } else { value };
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_clock_reads_large_values_as_milliseconds() {
        assert_eq!(format_clock(185_000.0), "3:05");
        assert_eq!(format_clock(3_250_000.0), "54:10");
    }

    #[test]
    fn media_clock_passes_seconds_through() {
        assert_eq!(format_clock(185.0), "3:05");
        assert_eq!(format_clock(10_000.0), "166:40");
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(-2.0), "0:00");
    }
}
