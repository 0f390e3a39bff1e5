//! Playback, volume, and music source commands.

use carillon_types::{ChannelVolumes, MusicSource, RadioSettings};

use crate::commands::client;
use crate::context::CliContext;

const MAX_VOLUME: u32 = 100;

pub async fn music(ctx: &CliContext, enable: bool) -> Result<(), String> {
    let client = client(ctx).await;
    client
        .set_manual_music(enable)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "manual music {}",
        if enable { "started" } else { "stopped" }
    );
    Ok(())
}

pub async fn volume(ctx: &CliContext, value: u32) -> Result<(), String> {
    check_volume("volume", value)?;
    let client = client(ctx).await;
    client.set_volume(value).await.map_err(|e| e.to_string())?;
    println!("volume set to {value}");
    Ok(())
}

/// With no flags, shows the per-channel volumes. With any subset of flags,
/// updates those channels and keeps the appliance's values for the rest.
pub async fn volumes(
    ctx: &CliContext,
    bell: Option<u32>,
    music: Option<u32>,
    manual: Option<u32>,
) -> Result<(), String> {
    let client = client(ctx).await;

    if bell.is_none() && music.is_none() && manual.is_none() {
        let status = client.status().await.map_err(|e| e.to_string())?;
        match (status.volume_bell, status.volume_music, status.volume_manual) {
            (Some(b), Some(m), Some(man)) => println!("bell {b}  music {m}  manual {man}"),
            _ => println!("the appliance did not report per-channel volumes"),
        }
        return Ok(());
    }

    for (label, value) in [("bell", bell), ("music", music), ("manual", manual)] {
        if let Some(value) = value {
            check_volume(label, value)?;
        }
    }

    let status = client.status().await.map_err(|e| e.to_string())?;
    let volumes = ChannelVolumes {
        bell: resolve_channel("bell", bell, status.volume_bell)?,
        music: resolve_channel("music", music, status.volume_music)?,
        manual: resolve_channel("manual", manual, status.volume_manual)?,
    };
    let (b, m, man) = (volumes.bell, volumes.music, volumes.manual);
    client
        .set_volumes(volumes)
        .await
        .map_err(|e| e.to_string())?;
    println!("channel volumes set: bell {b}  music {m}  manual {man}");
    Ok(())
}

pub async fn source(ctx: &CliContext, source: &str) -> Result<(), String> {
    let source = parse_source(source)?;
    let client = client(ctx).await;
    let status = client.status().await.map_err(|e| e.to_string())?;

    let url = status.radio_url.unwrap_or_default();
    if source == MusicSource::Radio && url.is_empty() {
        return Err("no radio url configured; set one with 'player radio <url>' first".to_string());
    }
    let settings = RadioSettings {
        url,
        stations: status.radio_stations.unwrap_or_default(),
        source,
    };
    client
        .set_radio(&settings)
        .await
        .map_err(|e| e.to_string())?;
    println!("music source set to {}", source.as_str());
    Ok(())
}

pub async fn radio(ctx: &CliContext, url: &str) -> Result<(), String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!(
            "'{url}' does not look like a stream url (expected http:// or https://)"
        ));
    }

    let client = client(ctx).await;
    let status = client.status().await.map_err(|e| e.to_string())?;
    let settings = RadioSettings {
        url: url.to_string(),
        stations: status.radio_stations.unwrap_or_default(),
        source: status.music_source.unwrap_or_default(),
    };
    client
        .set_radio(&settings)
        .await
        .map_err(|e| e.to_string())?;
    println!("radio stream set to {url}");
    Ok(())
}

pub async fn announce(ctx: &CliContext, text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("nothing to announce".to_string());
    }
    let client = client(ctx).await;
    client
        .tts_announce(text)
        .await
        .map_err(|e| e.to_string())?;
    println!("announcement sent");
    Ok(())
}

pub async fn scheduler(ctx: &CliContext, enable: bool) -> Result<(), String> {
    let client = client(ctx).await;
    let result = if enable {
        client.enable_scheduler().await
    } else {
        client.disable_scheduler().await
    };
    result.map_err(|e| e.to_string())?;
    println!(
        "scheduler {}",
        if enable { "enabled" } else { "disabled" }
    );
    Ok(())
}

fn check_volume(label: &str, value: u32) -> Result<(), String> {
    if value > MAX_VOLUME {
        return Err(format!("{label} {value} out of range (0-{MAX_VOLUME})"));
    }
    Ok(())
}

fn resolve_channel(
    label: &str,
    requested: Option<u32>,
    current: Option<u32>,
) -> Result<u32, String> {
    requested
        .or(current)
        .ok_or_else(|| format!("the appliance did not report a {label} volume; pass --{label}"))
}

fn parse_source(input: &str) -> Result<MusicSource, String> {
    match input.to_lowercase().as_str() {
        "local" => Ok(MusicSource::Local),
        "radio" => Ok(MusicSource::Radio),
        other => Err(format!("unknown source '{other}' (use local or radio)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_parse_case_insensitively() {
        assert_eq!(parse_source("local"), Ok(MusicSource::Local));
        assert_eq!(parse_source("Radio"), Ok(MusicSource::Radio));
        assert!(parse_source("spotify").is_err());
    }

    #[test]
    fn volumes_above_hundred_are_rejected() {
        assert!(check_volume("volume", 100).is_ok());
        assert!(check_volume("volume", 101).is_err());
    }

    #[test]
    fn missing_channel_values_fall_back_to_appliance() {
        assert_eq!(resolve_channel("bell", Some(40), Some(80)), Ok(40));
        assert_eq!(resolve_channel("bell", None, Some(80)), Ok(80));
        assert!(resolve_channel("bell", None, None).is_err());
    }
}
