//! Week editor commands
//!
//! Everything here mutates only the in-memory draft; `save` is the single
//! point where the appliance learns about edits.

use carillon_core::editor::{ActivityEdit, EditError, InterimEdit, WeekEditor};
use carillon_core::{EditorPhase, TimeOfDay};
use carillon_types::{DaySchedule, day_name};

use crate::context::CliContext;
use crate::repl::confirm;

const NO_SCHEDULE: &str = "no schedule loaded; run 'reload'";

/// Which days a copy operation overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CopyScope {
    All,
    Weekdays,
    Weekend,
}

// ─────────────────────────────────────────────────────────────────────────────
// Day Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Accepts a day index (0=Sunday..6=Saturday) or an English day name
/// prefix of at least three letters ("mon", "Wednesday", ...).
pub fn parse_day(input: &str) -> Result<u8, String> {
    if let Ok(index) = input.parse::<u8>() {
        if index <= 6 {
            return Ok(index);
        }
        return Err(format!("day index {index} out of range (0=Sunday..6=Saturday)"));
    }

    let lower = input.to_lowercase();
    if lower.len() >= 3 {
        for index in 0u8..7 {
            if day_name(index).to_lowercase().starts_with(&lower) {
                return Ok(index);
            }
        }
    }
    Err(format!("unknown day '{input}' (use 0-6 or a day name)"))
}

/// `--day` argument, or the editor's active day when absent.
async fn resolve_day(ctx: &CliContext, day: Option<&str>) -> Result<u8, String> {
    match day {
        Some(input) => parse_day(input),
        None => {
            let session = ctx.session.read().await;
            let editor = session.editor().ok_or(NO_SCHEDULE)?;
            Ok(editor.active_day())
        }
    }
}

/// Runs one draft mutation under the write lock.
async fn with_editor<T>(
    ctx: &CliContext,
    apply: impl FnOnce(&mut WeekEditor) -> Result<T, EditError>,
) -> Result<T, String> {
    let mut session = ctx.session.write().await;
    let Some(editor) = session.editor_mut() else {
        return Err(match session.phase() {
            EditorPhase::Loading => "schedule is still loading".to_string(),
            phase => format!("schedule unavailable ({phase}); run 'reload'"),
        });
    };
    apply(editor).map_err(|e| e.to_string())
}

fn require_time(label: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(t) if TimeOfDay::parse(t).is_none() => {
            Err(format!("{label} '{t}' is not a valid HH:MM time"))
        }
        _ => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Viewing
// ─────────────────────────────────────────────────────────────────────────────

pub async fn week(ctx: &CliContext) -> Result<(), String> {
    let session = ctx.session.read().await;
    let Some(editor) = session.editor() else {
        println!("no schedule loaded ({}); run 'reload'", session.phase());
        return Ok(());
    };

    println!("{:<13} {:<4} {:<11} {:<7} LAST", "DAY", "ON", "ACTIVITIES", "FIRST");
    println!("{}", "-".repeat(46));
    for day_of_week in 0..7 {
        let Some(day) = editor.day(day_of_week) else {
            println!(" {:<12} (missing from appliance data)", day_name(day_of_week));
            continue;
        };
        let marker = if day_of_week == editor.active_day() { "*" } else { " " };
        let first = day
            .activities
            .first()
            .map(|a| a.start_time.as_str())
            .unwrap_or("-");
        let last = day
            .activities
            .last()
            .map(|a| a.end_time.as_str())
            .unwrap_or("-");
        println!(
            "{}{:<12} {:<4} {:<11} {:<7} {}",
            marker,
            day_name(day_of_week),
            if day.enabled { "yes" } else { "no" },
            day.activities.len(),
            first,
            last,
        );
    }
    if editor.is_dirty() {
        println!("\nunsaved changes; run 'save' to persist them");
    }
    Ok(())
}

pub async fn show(ctx: &CliContext, day: Option<&str>) -> Result<(), String> {
    let target = resolve_day(ctx, day).await?;
    let session = ctx.session.read().await;
    let editor = session.editor().ok_or(NO_SCHEDULE)?;
    let Some(schedule) = editor.day(target) else {
        println!("no schedule for {}", day_name(target));
        return Ok(());
    };
    print_day(schedule);
    Ok(())
}

fn print_day(day: &DaySchedule) {
    println!(
        "{} (day {})  {}  {} activities",
        day_name(day.day_of_week),
        day.day_of_week,
        if day.enabled { "enabled" } else { "disabled" },
        day.activities.len(),
    );
    if day.activities.is_empty() {
        return;
    }

    println!(
        "{:<15} {:<13} {:<22} {:<26} MUSIC",
        "ID", "TIME", "NAME", "BELLS"
    );
    println!("{}", "-".repeat(84));
    for activity in &day.activities {
        println!(
            "{:<15} {:<13} {:<22} {:<26} {}",
            activity.id,
            format!("{}-{}", activity.start_time, activity.end_time),
            activity.name,
            format!("{} / {}", activity.start_sound_id, activity.end_sound_id),
            if activity.play_music { "yes" } else { "no" },
        );
        if activity.start_announcement_id.is_some() || activity.end_announcement_id.is_some() {
            println!(
                "      says: start={} end={}",
                activity.start_announcement_id.as_deref().unwrap_or("-"),
                activity.end_announcement_id.as_deref().unwrap_or("-"),
            );
        }
        for (i, interim) in activity.interim_announcements.iter().enumerate() {
            if i == 0 {
                println!("      interim announcements:");
            }
            println!(
                "        {:<15} {:<7} {:<26} {}",
                interim.id,
                interim.time,
                interim.sound_id,
                if interim.enabled { "on" } else { "off" },
            );
        }
    }
}

pub async fn select_day(ctx: &CliContext, day: &str) -> Result<(), String> {
    let index = parse_day(day)?;
    with_editor(ctx, |editor| editor.set_active_day(index)).await?;
    println!("active day is now {}", day_name(index));
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Day & Activity Edits
// ─────────────────────────────────────────────────────────────────────────────

pub async fn set_enabled(ctx: &CliContext, day: Option<&str>, enabled: bool) -> Result<(), String> {
    let index = resolve_day(ctx, day).await?;
    with_editor(ctx, |editor| editor.set_day_enabled(index, enabled)).await?;
    println!(
        "{} is now {}",
        day_name(index),
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

pub async fn add_activity(ctx: &CliContext, day: Option<&str>) -> Result<(), String> {
    let index = resolve_day(ctx, day).await?;
    let id = with_editor(ctx, |editor| editor.add_activity(index)).await?;

    let session = ctx.session.read().await;
    let added = session
        .editor()
        .and_then(|e| e.day(index))
        .and_then(|d| d.activities.iter().find(|a| a.id == id));
    match added {
        Some(activity) => println!(
            "added activity {} ({}-{}) to {}",
            id,
            activity.start_time,
            activity.end_time,
            day_name(index)
        ),
        None => println!("added activity {id} to {}", day_name(index)),
    }
    Ok(())
}

pub async fn remove_activity(
    ctx: &CliContext,
    activity: &str,
    day: Option<&str>,
) -> Result<(), String> {
    let index = resolve_day(ctx, day).await?;
    with_editor(ctx, |editor| editor.remove_activity(index, activity)).await?;
    println!("removed activity {activity} from {}", day_name(index));
    Ok(())
}

pub async fn edit_activity(
    ctx: &CliContext,
    activity: &str,
    day: Option<&str>,
    edit: ActivityEdit,
) -> Result<(), String> {
    if edit.is_empty() {
        return Err("nothing to change; pass at least one field flag".to_string());
    }
    require_time("start time", edit.start_time.as_deref())?;
    require_time("end time", edit.end_time.as_deref())?;

    let index = resolve_day(ctx, day).await?;
    with_editor(ctx, |editor| editor.edit_activity(index, activity, edit)).await?;
    println!("updated activity {activity}");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Interim Announcements
// ─────────────────────────────────────────────────────────────────────────────

pub async fn add_interim(ctx: &CliContext, activity: &str, day: Option<&str>) -> Result<(), String> {
    let index = resolve_day(ctx, day).await?;
    let id = with_editor(ctx, |editor| editor.add_interim(index, activity)).await?;

    let session = ctx.session.read().await;
    let time = session
        .editor()
        .and_then(|e| e.day(index))
        .and_then(|d| d.activities.iter().find(|a| a.id == activity))
        .and_then(|a| a.interim_announcements.iter().find(|i| i.id == id))
        .map(|i| i.time.clone());
    match time {
        Some(time) => println!("added interim announcement {id} at {time}"),
        None => println!("added interim announcement {id}"),
    }
    Ok(())
}

pub async fn remove_interim(
    ctx: &CliContext,
    activity: &str,
    announcement: &str,
    day: Option<&str>,
) -> Result<(), String> {
    let index = resolve_day(ctx, day).await?;
    with_editor(ctx, |editor| {
        editor.remove_interim(index, activity, announcement)
    })
    .await?;
    println!("removed interim announcement {announcement}");
    Ok(())
}

pub async fn edit_interim(
    ctx: &CliContext,
    activity: &str,
    announcement: &str,
    day: Option<&str>,
    edit: InterimEdit,
) -> Result<(), String> {
    if edit.is_empty() {
        return Err("nothing to change; pass at least one field flag".to_string());
    }
    require_time("time", edit.time.as_deref())?;

    let index = resolve_day(ctx, day).await?;
    with_editor(ctx, |editor| {
        editor.edit_interim(index, activity, announcement, edit)
    })
    .await?;
    println!("updated interim announcement {announcement}");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Copy Propagation
// ─────────────────────────────────────────────────────────────────────────────

pub async fn copy(ctx: &CliContext, scope: CopyScope) -> Result<(), String> {
    let source_name = {
        let session = ctx.session.read().await;
        let editor = session.editor().ok_or(NO_SCHEDULE)?;
        day_name(editor.active_day())
    };

    let scope_label = match scope {
        CopyScope::All => "every other day",
        CopyScope::Weekdays => "Monday through Friday",
        CopyScope::Weekend => "Saturday and Sunday",
    };
    let question =
        format!("Overwrite {scope_label} with {source_name}'s schedule? This replaces their activities.");
    if !confirm(&question)? {
        println!("copy cancelled");
        return Ok(());
    }

    let copied = with_editor(ctx, |editor| match scope {
        CopyScope::All => editor.copy_to_all(),
        CopyScope::Weekdays => editor.copy_to_weekdays(),
        CopyScope::Weekend => editor.copy_to_weekend(),
    })
    .await?;
    println!("copied {source_name}'s schedule to {copied} day(s)");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Persistence
// ─────────────────────────────────────────────────────────────────────────────

pub async fn save(ctx: &CliContext) -> Result<(), String> {
    let mut session = ctx.session.write().await;
    match session.save().await {
        Ok(()) => {
            println!("schedule saved");
            Ok(())
        }
        Err(err) => Err(format!("save failed: {err} (the draft is unchanged; fix and retry)")),
    }
}

pub async fn reload(ctx: &CliContext) -> Result<(), String> {
    let dirty = {
        let session = ctx.session.read().await;
        session.editor().map(|e| e.is_dirty()).unwrap_or(false)
    };
    if dirty && !confirm("Discard unsaved changes and reload from the appliance?")? {
        println!("reload cancelled");
        return Ok(());
    }

    let mut session = ctx.session.write().await;
    match session.load().await {
        Ok(()) => {
            println!("schedule loaded from {}", session.client().base_url());
            Ok(())
        }
        Err(err) => Err(format!("load failed: {err} (run 'reload' to retry)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_indices_parse_directly() {
        assert_eq!(parse_day("0"), Ok(0));
        assert_eq!(parse_day("6"), Ok(6));
        assert!(parse_day("7").is_err());
    }

    #[test]
    fn day_names_and_prefixes_parse() {
        assert_eq!(parse_day("sunday"), Ok(0));
        assert_eq!(parse_day("Mon"), Ok(1));
        assert_eq!(parse_day("WED"), Ok(3));
        assert_eq!(parse_day("sat"), Ok(6));
    }

    #[test]
    fn short_or_unknown_names_are_rejected() {
        assert!(parse_day("s").is_err());
        assert!(parse_day("su").is_err());
        assert!(parse_day("blursday").is_err());
    }
}
