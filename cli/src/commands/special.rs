//! Birthday and special day announcement commands.

use carillon_core::{ApiClient, TimeOfDay};
use carillon_types::{Person, SpecialDayConfig};
use tracing::warn;

use crate::commands::client;
use crate::context::CliContext;

pub async fn show(ctx: &CliContext) -> Result<(), String> {
    let client = client(ctx).await;
    let overview = client.special_days().await.map_err(|e| e.to_string())?;

    let config = overview.config.unwrap_or_default();
    println!(
        "announcements:  {}",
        if config.enabled { "enabled" } else { "disabled" }
    );
    println!("times:          {}", config.announcement_times.join(", "));
    println!("template:       {}", config.template);

    if overview.people.is_empty() {
        println!("\nthe roster is empty; add people with 'special add <name> <date>'");
        return Ok(());
    }
    println!("\nroster ({} people):", overview.people.len());
    for person in &overview.people {
        println!("  {:<12} {}", person.date, person.name);
    }
    Ok(())
}

pub async fn set_enabled(ctx: &CliContext, enabled: bool) -> Result<(), String> {
    let client = client(ctx).await;
    let mut config = current_config(&client).await?;
    config.enabled = enabled;
    client
        .set_special_day_config(&config)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "special day announcements {}",
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

pub async fn times(ctx: &CliContext, times: Vec<String>) -> Result<(), String> {
    if times.is_empty() {
        return Err("pass at least one HH:MM time".to_string());
    }
    let mut normalized = Vec::with_capacity(times.len());
    for time in &times {
        match TimeOfDay::parse(time) {
            Some(parsed) => normalized.push(parsed.to_string()),
            None => return Err(format!("'{time}' is not a valid HH:MM time")),
        }
    }

    let client = client(ctx).await;
    let mut config = current_config(&client).await?;
    config.announcement_times = normalized;
    client
        .set_special_day_config(&config)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "announcement times set to {}",
        config.announcement_times.join(", ")
    );
    Ok(())
}

pub async fn template(ctx: &CliContext, template: &str) -> Result<(), String> {
    if !template.contains("{name}") {
        println!("note: the template has no {{name}} placeholder, so announcements will not say who");
    }
    let client = client(ctx).await;
    let mut config = current_config(&client).await?;
    config.template = template.to_string();
    client
        .set_special_day_config(&config)
        .await
        .map_err(|e| e.to_string())?;
    println!("template updated");
    Ok(())
}

pub async fn add(ctx: &CliContext, name: &str, date: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    check_person_date(date)?;

    let client = client(ctx).await;
    let overview = client.special_days().await.map_err(|e| e.to_string())?;
    let mut people = overview.people;
    if people.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
        return Err(format!("'{name}' is already on the roster"));
    }
    people.push(Person {
        name: name.to_string(),
        date: date.to_string(),
    });
    client
        .set_special_day_people(&people)
        .await
        .map_err(|e| e.to_string())?;
    println!("added {name} ({date}); {} people on the roster", people.len());
    Ok(())
}

pub async fn remove(ctx: &CliContext, name: &str) -> Result<(), String> {
    let client = client(ctx).await;
    let overview = client.special_days().await.map_err(|e| e.to_string())?;
    let mut people = overview.people;
    let before = people.len();
    people.retain(|p| !p.name.eq_ignore_ascii_case(name));
    if people.len() == before {
        return Err(format!("'{name}' is not on the roster"));
    }
    client
        .set_special_day_people(&people)
        .await
        .map_err(|e| e.to_string())?;
    println!("removed {name}; {} people remain", people.len());
    Ok(())
}

/// Plays the configured announcement for one person right now.
pub async fn announce(ctx: &CliContext, name: &str) -> Result<(), String> {
    let client = client(ctx).await;
    client
        .announce_special_day(name)
        .await
        .map_err(|e| e.to_string())?;
    println!("announcement for {name} sent");
    Ok(())
}

/// Fire-and-forget, like the library preview stop.
pub async fn stop(ctx: &CliContext) -> Result<(), String> {
    let client = client(ctx).await;
    println!("stop requested");
    if let Err(err) = client.stop_special_day().await {
        warn!(error = %err, "special day stop failed");
    }
    Ok(())
}

async fn current_config(client: &ApiClient) -> Result<SpecialDayConfig, String> {
    let overview = client.special_days().await.map_err(|e| e.to_string())?;
    Ok(overview.config.unwrap_or_default())
}

/// `MM-DD` or `YYYY-MM-DD`; the appliance matches on month and day only.
fn check_person_date(date: &str) -> Result<(), String> {
    let full = match date.len() {
        5 => format!("2000-{date}"),
        10 => date.to_string(),
        _ => return Err(format!("'{date}' is not a MM-DD or YYYY-MM-DD date")),
    };
    chrono::NaiveDate::parse_from_str(&full, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| format!("'{date}' is not a MM-DD or YYYY-MM-DD date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_dates_accept_both_shapes() {
        assert!(check_person_date("04-23").is_ok());
        assert!(check_person_date("1990-04-23").is_ok());
        assert!(check_person_date("02-29").is_ok());
    }

    #[test]
    fn person_dates_reject_garbage() {
        assert!(check_person_date("23/04").is_err());
        assert!(check_person_date("13-40").is_err());
        assert!(check_person_date("april 23").is_err());
    }
}
