//! Public holiday commands.
//!
//! A "skipped" holiday is one the appliance stays silent on: the day's
//! schedule does not run. Holidays not in the skipped list ring normally.

use carillon_types::{Holiday, HolidayUpdate};

use crate::commands::client;
use crate::context::CliContext;

pub async fn list(ctx: &CliContext) -> Result<(), String> {
    let client = client(ctx).await;
    let overview = client.holidays().await.map_err(|e| e.to_string())?;

    match overview.holiday_country.as_deref() {
        Some(country) => println!("holiday country: {country}"),
        None => println!("holiday country: not configured"),
    }
    if overview.upcoming_holidays.is_empty() {
        println!("no holidays reported for this year");
        return Ok(());
    }

    println!();
    println!("{:<12} {:<36} STATUS", "DATE", "NAME");
    println!("{}", "-".repeat(60));
    for holiday in &overview.upcoming_holidays {
        println!("{:<12} {:<36} {}", holiday.date, holiday.name, marker(holiday));
    }
    if overview.upcoming_holidays.iter().any(|h| h.is_skipped) {
        println!("\nsilent: the schedule does not run on that date");
    }
    Ok(())
}

pub async fn skip(ctx: &CliContext, date: &str) -> Result<(), String> {
    update_skipped(ctx, date, true).await
}

pub async fn unskip(ctx: &CliContext, date: &str) -> Result<(), String> {
    update_skipped(ctx, date, false).await
}

pub async fn country(ctx: &CliContext, code: &str) -> Result<(), String> {
    let code = code.trim().to_uppercase();
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(format!("'{code}' is not a two-letter country code"));
    }

    let client = client(ctx).await;
    let overview = client.holidays().await.map_err(|e| e.to_string())?;
    let update = HolidayUpdate {
        skipped_holidays: overview.skipped_holidays,
        country: Some(code.clone()),
    };
    client
        .update_holidays(&update)
        .await
        .map_err(|e| e.to_string())?;
    println!("holiday country set to {code}");
    Ok(())
}

/// Read-mutate-write of the skipped list; the country is left untouched by
/// sending `country: null`.
async fn update_skipped(ctx: &CliContext, date: &str, skip: bool) -> Result<(), String> {
    check_date(date)?;
    let client = client(ctx).await;
    let overview = client.holidays().await.map_err(|e| e.to_string())?;

    let mut skipped = overview.skipped_holidays;
    let already = skipped.iter().any(|d| d == date);
    match (skip, already) {
        (true, true) => {
            println!("{date} is already marked silent");
            return Ok(());
        }
        (false, false) => {
            println!("{date} is not marked silent");
            return Ok(());
        }
        (true, false) => skipped.push(date.to_string()),
        (false, true) => skipped.retain(|d| d != date),
    }

    let update = HolidayUpdate {
        skipped_holidays: skipped,
        country: None,
    };
    client
        .update_holidays(&update)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "{date} will {}",
        if skip { "stay silent" } else { "ring normally" }
    );
    Ok(())
}

fn check_date(date: &str) -> Result<(), String> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| format!("'{date}' is not a YYYY-MM-DD date"))
}

fn marker(holiday: &Holiday) -> &'static str {
    if holiday.is_today {
        if holiday.is_skipped { "today, silent" } else { "today" }
    } else if holiday.is_skipped {
        "silent"
    } else if holiday.is_past {
        "past"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_must_be_iso() {
        assert!(check_date("2026-01-01").is_ok());
        assert!(check_date("01/01/2026").is_err());
        assert!(check_date("2026-13-40").is_err());
    }

    #[test]
    fn markers_reflect_holiday_state() {
        let mut holiday = Holiday {
            date: "2026-04-23".to_string(),
            name: "National Day".to_string(),
            is_past: false,
            is_today: false,
            is_skipped: false,
        };
        assert_eq!(marker(&holiday), "");

        holiday.is_skipped = true;
        assert_eq!(marker(&holiday), "silent");

        holiday.is_today = true;
        assert_eq!(marker(&holiday), "today, silent");
    }
}
