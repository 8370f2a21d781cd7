use anyhow::{Context, Result};
use bronto_client::CalendarStore;
use chrono::NaiveDate;

/// Print everything scheduled on one day of the user's calendar.
pub async fn run(user: &str, date: &str) -> Result<()> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .context("Invalid date, use YYYY-MM-DD")?
        .format("%Y-%m-%d")
        .to_string();

    let mut store = CalendarStore::new(super::api()?);

    store.load_calendar_for_user(user).await?;

    let Some(calendar_id) = store.calendars().first().map(|c| c.id.clone()) else {
        println!("No calendar found for user {user}.");
        return Ok(());
    };

    store.load_assignments_on_day(&calendar_id, &date).await?;
    store.load_office_hours_on_day(&calendar_id, &date).await?;

    if store.day_assignments().is_empty() && store.day_office_hours().is_empty() {
        println!("Nothing scheduled on {date}.");
        return Ok(());
    }

    if !store.day_assignments().is_empty() {
        println!("Due on {date}:");
        for assignment in store.day_assignments() {
            println!("  {}  ({})", assignment.name, assignment.due_date);
        }
    }

    if !store.day_office_hours().is_empty() {
        println!("Office hours on {date}:");
        for oh in store.day_office_hours() {
            println!("  {}  {} min", oh.start_time, oh.duration);
        }
    }

    Ok(())
}
