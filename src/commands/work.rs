use anyhow::Result;
use bronto_client::BoardStore;
use chrono::{DateTime, NaiveDate};

pub async fn assignments(class_id: &str) -> Result<()> {
    let mut store = BoardStore::new(super::api()?);

    store.load_assignments_for_class(class_id).await?;

    if store.assignments().is_empty() {
        println!("No assignments for this class.");
        return Ok(());
    }

    for assignment in store.assignments() {
        println!("{}  {}  due {}", assignment.id, assignment.name, assignment.due_date);
    }
    Ok(())
}

pub async fn new_work(
    user: &str,
    board_id: &str,
    class_id: &str,
    name: &str,
    due: &str,
) -> Result<()> {
    let due = parse_due(due)?;

    let mut store = BoardStore::new(super::api()?);
    super::select_board(&mut store, user, board_id).await?;

    let assignment = store.add_assignment(class_id, name, &due).await?;

    println!("Added {} ({}) due {}", assignment.name, assignment.id, assignment.due_date);
    Ok(())
}

pub async fn change_due(user: &str, board_id: &str, work_id: &str, due: &str) -> Result<()> {
    let due = parse_due(due)?;

    let mut store = BoardStore::new(super::api()?);
    super::select_board(&mut store, user, board_id).await?;

    store.change_assignment_due_date(work_id, &due).await?;

    println!("Due date moved to {due}");
    Ok(())
}

pub async fn remove(user: &str, board_id: &str, work_id: &str) -> Result<()> {
    let mut store = BoardStore::new(super::api()?);
    super::select_board(&mut store, user, board_id).await?;

    store.delete_assignment(work_id).await?;

    println!("Deleted assignment {work_id}");
    Ok(())
}

pub async fn office_hours(class_id: &str) -> Result<()> {
    let mut store = BoardStore::new(super::api()?);

    store.load_office_hours_for_class(class_id).await?;

    if store.office_hours().is_empty() {
        println!("No office hours for this class.");
        return Ok(());
    }

    for oh in store.office_hours() {
        println!("{}  {}  {} min", oh.id, oh.start_time, oh.duration);
    }
    Ok(())
}

pub async fn new_office_hours(
    user: &str,
    board_id: &str,
    class_id: &str,
    start: &str,
    duration: i64,
) -> Result<()> {
    let start = parse_start(start)?;

    let mut store = BoardStore::new(super::api()?);
    super::select_board(&mut store, user, board_id).await?;

    let oh = store.add_office_hours(class_id, &start, duration).await?;

    println!("Added office hours {} at {} for {} min", oh.id, oh.start_time, oh.duration);
    Ok(())
}

pub async fn change_office_hours(
    user: &str,
    board_id: &str,
    oh_id: &str,
    start: &str,
    duration: i64,
) -> Result<()> {
    let start = parse_start(start)?;

    let mut store = BoardStore::new(super::api()?);
    super::select_board(&mut store, user, board_id).await?;

    store.change_office_hours(oh_id, &start, duration).await?;

    println!("Office hours moved to {start} ({duration} min)");
    Ok(())
}

/// Accept a full RFC 3339 timestamp or a bare date; a bare date means end
/// of that day. The API always gets RFC 3339.
fn parse_due(input: &str) -> Result<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.to_rfc3339());
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(format!("{}T23:59:00Z", date.format("%Y-%m-%d")));
    }

    anyhow::bail!("Invalid due date '{input}'. Use YYYY-MM-DD or RFC 3339.")
}

/// Office hours need a time of day, so only full timestamps are accepted.
fn parse_start(input: &str) -> Result<String> {
    match DateTime::parse_from_rfc3339(input) {
        Ok(dt) => Ok(dt.to_rfc3339()),
        Err(_) => anyhow::bail!(
            "Invalid start time '{input}'. Use RFC 3339, e.g. 2025-10-01T15:00:00Z."
        ),
    }
}
