//! Domain entities, as the remote system represents them.
//!
//! All identifiers are opaque strings assigned by the server. Dates travel
//! as ISO 8601 strings; the client treats them as opaque and lets the
//! server validate.

use serde::{Deserialize, Serialize};

/// The authenticated user. Held only in memory by the auth store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

/// Root aggregate owning classes for one user/calendar pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    pub calendar: String,
}

/// A course container holding assignments and office hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "brontoBoardId")]
    pub board_id: String,
    pub name: String,
    pub overview: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "classId")]
    pub class_id: String,
    pub name: String,
    /// ISO 8601
    #[serde(rename = "dueDate")]
    pub due_date: String,
}

/// A scheduled availability slot tied to a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeHours {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "classId")]
    pub class_id: String,
    /// ISO 8601
    #[serde(rename = "startTime")]
    pub start_time: String,
    /// Minutes
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
}

/// Day aggregate on a calendar: which assignments and office hours fall on
/// a given date. Read-only from the client's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "calendarId")]
    pub calendar_id: String,
    /// ISO 8601 date
    pub date: String,
    /// Assignment ids due on this day
    pub assignments: Vec<String>,
    /// Office-hours ids held on this day
    #[serde(rename = "officeHours")]
    pub office_hours: Vec<String>,
}
