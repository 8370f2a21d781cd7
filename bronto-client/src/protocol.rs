//! Wire types for the BrontoBoard HTTP surface.
//!
//! Response field names follow the remote contract exactly (`brontoBoard`,
//! `calendarId`, ...); serde renames keep the Rust side readable. Request
//! bodies are composed inline by the client, so only responses live here.

use serde::Deserialize;
use serde_json::Value;

use crate::model::Calendar;

// BrontoBoard service

#[derive(Debug, Deserialize)]
pub struct InitializeBoardResponse {
    #[serde(rename = "brontoBoard")]
    pub board: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateClassResponse {
    pub class: String,
}

#[derive(Debug, Deserialize)]
pub struct AddWorkResponse {
    pub assignment: String,
}

#[derive(Debug, Deserialize)]
pub struct AddOfficeHoursResponse {
    #[serde(rename = "officeHours")]
    pub office_hours: String,
}

// BrontoCalendar service

#[derive(Debug, Deserialize)]
pub struct CreateCalendarResponse {
    #[serde(rename = "calendarId")]
    pub calendar_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAssignmentResponse {
    #[serde(rename = "assignmentId")]
    pub assignment_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateOfficeHoursResponse {
    #[serde(rename = "officeHoursId")]
    pub office_hours_id: String,
}

// UserAuthentication service (register and authenticate share this shape)

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    /// Id of the registered/authenticated user
    pub user: String,
}

// Sessioning service

#[derive(Debug, Deserialize)]
pub struct CreateSessionResponse {
    pub session: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionUser {
    pub user: String,
}

/// Error payload the server attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The calendar-lookup endpoint is inconsistent: "found" comes back as a
/// bare object, "not found" as an array, null, or a 404. The three shapes
/// are modelled explicitly and collapsed to one sequence at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarLookup {
    Empty,
    Single(Calendar),
    Many(Vec<Calendar>),
}

impl CalendarLookup {
    /// Classify a raw response body. A bare object is detected by its
    /// `_id` field; absent/null and unrecognized shapes map to `Empty`.
    pub fn from_value(value: &Value) -> Self {
        if value.is_null() {
            return CalendarLookup::Empty;
        }

        if value.is_array() {
            match serde_json::from_value(value.clone()) {
                Ok(calendars) => return CalendarLookup::Many(calendars),
                Err(e) => {
                    tracing::warn!("calendar lookup: unreadable array response: {e}");
                    return CalendarLookup::Empty;
                }
            }
        }

        if value.get("_id").is_some() {
            if let Ok(calendar) = serde_json::from_value(value.clone()) {
                return CalendarLookup::Single(calendar);
            }
        }

        tracing::warn!("calendar lookup: unexpected response shape: {value}");
        CalendarLookup::Empty
    }

    /// Collapse to the sequence the stores consume.
    pub fn into_vec(self) -> Vec<Calendar> {
        match self {
            CalendarLookup::Empty => Vec::new(),
            CalendarLookup::Single(calendar) => vec![calendar],
            CalendarLookup::Many(calendars) => calendars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_null_is_empty() {
        let lookup = CalendarLookup::from_value(&Value::Null);
        assert_eq!(lookup, CalendarLookup::Empty);
        assert!(lookup.into_vec().is_empty());
    }

    #[test]
    fn test_lookup_bare_object_becomes_singleton() {
        let value = json!({ "_id": "cal-1", "owner": "user-1" });
        let lookup = CalendarLookup::from_value(&value);

        assert_eq!(
            lookup.into_vec(),
            vec![Calendar {
                id: "cal-1".to_string(),
                owner: "user-1".to_string(),
            }]
        );
    }

    #[test]
    fn test_lookup_array_passes_through() {
        let value = json!([{ "_id": "cal-1", "owner": "user-1" }]);
        let lookup = CalendarLookup::from_value(&value);

        assert_eq!(
            lookup,
            CalendarLookup::Many(vec![Calendar {
                id: "cal-1".to_string(),
                owner: "user-1".to_string(),
            }])
        );
    }

    #[test]
    fn test_lookup_empty_array_stays_empty() {
        let lookup = CalendarLookup::from_value(&json!([]));
        assert!(lookup.into_vec().is_empty());
    }

    #[test]
    fn test_lookup_unrecognized_object_is_empty() {
        let value = json!({ "something": "else" });
        assert_eq!(CalendarLookup::from_value(&value), CalendarLookup::Empty);
    }
}
