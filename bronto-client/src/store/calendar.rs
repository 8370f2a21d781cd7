//! Calendar view state: the user's calendars and the per-day aggregates.
//!
//! Read-mostly. The calendar lookup goes through the transport's
//! normalization, so all of the remote's response shapes land here as a
//! plain list.

use crate::client::ApiClient;
use crate::error::{BrontoError, BrontoResult};
use crate::model::{Assignment, Calendar, OfficeHours};

pub struct CalendarStore {
    api: ApiClient,
    calendars: Vec<Calendar>,
    day_assignments: Vec<Assignment>,
    day_office_hours: Vec<OfficeHours>,
    is_loading: bool,
    error: Option<String>,
}

impl CalendarStore {
    pub fn new(api: ApiClient) -> Self {
        CalendarStore {
            api,
            calendars: Vec::new(),
            day_assignments: Vec::new(),
            day_office_hours: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    pub fn day_assignments(&self) -> &[Assignment] {
        &self.day_assignments
    }

    pub fn day_office_hours(&self) -> &[OfficeHours] {
        &self.day_office_hours
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset(&mut self) {
        self.calendars.clear();
        self.day_assignments.clear();
        self.day_office_hours.clear();
        self.is_loading = false;
        self.error = None;
    }

    fn begin(&mut self) {
        self.error = None;
        self.is_loading = true;
    }

    fn fail(&mut self, e: &BrontoError, fallback: &str) {
        self.error = Some(e.display_message(fallback));
    }

    /// Create a calendar for the user and cache it.
    pub async fn create_calendar(&mut self, user_id: &str) -> BrontoResult<Calendar> {
        self.begin();
        let result = self.api.create_calendar(user_id).await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                let calendar = Calendar {
                    id: response.calendar_id,
                    owner: user_id.to_string(),
                };
                self.calendars.push(calendar.clone());
                Ok(calendar)
            }
            Err(e) => {
                self.fail(&e, "Failed to create calendar");
                Err(e)
            }
        }
    }

    /// Replace the cached calendars with the (normalized) lookup result.
    /// An empty result is not an error; the user simply has no calendar yet.
    pub async fn load_calendar_for_user(&mut self, user_id: &str) -> BrontoResult<&[Calendar]> {
        self.begin();
        let result = self.api.get_calendar_for_user(user_id).await;
        self.is_loading = false;

        match result {
            Ok(calendars) => {
                self.calendars = calendars;
                Ok(&self.calendars)
            }
            Err(e) => {
                self.fail(&e, "Failed to load calendar");
                Err(e)
            }
        }
    }

    /// Replace the cached day view with the assignments due on `date`.
    pub async fn load_assignments_on_day(
        &mut self,
        calendar_id: &str,
        date: &str,
    ) -> BrontoResult<&[Assignment]> {
        self.begin();
        let result = self.api.get_assignments_on_day(calendar_id, date).await;
        self.is_loading = false;

        match result {
            Ok(assignments) => {
                self.day_assignments = assignments;
                Ok(&self.day_assignments)
            }
            Err(e) => {
                self.fail(&e, "Failed to load assignments for day");
                Err(e)
            }
        }
    }

    /// Replace the cached day view with the office hours held on `date`.
    pub async fn load_office_hours_on_day(
        &mut self,
        calendar_id: &str,
        date: &str,
    ) -> BrontoResult<&[OfficeHours]> {
        self.begin();
        let result = self.api.get_office_hours_on_day(calendar_id, date).await;
        self.is_loading = false;

        match result {
            Ok(office_hours) => {
                self.day_office_hours = office_hours;
                Ok(&self.day_office_hours)
            }
            Err(e) => {
                self.fail(&e, "Failed to load office hours for day");
                Err(e)
            }
        }
    }

    /// Delete an assignment through the calendar service and drop it from
    /// the cached day view.
    pub async fn delete_assignment(&mut self, assignment_id: &str) -> BrontoResult<()> {
        self.begin();
        let result = self.api.delete_assignment(assignment_id).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                self.day_assignments.retain(|a| a.id != assignment_id);
                Ok(())
            }
            Err(e) => {
                self.fail(&e, "Failed to delete assignment");
                Err(e)
            }
        }
    }

    /// Delete an office-hours slot through the calendar service and drop
    /// it from the cached day view.
    pub async fn delete_office_hours(&mut self, office_hours_id: &str) -> BrontoResult<()> {
        self.begin();
        let result = self.api.delete_office_hours(office_hours_id).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                self.day_office_hours.retain(|oh| oh.id != office_hours_id);
                Ok(())
            }
            Err(e) => {
                self.fail(&e, "Failed to delete office hours");
                Err(e)
            }
        }
    }
}
