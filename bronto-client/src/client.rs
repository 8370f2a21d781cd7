//! HTTP transport to the BrontoBoard API.
//!
//! Every endpoint is a POST with a JSON body. When the durable slot holds
//! a session token, it is merged into the body of every outgoing call,
//! mirroring the server's session handling. Non-2xx responses become
//! `BrontoError::Api`, carrying the server's `{error}` payload when one is
//! present.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{BrontoError, BrontoResult};
use crate::model::{Assignment, Board, Calendar, Class, OfficeHours};
use crate::protocol::{
    AddOfficeHoursResponse, AddWorkResponse, AuthResponse, CalendarLookup, CreateAssignmentResponse,
    CreateCalendarResponse, CreateClassResponse, CreateOfficeHoursResponse, CreateSessionResponse,
    ErrorResponse, InitializeBoardResponse, SessionUser,
};
use crate::session::SessionStore;

/// Env var overriding the API base URL.
pub const API_BASE_ENV: &str = "BRONTO_API_BASE";

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

/// HTTP client for the BrontoBoard API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Base URL from `BRONTO_API_BASE`, falling back to the default.
    pub fn from_env(session: SessionStore) -> Self {
        let base =
            std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base, session)
    }

    /// The durable token slot this client injects from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Send a POST and return the raw JSON body (null for empty bodies).
    ///
    /// The token slot is re-read on every call; when it holds a token, a
    /// `session` field is merged into the body.
    async fn send(&self, path: &str, mut body: Value) -> BrontoResult<Value> {
        if let Some(token) = self.session.load() {
            if let Value::Object(ref mut fields) = body {
                fields.insert("session".to_string(), Value::String(token));
            }
        }

        tracing::debug!("POST {path}");

        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .map_err(|e| BrontoError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BrontoError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or_else(|_| text.clone());
            tracing::error!("POST {path} failed ({status}): {message}");
            return Err(BrontoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| BrontoError::Serialization(e.to_string()))
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> BrontoResult<T> {
        let value = self.send(path, body).await?;
        serde_json::from_value(value).map_err(|e| BrontoError::Serialization(e.to_string()))
    }

    // BrontoBoard service

    pub async fn initialize_board(
        &self,
        user: &str,
        calendar: &str,
    ) -> BrontoResult<InitializeBoardResponse> {
        self.post(
            "/BrontoBoard/initializeBB",
            json!({ "user": user, "calendar": calendar }),
        )
        .await
    }

    pub async fn create_class(
        &self,
        owner: &str,
        board: &str,
        class_name: &str,
        overview: &str,
    ) -> BrontoResult<CreateClassResponse> {
        self.post(
            "/BrontoBoard/createClass",
            json!({
                "owner": owner,
                "brontoBoard": board,
                "className": class_name,
                "overview": overview,
            }),
        )
        .await
    }

    pub async fn add_work(
        &self,
        owner: &str,
        class: &str,
        work_name: &str,
        due_date: &str,
    ) -> BrontoResult<AddWorkResponse> {
        self.post(
            "/BrontoBoard/addWork",
            json!({
                "owner": owner,
                "class": class,
                "workName": work_name,
                "dueDate": due_date,
            }),
        )
        .await
    }

    pub async fn change_work(&self, owner: &str, work: &str, due_date: &str) -> BrontoResult<()> {
        self.send(
            "/BrontoBoard/changeWork",
            json!({ "owner": owner, "work": work, "dueDate": due_date }),
        )
        .await?;
        Ok(())
    }

    pub async fn remove_work(&self, owner: &str, work: &str) -> BrontoResult<()> {
        self.send(
            "/BrontoBoard/removeWork",
            json!({ "owner": owner, "work": work }),
        )
        .await?;
        Ok(())
    }

    pub async fn add_office_hours(
        &self,
        owner: &str,
        class: &str,
        start_time: &str,
        duration: i64,
    ) -> BrontoResult<AddOfficeHoursResponse> {
        self.post(
            "/BrontoBoard/addOH",
            json!({
                "owner": owner,
                "class": class,
                "OHTime": start_time,
                "OHduration": duration,
            }),
        )
        .await
    }

    pub async fn change_office_hours(
        &self,
        owner: &str,
        oh: &str,
        new_date: &str,
        new_duration: i64,
    ) -> BrontoResult<()> {
        self.send(
            "/BrontoBoard/changeOH",
            json!({
                "owner": owner,
                "oh": oh,
                "newDate": new_date,
                "newduration": new_duration,
            }),
        )
        .await?;
        Ok(())
    }

    pub async fn get_assignments_for_class(&self, class: &str) -> BrontoResult<Vec<Assignment>> {
        self.post(
            "/BrontoBoard/getAssignmentsForClass",
            json!({ "class": class }),
        )
        .await
    }

    pub async fn get_office_hours_for_class(&self, class: &str) -> BrontoResult<Vec<OfficeHours>> {
        self.post(
            "/BrontoBoard/getOfficeHoursForClass",
            json!({ "class": class }),
        )
        .await
    }

    pub async fn get_classes_for_board(&self, board: &str) -> BrontoResult<Vec<Class>> {
        self.post(
            "/BrontoBoard/getClassesForBrontoBoard",
            json!({ "brontoBoard": board }),
        )
        .await
    }

    pub async fn get_boards_for_user(&self, user: &str) -> BrontoResult<Vec<Board>> {
        self.post("/BrontoBoard/getBrontoBoardsForUser", json!({ "user": user }))
            .await
    }

    // BrontoCalendar service

    pub async fn create_calendar(&self, user: &str) -> BrontoResult<CreateCalendarResponse> {
        self.post("/BrontoCalendar/createCalendar", json!({ "user": user }))
            .await
    }

    /// Calendar lookup. The remote is inconsistent here: "found" is a bare
    /// object, "not found" an array, null, or a 404. All shapes collapse
    /// to a plain list; the 404 maps to an empty one. No other endpoint
    /// gets this leniency.
    pub async fn get_calendar_for_user(&self, user: &str) -> BrontoResult<Vec<Calendar>> {
        let result = self
            .send("/BrontoCalendar/_getCalendarForUser", json!({ "user": user }))
            .await;

        match result {
            Ok(value) => Ok(CalendarLookup::from_value(&value).into_vec()),
            Err(BrontoError::Api { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    pub async fn create_assignment(
        &self,
        class_id: &str,
        name: &str,
        due_date: &str,
    ) -> BrontoResult<CreateAssignmentResponse> {
        self.post(
            "/BrontoCalendar/createAssignment",
            json!({ "classId": class_id, "name": name, "dueDate": due_date }),
        )
        .await
    }

    pub async fn assign_work(&self, owner: &str, assignment_id: &str) -> BrontoResult<()> {
        self.send(
            "/BrontoCalendar/assignWork",
            json!({ "owner": owner, "assignmentId": assignment_id }),
        )
        .await?;
        Ok(())
    }

    pub async fn remove_work_from_calendar(
        &self,
        owner: &str,
        assignment_id: &str,
    ) -> BrontoResult<()> {
        self.send(
            "/BrontoCalendar/removeWork",
            json!({ "owner": owner, "assignmentId": assignment_id }),
        )
        .await?;
        Ok(())
    }

    pub async fn update_assignment_due_date(
        &self,
        owner: &str,
        assignment_id: &str,
        new_due_date: &str,
    ) -> BrontoResult<()> {
        self.send(
            "/BrontoCalendar/updateAssignmentDueDate",
            json!({
                "owner": owner,
                "assignmentId": assignment_id,
                "newDueDate": new_due_date,
            }),
        )
        .await?;
        Ok(())
    }

    pub async fn delete_assignment(&self, assignment_id: &str) -> BrontoResult<()> {
        self.send(
            "/BrontoCalendar/deleteAssignment",
            json!({ "assignmentId": assignment_id }),
        )
        .await?;
        Ok(())
    }

    pub async fn create_office_hours(
        &self,
        class_id: &str,
        start_time: &str,
        duration: i64,
    ) -> BrontoResult<CreateOfficeHoursResponse> {
        self.post(
            "/BrontoCalendar/createOfficeHours",
            json!({ "classId": class_id, "startTime": start_time, "duration": duration }),
        )
        .await
    }

    pub async fn assign_office_hours(
        &self,
        owner: &str,
        office_hours_id: &str,
    ) -> BrontoResult<()> {
        self.send(
            "/BrontoCalendar/assignOH",
            json!({ "owner": owner, "officeHoursId": office_hours_id }),
        )
        .await?;
        Ok(())
    }

    pub async fn change_calendar_office_hours(
        &self,
        owner: &str,
        office_hours_id: &str,
        new_date: &str,
        new_duration: i64,
    ) -> BrontoResult<()> {
        self.send(
            "/BrontoCalendar/changeOH",
            json!({
                "owner": owner,
                "officeHoursId": office_hours_id,
                "newDate": new_date,
                "newDuration": new_duration,
            }),
        )
        .await?;
        Ok(())
    }

    pub async fn delete_office_hours(&self, office_hours_id: &str) -> BrontoResult<()> {
        self.send(
            "/BrontoCalendar/deleteOfficeHours",
            json!({ "officeHoursId": office_hours_id }),
        )
        .await?;
        Ok(())
    }

    pub async fn get_assignments_on_day(
        &self,
        calendar_id: &str,
        date: &str,
    ) -> BrontoResult<Vec<Assignment>> {
        self.post(
            "/BrontoCalendar/_getAssignmentsOnDay",
            json!({ "calendarId": calendar_id, "date": date }),
        )
        .await
    }

    pub async fn get_office_hours_on_day(
        &self,
        calendar_id: &str,
        date: &str,
    ) -> BrontoResult<Vec<OfficeHours>> {
        self.post(
            "/BrontoCalendar/_getOfficeHoursOnDay",
            json!({ "calendarId": calendar_id, "date": date }),
        )
        .await
    }

    pub async fn get_assignment(&self, assignment_id: &str) -> BrontoResult<Vec<Assignment>> {
        self.post(
            "/BrontoCalendar/_getAssignment",
            json!({ "assignmentId": assignment_id }),
        )
        .await
    }

    pub async fn get_office_hours(&self, office_hours_id: &str) -> BrontoResult<Vec<OfficeHours>> {
        self.post(
            "/BrontoCalendar/_getOfficeHours",
            json!({ "officeHoursId": office_hours_id }),
        )
        .await
    }

    // UserAuthentication service

    pub async fn register(&self, username: &str, password: &str) -> BrontoResult<AuthResponse> {
        self.post(
            "/UserAuthentication/register",
            json!({ "username": username, "password": password }),
        )
        .await
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> BrontoResult<AuthResponse> {
        self.post(
            "/UserAuthentication/authenticate",
            json!({ "username": username, "password": password }),
        )
        .await
    }

    // Sessioning service

    pub async fn create_session(&self, user: &str) -> BrontoResult<CreateSessionResponse> {
        self.post("/Sessioning/create", json!({ "user": user })).await
    }

    pub async fn delete_session(&self, session: &str) -> BrontoResult<()> {
        self.send("/Sessioning/delete", json!({ "session": session }))
            .await?;
        Ok(())
    }

    pub async fn get_user_for_session(&self, session: &str) -> BrontoResult<Vec<SessionUser>> {
        self.post("/Sessioning/_getUser", json!({ "session": session }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{
        matchers::{eq, json_decoded, request},
        responders::{json_encoded, status_code},
        Expectation, Server,
    };
    use serde_json::json;

    fn client_for(server: &Server) -> (ApiClient, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::at(dir.path());
        let client = ApiClient::new(server.url_str("/api"), session);
        (client, dir)
    }

    #[tokio::test]
    async fn test_session_token_is_merged_into_post_bodies() {
        let server = Server::run();
        let (client, _dir) = client_for(&server);
        client.session().save("tok-1").unwrap();

        server.expect(
            Expectation::matching(request::body(json_decoded(eq(json!({
                "user": "u1",
                "calendar": "c1",
                "session": "tok-1",
            })))))
            .respond_with(json_encoded(json!({ "brontoBoard": "b1" }))),
        );

        let response = client.initialize_board("u1", "c1").await.unwrap();
        assert_eq!(response.board, "b1");
    }

    #[tokio::test]
    async fn test_no_token_means_no_session_field() {
        let server = Server::run();
        let (client, _dir) = client_for(&server);

        server.expect(
            Expectation::matching(request::body(json_decoded(eq(json!({
                "class": "cls-1",
            })))))
            .respond_with(json_encoded(json!([]))),
        );

        let assignments = client.get_assignments_for_class("cls-1").await.unwrap();
        assert!(assignments.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_payload_is_surfaced() {
        let server = Server::run();
        let (client, _dir) = client_for(&server);

        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/api/UserAuthentication/authenticate",
            ))
            .respond_with(
                status_code(401).body(r#"{"error":"Invalid credentials"}"#),
            ),
        );

        let err = client.authenticate("amy", "wrong").await.unwrap_err();
        match err {
            BrontoError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_body_maps_to_unit() {
        let server = Server::run();
        let (client, _dir) = client_for(&server);

        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/api/BrontoCalendar/deleteOfficeHours",
            ))
            .respond_with(status_code(200)),
        );

        client.delete_office_hours("oh-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_calendar_lookup_single_object_is_wrapped() {
        let server = Server::run();
        let (client, _dir) = client_for(&server);

        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/api/BrontoCalendar/_getCalendarForUser",
            ))
            .respond_with(json_encoded(json!({ "_id": "cal-1", "owner": "u1" }))),
        );

        let calendars = client.get_calendar_for_user("u1").await.unwrap();
        assert_eq!(calendars.len(), 1);
        assert_eq!(calendars[0].id, "cal-1");
    }

    #[tokio::test]
    async fn test_calendar_lookup_404_is_lenient() {
        let server = Server::run();
        let (client, _dir) = client_for(&server);

        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/api/BrontoCalendar/_getCalendarForUser",
            ))
            .respond_with(status_code(404)),
        );

        let calendars = client.get_calendar_for_user("u1").await.unwrap();
        assert!(calendars.is_empty());
    }

    #[tokio::test]
    async fn test_calendar_assignment_flow() {
        let server = Server::run();
        let (client, _dir) = client_for(&server);

        server.expect(
            Expectation::matching(request::body(json_decoded(eq(json!({
                "classId": "cls-1",
                "name": "PSet 1",
                "dueDate": "2025-10-01T23:59:00Z",
            })))))
            .respond_with(json_encoded(json!({ "assignmentId": "a1" }))),
        );
        server.expect(
            Expectation::matching(request::body(json_decoded(eq(json!({
                "owner": "u1",
                "assignmentId": "a1",
            })))))
            .respond_with(status_code(200)),
        );

        let created = client
            .create_assignment("cls-1", "PSet 1", "2025-10-01T23:59:00Z")
            .await
            .unwrap();
        assert_eq!(created.assignment_id, "a1");

        client.assign_work("u1", "a1").await.unwrap();
    }

    #[tokio::test]
    async fn test_session_user_lookup() {
        let server = Server::run();
        let (client, _dir) = client_for(&server);

        server.expect(
            Expectation::matching(request::method_path("POST", "/api/Sessioning/_getUser"))
                .respond_with(json_encoded(json!([{ "user": "u1" }]))),
        );

        let users = client.get_user_for_session("tok-1").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user, "u1");
    }

    #[tokio::test]
    async fn test_404_elsewhere_is_an_error() {
        let server = Server::run();
        let (client, _dir) = client_for(&server);

        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/api/BrontoBoard/getBrontoBoardsForUser",
            ))
            .respond_with(status_code(404)),
        );

        let err = client.get_boards_for_user("u1").await.unwrap_err();
        assert!(matches!(err, BrontoError::Api { status: 404, .. }));
    }
}
