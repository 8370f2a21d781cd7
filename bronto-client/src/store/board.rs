//! The board aggregate: boards, classes, assignments and office hours for
//! the currently selected board.
//!
//! Child-entity mutations require a current board (the server attributes
//! them to its owner) and fail locally with `NoBoardSelected` before any
//! network call otherwise. Creates merge optimistically: the server is
//! asked only for the new id, the remaining fields are the locally-known
//! ones.

use crate::client::ApiClient;
use crate::error::{BrontoError, BrontoResult};
use crate::model::{Assignment, Board, Class, OfficeHours};

pub struct BoardStore {
    api: ApiClient,
    boards: Vec<Board>,
    current: Option<Board>,
    classes: Vec<Class>,
    assignments: Vec<Assignment>,
    office_hours: Vec<OfficeHours>,
    is_loading: bool,
    error: Option<String>,
}

impl BoardStore {
    pub fn new(api: ApiClient) -> Self {
        BoardStore {
            api,
            boards: Vec::new(),
            current: None,
            classes: Vec::new(),
            assignments: Vec::new(),
            office_hours: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn current_board(&self) -> Option<&Board> {
        self.current.as_ref()
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn office_hours(&self) -> &[OfficeHours] {
        &self.office_hours
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_current_board(&mut self, board: Board) {
        self.current = Some(board);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop all cached state. Used when switching board context entirely.
    pub fn reset(&mut self) {
        self.boards.clear();
        self.current = None;
        self.classes.clear();
        self.assignments.clear();
        self.office_hours.clear();
        self.is_loading = false;
        self.error = None;
    }

    fn require_board(&self) -> BrontoResult<Board> {
        self.current.clone().ok_or(BrontoError::NoBoardSelected)
    }

    fn begin(&mut self) {
        self.error = None;
        self.is_loading = true;
    }

    fn fail(&mut self, e: &BrontoError, fallback: &str) {
        self.error = Some(e.display_message(fallback));
    }

    /// Create a board remotely, cache it and make it current.
    pub async fn initialize_board(
        &mut self,
        user_id: &str,
        calendar_id: &str,
    ) -> BrontoResult<Board> {
        self.begin();
        let result = self.api.initialize_board(user_id, calendar_id).await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                let board = Board {
                    id: response.board,
                    owner: user_id.to_string(),
                    calendar: calendar_id.to_string(),
                };
                self.boards.push(board.clone());
                self.current = Some(board.clone());
                Ok(board)
            }
            Err(e) => {
                self.fail(&e, "Failed to initialize board");
                Err(e)
            }
        }
    }

    pub async fn create_class(&mut self, name: &str, overview: &str) -> BrontoResult<Class> {
        let board = self.require_board()?;
        self.begin();
        let result = self
            .api
            .create_class(&board.owner, &board.id, name, overview)
            .await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                let class = Class {
                    id: response.class,
                    board_id: board.id,
                    name: name.to_string(),
                    overview: overview.to_string(),
                };
                self.classes.push(class.clone());
                Ok(class)
            }
            Err(e) => {
                self.fail(&e, "Failed to create class");
                Err(e)
            }
        }
    }

    pub async fn add_assignment(
        &mut self,
        class_id: &str,
        name: &str,
        due_date: &str,
    ) -> BrontoResult<Assignment> {
        let board = self.require_board()?;
        self.begin();
        let result = self.api.add_work(&board.owner, class_id, name, due_date).await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                let assignment = Assignment {
                    id: response.assignment,
                    class_id: class_id.to_string(),
                    name: name.to_string(),
                    due_date: due_date.to_string(),
                };
                self.assignments.push(assignment.clone());
                Ok(assignment)
            }
            Err(e) => {
                self.fail(&e, "Failed to add assignment");
                Err(e)
            }
        }
    }

    pub async fn add_office_hours(
        &mut self,
        class_id: &str,
        start_time: &str,
        duration: i64,
    ) -> BrontoResult<OfficeHours> {
        let board = self.require_board()?;
        self.begin();
        let result = self
            .api
            .add_office_hours(&board.owner, class_id, start_time, duration)
            .await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                let office_hours = OfficeHours {
                    id: response.office_hours,
                    class_id: class_id.to_string(),
                    start_time: start_time.to_string(),
                    duration,
                };
                self.office_hours.push(office_hours.clone());
                Ok(office_hours)
            }
            Err(e) => {
                self.fail(&e, "Failed to add office hours");
                Err(e)
            }
        }
    }

    /// Move an assignment's due date; the cached copy is updated in place.
    pub async fn change_assignment_due_date(
        &mut self,
        assignment_id: &str,
        due_date: &str,
    ) -> BrontoResult<()> {
        let board = self.require_board()?;
        self.begin();
        let result = self.api.change_work(&board.owner, assignment_id, due_date).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                if let Some(a) = self.assignments.iter_mut().find(|a| a.id == assignment_id) {
                    a.due_date = due_date.to_string();
                }
                Ok(())
            }
            Err(e) => {
                self.fail(&e, "Failed to change due date");
                Err(e)
            }
        }
    }

    /// Reschedule an office-hours slot; the cached copy is updated in place.
    pub async fn change_office_hours(
        &mut self,
        office_hours_id: &str,
        start_time: &str,
        duration: i64,
    ) -> BrontoResult<()> {
        let board = self.require_board()?;
        self.begin();
        let result = self
            .api
            .change_office_hours(&board.owner, office_hours_id, start_time, duration)
            .await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                if let Some(oh) = self.office_hours.iter_mut().find(|oh| oh.id == office_hours_id)
                {
                    oh.start_time = start_time.to_string();
                    oh.duration = duration;
                }
                Ok(())
            }
            Err(e) => {
                self.fail(&e, "Failed to change office hours");
                Err(e)
            }
        }
    }

    /// Delete an assignment and drop it from the cache by id. Any
    /// calendar-day aggregates are the server's business.
    pub async fn delete_assignment(&mut self, assignment_id: &str) -> BrontoResult<()> {
        let board = self.require_board()?;
        self.begin();
        let result = self.api.remove_work(&board.owner, assignment_id).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                self.assignments.retain(|a| a.id != assignment_id);
                Ok(())
            }
            Err(e) => {
                self.fail(&e, "Failed to delete assignment");
                Err(e)
            }
        }
    }

    /// Replace the cached boards with the server's snapshot.
    pub async fn load_boards_for_user(&mut self, user_id: &str) -> BrontoResult<&[Board]> {
        self.begin();
        let result = self.api.get_boards_for_user(user_id).await;
        self.is_loading = false;

        match result {
            Ok(boards) => {
                self.boards = boards;
                Ok(&self.boards)
            }
            Err(e) => {
                self.fail(&e, "Failed to load boards");
                Err(e)
            }
        }
    }

    /// Replace the cached classes with the server's snapshot.
    pub async fn load_classes_for_board(&mut self, board_id: &str) -> BrontoResult<&[Class]> {
        self.begin();
        let result = self.api.get_classes_for_board(board_id).await;
        self.is_loading = false;

        match result {
            Ok(classes) => {
                self.classes = classes;
                Ok(&self.classes)
            }
            Err(e) => {
                self.fail(&e, "Failed to load classes");
                Err(e)
            }
        }
    }

    /// Replace the cached assignments with the server's snapshot.
    pub async fn load_assignments_for_class(
        &mut self,
        class_id: &str,
    ) -> BrontoResult<&[Assignment]> {
        self.begin();
        let result = self.api.get_assignments_for_class(class_id).await;
        self.is_loading = false;

        match result {
            Ok(assignments) => {
                self.assignments = assignments;
                Ok(&self.assignments)
            }
            Err(e) => {
                self.fail(&e, "Failed to load assignments");
                Err(e)
            }
        }
    }

    /// Replace the cached office hours with the server's snapshot.
    pub async fn load_office_hours_for_class(
        &mut self,
        class_id: &str,
    ) -> BrontoResult<&[OfficeHours]> {
        self.begin();
        let result = self.api.get_office_hours_for_class(class_id).await;
        self.is_loading = false;

        match result {
            Ok(office_hours) => {
                self.office_hours = office_hours;
                Ok(&self.office_hours)
            }
            Err(e) => {
                self.fail(&e, "Failed to load office hours");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use httptest::{
        matchers::{eq, json_decoded, request},
        responders::{json_encoded, status_code},
        Expectation, Server,
    };
    use serde_json::json;

    fn store_for(server: &Server) -> (BoardStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::at(dir.path());
        let api = ApiClient::new(server.url_str("/api"), session);
        (BoardStore::new(api), dir)
    }

    async fn with_board(store: &mut BoardStore, server: &Server) {
        server.expect(
            Expectation::matching(request::method_path("POST", "/api/BrontoBoard/initializeBB"))
                .respond_with(json_encoded(json!({ "brontoBoard": "b1" }))),
        );
        store.initialize_board("u1", "c1").await.unwrap();
    }

    #[tokio::test]
    async fn test_mutations_without_board_never_hit_the_network() {
        // No expectations registered: any request would fail the test.
        let server = Server::run();
        let (mut store, _dir) = store_for(&server);

        let err = store.create_class("Algorithms", "Intro to CS").await.unwrap_err();
        assert!(matches!(err, BrontoError::NoBoardSelected));

        let err = store
            .add_assignment("cls-1", "PSet 1", "2025-10-01T23:59:00Z")
            .await
            .unwrap_err();
        assert!(matches!(err, BrontoError::NoBoardSelected));

        let err = store
            .add_office_hours("cls-1", "2025-10-01T15:00:00Z", 60)
            .await
            .unwrap_err();
        assert!(matches!(err, BrontoError::NoBoardSelected));

        let err = store.delete_assignment("a1").await.unwrap_err();
        assert!(matches!(err, BrontoError::NoBoardSelected));

        let err = store
            .change_assignment_due_date("a1", "2025-10-02T23:59:00Z")
            .await
            .unwrap_err();
        assert!(matches!(err, BrontoError::NoBoardSelected));

        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_initialize_board_sets_current() {
        let server = Server::run();
        let (mut store, _dir) = store_for(&server);

        with_board(&mut store, &server).await;

        assert_eq!(store.boards().len(), 1);
        let board = store.current_board().unwrap();
        assert_eq!(board.id, "b1");
        assert_eq!(board.owner, "u1");
        assert_eq!(board.calendar, "c1");
    }

    #[tokio::test]
    async fn test_create_class_appends_one_class_for_current_board() {
        let server = Server::run();
        let (mut store, _dir) = store_for(&server);
        with_board(&mut store, &server).await;

        server.expect(
            Expectation::matching(request::body(json_decoded(eq(json!({
                "owner": "u1",
                "brontoBoard": "b1",
                "className": "Algorithms",
                "overview": "Intro to CS",
            })))))
            .respond_with(json_encoded(json!({ "class": "cls-1" }))),
        );

        let class = store.create_class("Algorithms", "Intro to CS").await.unwrap();

        assert_eq!(store.classes().len(), 1);
        assert_eq!(class.board_id, "b1");
        assert_eq!(store.classes()[0].id, "cls-1");
    }

    #[tokio::test]
    async fn test_add_assignment_merges_server_id_with_local_fields() {
        let server = Server::run();
        let (mut store, _dir) = store_for(&server);
        with_board(&mut store, &server).await;

        server.expect(
            Expectation::matching(request::method_path("POST", "/api/BrontoBoard/addWork"))
                .respond_with(json_encoded(json!({ "assignment": "a1" }))),
        );

        let assignment = store
            .add_assignment("cls-1", "PSet 1", "2025-10-01T23:59:00Z")
            .await
            .unwrap();

        assert_eq!(assignment.id, "a1");
        assert_eq!(assignment.class_id, "cls-1");
        assert_eq!(assignment.due_date, "2025-10-01T23:59:00Z");
        assert_eq!(store.assignments().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_assignment_removes_only_the_matching_entry() {
        let server = Server::run();
        let (mut store, _dir) = store_for(&server);
        with_board(&mut store, &server).await;

        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/api/BrontoBoard/getAssignmentsForClass",
            ))
            .respond_with(json_encoded(json!([
                { "_id": "a1", "classId": "cls-1", "name": "PSet 1", "dueDate": "2025-10-01T23:59:00Z" },
                { "_id": "a2", "classId": "cls-1", "name": "PSet 2", "dueDate": "2025-10-08T23:59:00Z" },
            ]))),
        );
        server.expect(
            Expectation::matching(request::body(json_decoded(eq(json!({
                "owner": "u1",
                "work": "a1",
            })))))
            .respond_with(status_code(200)),
        );

        store.load_assignments_for_class("cls-1").await.unwrap();
        store.delete_assignment("a1").await.unwrap();

        assert_eq!(store.assignments().len(), 1);
        assert_eq!(store.assignments()[0].id, "a2");
    }

    #[tokio::test]
    async fn test_load_replaces_stale_entries() {
        let server = Server::run();
        let (mut store, _dir) = store_for(&server);
        with_board(&mut store, &server).await;

        server.expect(
            Expectation::matching(request::method_path("POST", "/api/BrontoBoard/createClass"))
                .respond_with(json_encoded(json!({ "class": "cls-local" }))),
        );
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/api/BrontoBoard/getClassesForBrontoBoard",
            ))
            .respond_with(json_encoded(json!([
                { "_id": "cls-server", "brontoBoardId": "b1", "name": "Systems", "overview": "OS" },
            ]))),
        );

        store.create_class("Algorithms", "Intro to CS").await.unwrap();
        store.load_classes_for_board("b1").await.unwrap();

        // The optimistic local entry is gone; only the snapshot remains.
        assert_eq!(store.classes().len(), 1);
        assert_eq!(store.classes()[0].id, "cls-server");
    }

    #[tokio::test]
    async fn test_change_due_date_updates_cached_copy() {
        let server = Server::run();
        let (mut store, _dir) = store_for(&server);
        with_board(&mut store, &server).await;

        server.expect(
            Expectation::matching(request::method_path("POST", "/api/BrontoBoard/addWork"))
                .respond_with(json_encoded(json!({ "assignment": "a1" }))),
        );
        server.expect(
            Expectation::matching(request::body(json_decoded(eq(json!({
                "owner": "u1",
                "work": "a1",
                "dueDate": "2025-10-15T23:59:00Z",
            })))))
            .respond_with(status_code(200)),
        );

        store
            .add_assignment("cls-1", "PSet 1", "2025-10-01T23:59:00Z")
            .await
            .unwrap();
        store
            .change_assignment_due_date("a1", "2025-10-15T23:59:00Z")
            .await
            .unwrap();

        assert_eq!(store.assignments()[0].due_date, "2025-10-15T23:59:00Z");
    }

    #[tokio::test]
    async fn test_failed_action_records_server_message_and_reraises() {
        let server = Server::run();
        let (mut store, _dir) = store_for(&server);
        with_board(&mut store, &server).await;

        server.expect(
            Expectation::matching(request::method_path("POST", "/api/BrontoBoard/createClass"))
                .respond_with(status_code(400).body(r#"{"error":"class name taken"}"#)),
        );

        let err = store.create_class("Algorithms", "Intro to CS").await.unwrap_err();

        assert!(matches!(err, BrontoError::Api { status: 400, .. }));
        assert_eq!(store.error(), Some("class name taken"));
        assert!(store.classes().is_empty());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let server = Server::run();
        let (mut store, _dir) = store_for(&server);
        with_board(&mut store, &server).await;

        store.reset();

        assert!(store.boards().is_empty());
        assert!(store.current_board().is_none());
        assert!(store.classes().is_empty());
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
    }
}
