// tests/pagination_tests.rs

mod common;

use axum::http::Method;
use common::{TestServer, discussion_json};
use prep_console::{
    AppError,
    api::endpoints::EnrollmentKind,
    controllers::{
        discussions::{discussion_board, reply},
        enrollments::enrollment_board,
        notify::MemoryNotifier,
        pagination::PageState,
    },
    models::{Pagination, discussion::Discussion, enrollment::EnrollmentStatus, mock_test::ResultRow},
};
use serde_json::json;

/// Serves three pages of discussions, two per page.
fn serve_discussions(server: &TestServer) {
    server.respond(Method::GET, "/courses/discussions/all", |req| {
        let page: u32 = req.param("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let rows: Vec<_> = (1..=2)
            .map(|i| discussion_json(&format!("d{page}{i}"), &format!("Question {i} on page {page}")))
            .collect();
        let body = json!({
            "success": true,
            "data": rows,
            "pagination": { "page": page, "limit": 2, "total": 6, "pages": 3 }
        });
        (200, body.to_string())
    });
}

#[tokio::test]
async fn next_twice_reaches_the_last_page() {
    // Arrange
    let server = TestServer::spawn().await;
    serve_discussions(&server);
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut board = discussion_board(2);
    board.load(&client, &notifier).await.unwrap();
    assert!(board.state().has_next());
    assert!(!board.state().has_prev());

    // Act
    board.next_page(&client, &notifier).await.unwrap();
    board.next_page(&client, &notifier).await.unwrap();

    // Assert
    let last = server.last(Method::GET, "/courses/discussions/all").unwrap();
    assert_eq!(last.param("page"), Some("3"));
    assert_eq!(last.param("limit"), Some("2"));
    assert_eq!(board.state().page(), 3);
    assert!(!board.state().has_next());
    assert_eq!(board.items()[0].id, "d31");

    // Next on the last page is a no-op
    assert_eq!(board.next_page(&client, &notifier).await, Ok(false));
    assert_eq!(server.count(Method::GET, "/courses/discussions/all"), 3);
}

#[tokio::test]
async fn changing_a_server_filter_resets_to_page_one() {
    let server = TestServer::spawn().await;
    serve_discussions(&server);
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut board = discussion_board(2).starting_at(2);
    board.load(&client, &notifier).await.unwrap();
    assert_eq!(board.state().page(), 2);

    let changed = board
        .set_filter("courseId", Some("c1".to_string()), &client, &notifier)
        .await;

    assert_eq!(changed, Ok(true));
    let last = server.last(Method::GET, "/courses/discussions/all").unwrap();
    assert_eq!(last.param("page"), Some("1"));
    assert_eq!(last.param("courseId"), Some("c1"));

    // Same value again, or "all" when nothing is set, issues nothing
    assert_eq!(
        board.set_filter("courseId", Some("c1".to_string()), &client, &notifier).await,
        Ok(false)
    );
    assert_eq!(
        board.set_filter("status", Some("all".to_string()), &client, &notifier).await,
        Ok(false)
    );
    assert_eq!(server.count(Method::GET, "/courses/discussions/all"), 2);
}

#[tokio::test]
async fn search_filters_the_current_page_only() {
    let server = TestServer::spawn().await;
    serve_discussions(&server);
    let notifier = MemoryNotifier::new();
    let mut board = discussion_board(2);
    board.load(&server.client(), &notifier).await.unwrap();

    board.set_search("QUESTION 2");

    assert_eq!(board.visible().len(), 1);
    assert_eq!(board.visible()[0].id, "d12");
    assert_eq!(server.count(Method::GET, "/courses/discussions/all"), 1);
}

#[tokio::test]
async fn reply_posts_message_and_reloads_board() {
    // Arrange
    let server = TestServer::spawn().await;
    serve_discussions(&server);
    server.json(
        Method::POST,
        "/courses/discussions/d11/reply",
        201,
        json!({ "success": true, "message": "Reply added" }),
    );
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut board = discussion_board(2);

    // Act
    reply(&mut board, &client, &notifier, "d11", "  Use a heap.  ").await.unwrap();

    // Assert
    let post = server.last(Method::POST, "/courses/discussions/d11/reply").unwrap();
    assert_eq!(post.body.unwrap()["message"], "Use a heap.");
    assert_eq!(server.count(Method::GET, "/courses/discussions/all"), 1);
    assert_eq!(notifier.successes(), vec!["Reply added".to_string()]);
}

#[tokio::test]
async fn reply_reloads_the_page_the_thread_is_on() {
    // Arrange
    let server = TestServer::spawn().await;
    serve_discussions(&server);
    server.json(
        Method::POST,
        "/courses/discussions/d31/reply",
        201,
        json!({ "success": true }),
    );
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut board = discussion_board(2).starting_at(3);

    // Act
    reply(&mut board, &client, &notifier, "d31", "See week 4").await.unwrap();

    // Assert
    let reload = server.last(Method::GET, "/courses/discussions/all").unwrap();
    assert_eq!(reload.param("page"), Some("3"));
    assert_eq!(board.state().page(), 3);
    assert!(board.items().iter().any(|d| d.id == "d31"));
    assert_eq!(notifier.successes(), vec!["Reply posted".to_string()]);
}

#[tokio::test]
async fn empty_reply_is_never_sent() {
    let server = TestServer::spawn().await;
    let notifier = MemoryNotifier::new();
    let mut board = discussion_board(2);

    let result = reply(&mut board, &server.client(), &notifier, "d11", "   ").await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(server.requests().is_empty());
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn enrollments_decode_populated_and_bare_references() {
    // Arrange
    let server = TestServer::spawn().await;
    server.json(
        Method::GET,
        "/enrollments/admin/courses/c1",
        200,
        json!({
            "success": true,
            "data": [
                {
                    "_id": "e1",
                    "student": { "_id": "s1", "name": "Riya", "email": "riya@example.com" },
                    "course": { "_id": "c1", "title": "DSA Bootcamp" },
                    "status": "active"
                },
                {
                    "_id": "e2",
                    "student": "s2",
                    "course": "c1",
                    "status": "pending"
                }
            ],
            "pagination": { "page": 1, "limit": 10, "total": 2, "pages": 1 }
        }),
    );
    let notifier = MemoryNotifier::new();
    let mut board = enrollment_board(EnrollmentKind::Courses, "c1", 10);

    // Act
    board.load(&server.client(), &notifier).await.unwrap();

    // Assert
    let rows = board.items();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].student_name(), "Riya");
    assert_eq!(rows[0].student_email(), "riya@example.com");
    assert_eq!(rows[0].status, EnrollmentStatus::Active);
    assert_eq!(rows[1].student_name(), "Unknown student");
    assert_eq!(rows[1].student_id(), Some("s2"));
    assert_eq!(rows[1].status, EnrollmentStatus::Pending);
    assert!(!board.state().has_next());
    assert_eq!(board.state().total(), 2);
}

#[tokio::test]
async fn deleted_student_does_not_blank_the_enrollment_page() {
    // Arrange
    let server = TestServer::spawn().await;
    server.json(
        Method::GET,
        "/enrollments/admin/courses/c1",
        200,
        json!({
            "success": true,
            "data": [
                {
                    "_id": "e1",
                    "student": { "_id": "s1", "name": "Riya", "email": "riya@example.com" },
                    "course": { "_id": "c1", "title": "DSA Bootcamp" },
                    "status": "active"
                },
                { "_id": "e2", "student": null, "course": "c1", "status": "active" }
            ],
            "pagination": { "page": 1, "limit": 10, "total": 2, "pages": 1 }
        }),
    );
    let notifier = MemoryNotifier::new();
    let mut board = enrollment_board(EnrollmentKind::Courses, "c1", 10);

    // Act
    let loaded = board.load(&server.client(), &notifier).await;

    // Assert
    assert_eq!(loaded, Ok(()));
    assert!(notifier.errors().is_empty());
    let rows = board.items();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].student_name(), "Riya");
    assert_eq!(rows[1].student_name(), "Unknown student");
    assert_eq!(rows[1].student_email(), "");
    assert_eq!(rows[1].student_id(), None);
}

#[test]
fn deleted_student_rows_still_decode_in_results_and_discussions() {
    let results: Vec<ResultRow> = serde_json::from_value(json!([
        { "_id": "r1", "studentId": null, "testId": "t1", "status": "submitted" }
    ]))
    .unwrap();
    let discussion: Discussion = serde_json::from_value(json!({
        "_id": "d1",
        "message": "Is recursion on the test?",
        "studentId": null,
        "courseId": "c1",
        "replies": [{ "userId": null, "userType": "Admin", "message": "Yes" }]
    }))
    .unwrap();

    assert_eq!(results[0].student_name(), "Unknown student");
    assert_eq!(results[0].student_email(), "");
    assert_eq!(discussion.student_name(), "Unknown student");
    assert_eq!(discussion.replies[0].author_name(), "Unknown student");
    assert!(discussion.is_answered());
}

#[tokio::test]
async fn recordings_enrollments_are_filtered_by_status_on_the_server() {
    let server = TestServer::spawn().await;
    server.json(
        Method::GET,
        "/enrollments/admin/recordings/c7",
        200,
        json!({ "success": true, "data": [] }),
    );
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut board = enrollment_board(EnrollmentKind::Recordings, "c7", 10).with_param("status", "completed");

    board.load(&client, &notifier).await.unwrap();
    board.set_filter("status", None, &client, &notifier).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].param("status"), Some("completed"));
    assert_eq!(requests[1].param("status"), None);
    assert!(board.items().is_empty());
}

#[test]
fn page_state_clamps_to_reported_bounds() {
    let mut state = PageState::new(10);
    assert!(!state.next());

    state.absorb(&Pagination {
        page: 1,
        limit: 10,
        total: 25,
        pages: 3,
    });
    assert!(state.go_to(7));
    assert_eq!(state.page(), 3);
    assert!(!state.next());
    assert!(state.prev());
    assert_eq!(state.page(), 2);
    assert!(!state.go_to(2));

    state.absorb(&Pagination {
        page: 1,
        limit: 10,
        total: 5,
        pages: 1,
    });
    assert_eq!(state.page(), 1);
    assert!(!state.has_prev());
}

#[test]
fn next_before_bounds_are_known_stays_put() {
    let mut state = PageState::new(10);
    state.seek(u32::MAX);

    assert!(!state.next());
    assert_eq!(state.page(), u32::MAX);

    state.absorb(&Pagination {
        page: 1,
        limit: 10,
        total: 30,
        pages: 3,
    });
    assert_eq!(state.page(), 3);
    assert!(!state.next());
}
