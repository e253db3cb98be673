// tests/alumni_tests.rs

mod common;

use axum::http::Method;
use common::{TestServer, alumni_json, ok};
use prep_console::{
    AppError,
    controllers::{
        form::{MutationForm, SubmitOutcome, SuccessPolicy},
        list::{ResourceList, ViewState},
        mutation::AutoConfirm,
        notify::MemoryNotifier,
    },
    models::alumni::{Alumni, AlumniForm},
};
use serde_json::json;

fn seed_alumni(server: &TestServer) {
    server.json(
        Method::GET,
        "/alumni",
        200,
        ok(json!([
            alumni_json("a1", "Jane Doe", "jane@example.com"),
            alumni_json("a2", "John Smith", "john@example.com"),
        ])),
    );
}

fn filled_form(policy: SuccessPolicy) -> MutationForm<AlumniForm> {
    let mut form = MutationForm::<AlumniForm>::new().with_policy(policy);
    form.open_create();
    let draft = form.draft_mut();
    draft.name = "A".to_string();
    draft.email = "a@b.com".to_string();
    draft.company = "C".to_string();
    draft.position = "P".to_string();
    draft.testimonial = "T".to_string();
    draft.rating = 5;
    form
}

#[tokio::test]
async fn search_is_case_insensitive_and_never_refetches() {
    // Arrange
    let server = TestServer::spawn().await;
    seed_alumni(&server);
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<Alumni>::new();

    // Act
    list.refresh(&client, &notifier).await.unwrap();
    list.set_search("jane");
    let found: Vec<String> = list.visible().iter().map(|a| a.name.clone()).collect();
    list.set_search("xyz");

    // Assert
    assert_eq!(found, vec!["Jane Doe".to_string()]);
    assert!(list.visible().is_empty());
    assert_eq!(list.view_state(), ViewState::NoMatches);
    assert_eq!(server.count(Method::GET, "/alumni"), 1);
}

#[tokio::test]
async fn empty_collection_is_no_data_not_no_matches() {
    let server = TestServer::spawn().await;
    server.json(Method::GET, "/alumni", 200, ok(json!([])));
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<Alumni>::new();

    list.refresh(&server.client(), &notifier).await.unwrap();
    list.set_search("anything");

    assert_eq!(list.view_state(), ViewState::NoData);
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn featured_filter_uses_exact_match() {
    let server = TestServer::spawn().await;
    let mut featured = alumni_json("a3", "Kim Lee", "kim@example.com");
    featured["featured"] = json!(true);
    server.json(
        Method::GET,
        "/alumni",
        200,
        ok(json!([alumni_json("a1", "Jane Doe", "jane@example.com"), featured])),
    );
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<Alumni>::new();
    list.refresh(&server.client(), &notifier).await.unwrap();

    list.filter_by("featured", prep_console::controllers::filter::Choice::Only(true), |a: &Alumni| {
        a.featured
    });

    let ids: Vec<&str> = list.visible().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a3"]);

    list.clear_filters();
    assert_eq!(list.view_state(), ViewState::Populated(2));
}

#[tokio::test]
async fn rating_out_of_range_blocks_submission() {
    // Arrange
    let server = TestServer::spawn().await;
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut form = filled_form(SuccessPolicy::Strict);
    form.draft_mut().rating = 6;

    // Act
    let result = form.submit(&client, &notifier).await;

    // Assert
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(notifier.errors(), vec!["Rating must be between 1 and 5".to_string()]);
    assert!(form.is_open());
    assert!(server.requests().is_empty());

    form.draft_mut().rating = 0;
    assert!(form.submit(&client, &notifier).await.is_err());
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn overlong_testimonial_blocks_submission() {
    let server = TestServer::spawn().await;
    let notifier = MemoryNotifier::new();
    let mut form = filled_form(SuccessPolicy::Strict);
    form.draft_mut().testimonial = "x".repeat(501);

    let result = form.submit(&server.client(), &notifier).await;

    assert_eq!(
        result,
        Err(AppError::Validation(
            "Testimonial must be at most 500 characters".to_string()
        ))
    );
    assert_eq!(server.count(Method::POST, "/alumni"), 0);
}

#[tokio::test]
async fn blank_required_fields_are_reported_together() {
    let server = TestServer::spawn().await;
    let notifier = MemoryNotifier::new();
    let mut form = filled_form(SuccessPolicy::Strict);
    form.draft_mut().name = "   ".to_string();
    form.draft_mut().company = String::new();

    let err = form.submit(&server.client(), &notifier).await.unwrap_err();

    let message = err.toast_message();
    assert!(message.contains("Name is required"), "{message}");
    assert!(message.contains("Company is required"), "{message}");
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn create_posts_normalized_draft_then_refetches_once() {
    // Arrange
    let server = TestServer::spawn().await;
    seed_alumni(&server);
    server.json(
        Method::POST,
        "/alumni",
        201,
        json!({ "success": true, "message": "Alumni added" }),
    );
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<Alumni>::new();
    let mut form = filled_form(SuccessPolicy::Strict);
    {
        let draft = form.draft_mut();
        draft.name = "  A ".to_string();
        draft.email = " A@B.com ".to_string();
        draft.testimonial = " T\n".to_string();
    }

    // Act
    let outcome = form.submit_and_refresh(&mut list, &client, &notifier).await;

    // Assert
    assert_eq!(outcome, Ok(SubmitOutcome::Created));
    let post = server.last(Method::POST, "/alumni").expect("POST /alumni was sent");
    let body = post.body.expect("POST carried a JSON body");
    assert_eq!(body["name"], "A");
    assert_eq!(body["email"], "a@b.com");
    assert_eq!(body["company"], "C");
    assert_eq!(body["position"], "P");
    assert_eq!(body["testimonial"], "T");
    assert_eq!(body["rating"], 5);
    assert!(body.get("photoUrl").is_none());

    assert!(!form.is_open());
    assert_eq!(form.draft(), &AlumniForm::default());
    assert_eq!(server.count(Method::GET, "/alumni"), 1);
    assert_eq!(list.items().len(), 2);
    assert_eq!(notifier.successes(), vec!["Alumni added".to_string()]);
}

#[tokio::test]
async fn edit_puts_to_item_path() {
    let server = TestServer::spawn().await;
    seed_alumni(&server);
    server.json(Method::PUT, "/alumni/a2", 200, json!({ "success": true }));
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<Alumni>::new();
    list.refresh(&client, &notifier).await.unwrap();

    let record = list.find("a2").cloned().unwrap();
    let mut form = MutationForm::<AlumniForm>::new();
    form.open_edit(&record);
    assert!(form.mode().is_editing());
    form.draft_mut().position = "Staff Engineer".to_string();

    let outcome = form.submit_and_refresh(&mut list, &client, &notifier).await;

    assert_eq!(outcome, Ok(SubmitOutcome::Updated));
    let put = server.last(Method::PUT, "/alumni/a2").unwrap();
    assert_eq!(put.body.unwrap()["position"], "Staff Engineer");
    assert_eq!(server.count(Method::POST, "/alumni"), 0);
    assert_eq!(server.count(Method::GET, "/alumni"), 2);
    assert_eq!(notifier.successes(), vec!["Alumni updated successfully".to_string()]);
}

#[tokio::test]
async fn saved_record_is_reported_even_when_the_refetch_fails() {
    // Arrange
    let server = TestServer::spawn().await;
    server.json(Method::POST, "/alumni", 201, json!({ "success": true, "message": "Alumni added" }));
    server.json(Method::GET, "/alumni", 500, json!({ "success": false, "message": "Database unavailable" }));
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<Alumni>::new();
    let mut form = filled_form(SuccessPolicy::Strict);

    // Act
    let outcome = form.submit_and_refresh(&mut list, &server.client(), &notifier).await;

    // Assert
    assert_eq!(outcome, Ok(SubmitOutcome::Created));
    assert!(!form.is_open());
    assert_eq!(server.count(Method::GET, "/alumni"), 1);
    assert_eq!(notifier.successes(), vec!["Alumni added".to_string()]);
    assert_eq!(notifier.errors(), vec!["Database unavailable".to_string()]);
}

#[tokio::test]
async fn confirmed_delete_issues_one_delete_and_one_refetch() {
    // Arrange
    let server = TestServer::spawn().await;
    seed_alumni(&server);
    server.json(Method::DELETE, "/alumni/a1", 200, json!({ "success": true }));
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<Alumni>::new();

    // Act
    let deleted = list.remove(&client, &AutoConfirm(true), &notifier, "a1").await;

    // Assert
    assert_eq!(deleted, Ok(true));
    assert_eq!(server.count(Method::DELETE, "/alumni/a1"), 1);
    assert_eq!(server.count(Method::GET, "/alumni"), 1);
    assert_eq!(
        notifier.successes(),
        vec!["Alumni deleted successfully".to_string()]
    );
}

#[tokio::test]
async fn declined_delete_issues_no_request() {
    let server = TestServer::spawn().await;
    seed_alumni(&server);
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<Alumni>::new();

    let deleted = list
        .remove(&server.client(), &AutoConfirm(false), &notifier, "a1")
        .await;

    assert_eq!(deleted, Ok(false));
    assert!(server.requests().is_empty());
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn lenient_policy_accepts_failure_shaped_200() {
    let server = TestServer::spawn().await;
    server.json(
        Method::POST,
        "/alumni",
        200,
        json!({ "success": false, "message": "Alumni saved" }),
    );
    let notifier = MemoryNotifier::new();
    let mut form = filled_form(SuccessPolicy::AcceptOkStatus);

    let outcome = form.submit(&server.client(), &notifier).await;

    assert_eq!(outcome, Ok(SubmitOutcome::Created));
    assert!(!form.is_open());
    assert!(notifier.errors().is_empty());
    assert_eq!(
        notifier.successes(),
        vec!["Alumni created successfully".to_string()]
    );
}

#[tokio::test]
async fn strict_policy_reports_failure_shaped_200() {
    let server = TestServer::spawn().await;
    server.json(
        Method::POST,
        "/alumni",
        200,
        json!({ "success": false, "message": "Email already registered" }),
    );
    let notifier = MemoryNotifier::new();
    let mut form = filled_form(SuccessPolicy::Strict);

    let outcome = form.submit(&server.client(), &notifier).await;

    assert_eq!(
        outcome,
        Err(AppError::Api {
            status: Some(200),
            message: "Email already registered".to_string()
        })
    );
    assert!(form.is_open());
    assert_eq!(form.draft().email, "a@b.com");
    assert_eq!(notifier.errors(), vec!["Email already registered".to_string()]);
}

#[tokio::test]
async fn lenient_policy_still_rejects_real_http_errors() {
    let server = TestServer::spawn().await;
    server.json(Method::POST, "/alumni", 400, json!({ "success": false, "error": "Bad payload" }));
    let notifier = MemoryNotifier::new();
    let mut form = filled_form(SuccessPolicy::AcceptOkStatus);

    let outcome = form.submit(&server.client(), &notifier).await;

    assert_eq!(outcome.unwrap_err().status(), Some(400));
    assert!(form.is_open());
    assert_eq!(notifier.errors(), vec!["Bad payload".to_string()]);
}

#[tokio::test]
async fn failed_refresh_keeps_rows_and_toasts_once() {
    // Arrange
    let server = TestServer::spawn().await;
    seed_alumni(&server);
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<Alumni>::new();
    list.refresh(&client, &notifier).await.unwrap();

    server.json(Method::GET, "/alumni", 500, json!({ "success": false, "message": "Database down" }));

    // Act
    let result = list.refresh(&client, &notifier).await;

    // Assert
    assert!(result.is_err());
    assert!(!list.is_loading());
    assert_eq!(list.items().len(), 2);
    assert_eq!(list.error(), Some("Database down"));
    assert_eq!(notifier.errors(), vec!["Database down".to_string()]);
}

#[tokio::test]
async fn sync_only_refetches_after_a_parameter_change() {
    let server = TestServer::spawn().await;
    seed_alumni(&server);
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<Alumni>::new();

    assert_eq!(list.sync(&client, &notifier).await, Ok(true));
    list.set_search("jane");
    assert_eq!(list.sync(&client, &notifier).await, Ok(false));
    assert!(list.set_param("featured", Some("true".to_string())));
    assert_eq!(list.sync(&client, &notifier).await, Ok(true));

    assert_eq!(server.count(Method::GET, "/alumni"), 2);
    let last = server.last(Method::GET, "/alumni").unwrap();
    assert_eq!(last.param("featured"), Some("true"));
}
