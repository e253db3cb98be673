// tests/mock_test_tests.rs

mod common;

use axum::http::Method;
use common::{TestServer, ok};
use prep_console::{
    AppError,
    controllers::{
        form::{FormModel, MutationForm, SubmitOutcome},
        list::ResourceList,
        notify::MemoryNotifier,
    },
    models::mock_test::{MockTest, MockTestForm, TestSection, TestType},
};
use serde_json::json;

fn section(name: &str, questions: u32, minutes: u32) -> TestSection {
    TestSection {
        name: name.to_string(),
        question_count: questions,
        duration: minutes,
    }
}

fn draft() -> MockTestForm {
    MockTestForm {
        title: "TCS NQT Mock 1".to_string(),
        company: "co1".to_string(),
        sections: vec![section("Quant", 20, 25), section("Verbal", 10, 15)],
        total_questions: 30,
        duration: 40,
        ..MockTestForm::blank()
    }
}

fn open_with(form_draft: MockTestForm) -> MutationForm<MockTestForm> {
    let mut form = MutationForm::<MockTestForm>::new();
    form.open_create();
    *form.draft_mut() = form_draft;
    form
}

#[tokio::test]
async fn free_test_is_created_without_a_price() {
    // Arrange
    let server = TestServer::spawn().await;
    server.json(Method::POST, "/tests", 201, ok(json!({ "_id": "t9" })));
    let notifier = MemoryNotifier::new();
    let mut form = open_with(MockTestForm {
        title: "  TCS NQT Mock 1 ".to_string(),
        price: 99.0,
        sections: vec![section(" Quant ", 20, 25), section("Verbal", 10, 15)],
        ..draft()
    });

    // Act
    let outcome = form.submit(&server.client(), &notifier).await;

    // Assert
    assert_eq!(outcome, Ok(SubmitOutcome::Created));
    let body = server.last(Method::POST, "/tests").unwrap().body.unwrap();
    assert_eq!(body["title"], "TCS NQT Mock 1");
    assert_eq!(body["type"], "free");
    assert_eq!(body["price"], 0.0);
    assert_eq!(body["sections"][0]["name"], "Quant");
    assert_eq!(body["totalQuestions"], 30);
    assert_eq!(body["isActive"], true);
    assert_eq!(notifier.successes(), vec!["Test created successfully".to_string()]);
}

#[tokio::test]
async fn invalid_tests_are_never_sent() {
    let server = TestServer::spawn().await;
    let client = server.client();
    let notifier = MemoryNotifier::new();

    let unpriced = open_with(MockTestForm {
        test_type: TestType::Paid,
        price: 0.0,
        ..draft()
    })
    .submit(&client, &notifier)
    .await;
    let mismatched = open_with(MockTestForm {
        total_questions: 25,
        ..draft()
    })
    .submit(&client, &notifier)
    .await;
    let untitled = open_with(MockTestForm {
        title: "   ".to_string(),
        ..draft()
    })
    .submit(&client, &notifier)
    .await;
    let timeless = open_with(MockTestForm {
        duration: 0,
        ..draft()
    })
    .submit(&client, &notifier)
    .await;

    assert_eq!(
        unpriced,
        Err(AppError::Validation(
            "Paid tests need a price greater than zero".to_string()
        ))
    );
    assert_eq!(
        mismatched,
        Err(AppError::Validation(
            "Sections add up to 30 questions but the test declares 25".to_string()
        ))
    );
    assert_eq!(
        untitled,
        Err(AppError::Validation("Test title is required".to_string()))
    );
    assert_eq!(
        timeless,
        Err(AppError::Validation(
            "Duration must be at least one minute".to_string()
        ))
    );
    assert!(server.requests().is_empty());
    assert_eq!(notifier.errors().len(), 4);
}

#[tokio::test]
async fn edit_puts_the_company_id_back() {
    // Arrange
    let server = TestServer::spawn().await;
    server.json(
        Method::GET,
        "/tests",
        200,
        ok(json!([{
            "_id": "t1",
            "title": "Infosys Mock",
            "company": { "_id": "co2", "name": "Infosys" },
            "sections": [{ "name": "Reasoning", "questionCount": 15, "duration": 20 }],
            "totalQuestions": 15,
            "duration": 20,
            "price": 49.0,
            "type": "paid"
        }])),
    );
    server.json(Method::PUT, "/tests/t1", 200, json!({ "success": true }));
    let client = server.client();
    let notifier = MemoryNotifier::new();
    let mut list = ResourceList::<MockTest>::new();
    list.refresh(&client, &notifier).await.unwrap();
    let record = list.find("t1").cloned().unwrap();

    // Act
    let mut form = MutationForm::<MockTestForm>::new();
    form.open_edit(&record);
    assert_eq!(form.draft().company, "co2");
    form.draft_mut().duration = 25;
    let outcome = form.submit_and_refresh(&mut list, &client, &notifier).await;

    // Assert
    assert_eq!(outcome, Ok(SubmitOutcome::Updated));
    let body = server.last(Method::PUT, "/tests/t1").unwrap().body.unwrap();
    assert_eq!(body["company"], "co2");
    assert_eq!(body["duration"], 25);
    assert_eq!(body["type"], "paid");
    assert_eq!(body["price"], 49.0);
    assert_eq!(server.count(Method::GET, "/tests"), 2);
    assert_eq!(notifier.successes(), vec!["Test updated successfully".to_string()]);
}
