#[macro_use]
mod common;

use actix_web::test;

#[actix_web::test]
async fn test_companies_sorted_by_name() {
    let state = common::test_state().await;
    common::insert_company(&state.db, "TechNova Inc.").await;
    common::insert_company(&state.db, "DataPulse AI").await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/companies").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body["companies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["DataPulse AI", "TechNova Inc."]);
}

#[actix_web::test]
async fn test_categories_listed_with_slugs() {
    let state = common::test_state().await;
    common::insert_category(&state.db, "Engineering", "engineering").await;
    common::insert_category(&state.db, "Design", "design").await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/categories").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["slug"], "design");
    assert_eq!(categories[1]["slug"], "engineering");
}

#[actix_web::test]
async fn test_health_check() {
    let state = common::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
