#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};

use jobboard::database::UserRole;

#[actix_web::test]
async fn test_list_users_newest_first_without_digests() {
    let state = common::test_state().await;
    common::insert_user(&state, "First", "first@example.com", "pw", UserRole::User).await;
    common::insert_user(&state, "Second", "second@example.com", "pw", UserRole::Recruiter).await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/admin/users").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "Second");
    assert_eq!(users[1]["name"], "First");
    for user in users {
        assert!(user.get("password").is_none());
        assert!(user["created_at"].is_string());
    }
}

#[actix_web::test]
async fn test_delete_unknown_user_is_not_found() {
    let state = common::test_state().await;
    common::insert_user(&state, "Keep", "keep@example.com", "pw", UserRole::User).await;
    let app = test_app!(state);

    let req = test::TestRequest::delete().uri("/admin/user/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "User not found");
    assert_eq!(common::user_count(&state.db).await, 1);
}

#[actix_web::test]
async fn test_delete_user_removes_exactly_one_row() {
    let state = common::test_state().await;
    let doomed = common::insert_user(&state, "Doomed", "doomed@example.com", "pw", UserRole::User).await;
    common::insert_user(&state, "Keep", "keep@example.com", "pw", UserRole::User).await;
    let app = test_app!(state);

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/user/{}", doomed))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User deleted successfully");
    assert_eq!(common::user_count(&state.db).await, 1);
    assert!(common::find_user_by_email(&state.db, "doomed@example.com")
        .await
        .is_none());
}

#[actix_web::test]
async fn test_delete_user_with_applications() {
    let state = common::test_state().await;
    let recruiter =
        common::insert_user(&state, "Ravi", "ravi@technova.io", "pw", UserRole::Recruiter).await;
    let seeker = common::insert_user(&state, "Asha", "asha@example.com", "pw", UserRole::User).await;
    let job_id = common::insert_job(&state.db, recruiter, "Data Scientist", true).await;
    common::insert_application(&state.db, job_id, seeker).await;
    let app = test_app!(state);

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/user/{}", seeker))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/applications/job/{}", job_id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["applications"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_stats_count_by_role() {
    let state = common::test_state().await;
    let recruiter =
        common::insert_user(&state, "Ravi", "ravi@technova.io", "pw", UserRole::Recruiter).await;
    let first = common::insert_user(&state, "Asha", "asha@example.com", "pw", UserRole::User).await;
    let second = common::insert_user(&state, "Bo", "bo@example.com", "pw", UserRole::User).await;
    common::insert_user(&state, "Root", "root@example.com", "pw", UserRole::Admin).await;
    let open = common::insert_job(&state.db, recruiter, "Open", true).await;
    common::insert_job(&state.db, recruiter, "Closed", false).await;
    common::insert_application(&state.db, open, first).await;
    common::insert_application(&state.db, open, second).await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/admin/stats").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["users"], 2);
    assert_eq!(body["recruiters"], 1);
    assert_eq!(body["jobs"], 2);
    assert_eq!(body["applications"], 2);
}
