#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use jobboard::database::UserRole;

#[actix_web::test]
async fn test_update_profile_overwrites_fields() {
    let state = common::test_state().await;
    let id = common::insert_user(&state, "Asha", "asha@example.com", "pw", UserRole::User).await;
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri("/profile")
        .set_json(json!({
            "user_id": id,
            "name": "Asha Verma",
            "phone": "98765 43210",
            "location": "Bengaluru"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Profile updated successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/profile/{}", id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["name"], "Asha Verma");
    assert_eq!(body["user"]["phone"], "9876543210");
    assert_eq!(body["user"]["location"], "Bengaluru");
    assert_eq!(body["user"]["email"], "asha@example.com");
}

#[actix_web::test]
async fn test_update_profile_blank_location_clears_it() {
    let state = common::test_state().await;
    let id = common::insert_user(&state, "Asha", "asha@example.com", "pw", UserRole::User).await;
    let app = test_app!(state);

    for location in ["Pune", "  "] {
        let req = test::TestRequest::put()
            .uri("/profile")
            .set_json(json!({ "user_id": id, "name": "Asha", "location": location }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let stored = common::find_user_by_email(&state.db, "asha@example.com")
        .await
        .unwrap();
    assert_eq!(stored.location, None);
}

#[actix_web::test]
async fn test_update_profile_unknown_user_is_not_found() {
    let state = common::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri("/profile")
        .set_json(json!({ "user_id": 404, "name": "Ghost" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_update_profile_requires_user_and_name() {
    let state = common::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri("/profile")
        .set_json(json!({ "name": "No Id" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_get_profile_unknown_user() {
    let state = common::test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/profile/999").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
