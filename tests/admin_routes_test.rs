#[macro_use]
mod common;

use actix_web::test;
use serde_json::{json, Value};

use common::{reservation_payload, TestApp, ADMIN_EMAIL, ADMIN_PASSWORD};
use voyage_api::services::admin_accounts;

macro_rules! login {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json($body)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

#[actix_web::test]
async fn test_admin_login_success() {
    let test_app = TestApp::new();
    test_app.seed_admin().await;
    let app = test::init_service(test_app.create_app()).await;

    let resp = login!(app, json!({ "email": ADMIN_EMAIL, "mot_de_passe": ADMIN_PASSWORD }));
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().unwrap();
    let claims = test_app.context.tokens.verify(token).unwrap();
    assert_eq!(claims.sub.len(), 24);
}

#[actix_web::test]
async fn test_admin_login_failures_look_alike() {
    let test_app = TestApp::new();
    test_app.seed_admin().await;
    let app = test::init_service(test_app.create_app()).await;

    let attempts = [
        json!({ "email": ADMIN_EMAIL, "mot_de_passe": "wrong" }),
        json!({ "email": "nobody@example.com", "mot_de_passe": ADMIN_PASSWORD }),
        json!({ "email": ADMIN_EMAIL }),
        json!({}),
    ];
    for attempt in attempts {
        let resp = login!(app, attempt);
        assert_eq!(resp.status(), 401);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid email or password");
    }
}

#[actix_web::test]
async fn test_admin_login_with_non_string_credentials_is_unauthorized() {
    let test_app = TestApp::new();
    test_app.seed_admin().await;
    let app = test::init_service(test_app.create_app()).await;

    let attempts = [
        json!({ "email": 123, "mot_de_passe": "x" }),
        json!({ "email": [ADMIN_EMAIL], "mot_de_passe": ADMIN_PASSWORD }),
        json!({ "email": ADMIN_EMAIL, "mot_de_passe": 42 }),
        json!({ "email": { "$ne": null }, "mot_de_passe": ADMIN_PASSWORD }),
        json!({ "email": null, "mot_de_passe": null }),
    ];
    for attempt in attempts {
        let resp = login!(app, attempt.clone());
        assert_eq!(resp.status(), 401, "{attempt}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid email or password", "{attempt}");
    }
}

#[actix_web::test]
async fn test_dashboard_requires_a_token() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/dashboard")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_dashboard_lists_every_collection() {
    let test_app = TestApp::new();
    test_app.seed_admin().await;
    let app = test::init_service(test_app.create_app()).await;

    let client_id = create_client!(app, "dash@example.com");
    let req = test::TestRequest::post()
        .uri("/api/reservations")
        .set_json(reservation_payload(&client_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let resp = login!(app, json!({ "email": ADMIN_EMAIL, "mot_de_passe": ADMIN_PASSWORD }));
    let body: Value = test::read_body_json(resp).await;
    let bearer = format!("Bearer {}", body["access_token"].as_str().unwrap());

    let req = test::TestRequest::get()
        .uri("/api/admin/dashboard")
        .insert_header(("Authorization", bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["admin"]["email"], ADMIN_EMAIL);
    assert!(body["admin"].get("mot_de_passe").is_none());
    assert_eq!(body["clients"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["reservations"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["avis"], json!([]));
    assert_eq!(body["packages"], json!([]));
}

#[actix_web::test]
async fn test_dashboard_rejects_token_of_deleted_admin() {
    let test_app = TestApp::new();
    test_app.seed_admin().await;
    let app = test::init_service(test_app.create_app()).await;

    let resp = login!(app, json!({ "email": ADMIN_EMAIL, "mot_de_passe": ADMIN_PASSWORD }));
    let body: Value = test::read_body_json(resp).await;
    let bearer = format!("Bearer {}", body["access_token"].as_str().unwrap());

    let deleted = admin_accounts::delete_admin(test_app.store.as_ref(), ADMIN_EMAIL)
        .await
        .unwrap();
    assert!(deleted);

    let req = test::TestRequest::get()
        .uri("/api/admin/dashboard")
        .insert_header(("Authorization", bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid admin ID in token");
}

#[actix_web::test]
async fn test_confirm_reservation() {
    let test_app = TestApp::new();
    test_app.seed_admin().await;
    let app = test::init_service(test_app.create_app()).await;

    let client_id = create_client!(app, "confirm@example.com");
    let req = test::TestRequest::post()
        .uri("/api/reservations")
        .set_json(reservation_payload(&client_id))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let reservation_id = created["_id"].as_str().unwrap();
    assert!(created.get("status").is_none());

    let resp = login!(app, json!({ "email": ADMIN_EMAIL, "mot_de_passe": ADMIN_PASSWORD }));
    let body: Value = test::read_body_json(resp).await;
    let bearer = format!("Bearer {}", body["access_token"].as_str().unwrap());

    // Without a token the reservation is untouched.
    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/reservations/{}/confirm", reservation_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/reservations/{}/confirm", reservation_id))
        .insert_header(("Authorization", bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Reservation confirmed.");

    let req = test::TestRequest::get()
        .uri(&format!("/api/reservations/{}", reservation_id))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["status"], "confirmed");

    let req = test::TestRequest::post()
        .uri("/api/admin/reservations/507f1f77bcf86cd799439011/confirm")
        .insert_header(("Authorization", bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::post()
        .uri("/api/admin/reservations/bogus/confirm")
        .insert_header(("Authorization", bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
