mod common;

use actix_web::test;
use serde_json::Value;

use common::TestApp;

#[actix_rt::test]
async fn test_index_endpoint() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    for uri in ["/api", "/api/"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "{uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Welcome to the API!");
    }
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["document_store"]["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("environment").is_none());
}

#[actix_rt::test]
async fn test_malformed_json_is_a_bad_request() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/clients")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn test_non_object_body_is_rejected() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/clients")
        .set_json(serde_json::json!(["not", "an", "object"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
