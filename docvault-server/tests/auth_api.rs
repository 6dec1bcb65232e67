mod common;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp};
use http::{Method, StatusCode, header};
use serde_json::json;

#[tokio::test]
async fn admin_login_sets_cookie_and_returns_role() {
    let app = TestApp::new().await;
    let resp = app
        .post(
            "/api/auth/login",
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert!(!body["token"].as_str().unwrap().is_empty());

    let cookie = resp.header(header::SET_COOKIE).unwrap();
    assert!(cookie.starts_with("authToken="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    let resp = app
        .post(
            "/api/auth/login",
            json!({ "email": ADMIN_EMAIL, "password": "nope" }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    let body = resp.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid credentials");

    let unknown = app
        .post(
            "/api/auth/login",
            json!({ "email": "ghost@cafe.com", "password": "whatever" }),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_then_verify_with_token() {
    let app = TestApp::new().await;
    let resp = app
        .post(
            "/api/auth/register",
            json!({ "email": "new@cafe.com", "password": "secret1", "name": "New Hire" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["user"]["role"], "employee");
    let token = body["token"].as_str().unwrap().to_string();

    let verify = app
        .send(Method::GET, "/api/auth/verify", Some(&token), None)
        .await;
    assert_eq!(verify.status, StatusCode::OK);
    assert_eq!(verify.json()["user"]["email"], "new@cafe.com");

    // The paired employee record is visible to the admin list
    let employees = app.get("/api/employees").await.json();
    let emails: Vec<_> = employees["employees"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["email"].as_str().unwrap().to_string())
        .collect();
    assert!(emails.contains(&"new@cafe.com".to_string()));
}

#[tokio::test]
async fn register_cookie_carries_issued_token() {
    let app = TestApp::new().await;
    let resp = app
        .post(
            "/api/auth/register",
            json!({ "email": "cookie@cafe.com", "password": "secret1", "name": "Cookie" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let cookie = resp.header(header::SET_COOKIE).unwrap();
    let token = resp.json()["token"].as_str().unwrap().to_string();
    assert!(cookie.starts_with(&format!("authToken={token};")));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn register_rejects_duplicates() {
    let app = TestApp::new().await;
    let resp = app
        .post(
            "/api/auth/register",
            json!({ "email": ADMIN_EMAIL, "password": "secret1", "name": "Copy" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"], "User already exists");
}

#[tokio::test]
async fn verify_requires_a_valid_token() {
    let app = TestApp::new().await;

    let missing = app.get("/api/auth/verify").await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json()["error"], "No token");

    let garbage = app
        .send(Method::GET, "/api/auth/verify", Some("garbage"), None)
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.json()["error"], "Invalid token");
}

#[tokio::test]
async fn verify_fails_once_user_is_deleted() {
    let app = TestApp::new().await;
    let employee = app.add_employee("temp@cafe.com", "Temp", "secret1").await;
    let (token, _) = app.login("temp@cafe.com", "secret1").await;

    let path = format!("/api/employees/{}", employee["id"].as_str().unwrap());
    let deleted = app.send(Method::DELETE, &path, None, None).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let verify = app
        .send(Method::GET, "/api/auth/verify", Some(&token), None)
        .await;
    assert_eq!(verify.status, StatusCode::UNAUTHORIZED);
    assert_eq!(verify.json()["error"], "User not found");
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = TestApp::new().await;
    let resp = app.send(Method::POST, "/api/auth/logout", None, None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["success"], true);
    assert!(resp.header(header::SET_COOKIE).unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn reset_password_flow() {
    let app = TestApp::new().await;
    app.add_employee("ana@cafe.com", "Ana", "secret1").await;

    let wrong = app
        .post(
            "/api/auth/reset-password",
            json!({ "email": "ana@cafe.com", "currentPassword": "bad", "newPassword": "next12" }),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong.json()["error"], "Current password is incorrect");

    let missing = app
        .post(
            "/api/auth/reset-password",
            json!({ "email": "ghost@cafe.com", "currentPassword": "x", "newPassword": "next12" }),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let ok = app
        .post(
            "/api/auth/reset-password",
            json!({ "email": "ana@cafe.com", "currentPassword": "secret1", "newPassword": "next12" }),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.json()["message"], "Password reset successfully");

    app.login("ana@cafe.com", "next12").await;
    let old = app
        .post(
            "/api/auth/login",
            json!({ "email": "ana@cafe.com", "password": "secret1" }),
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn blocked_employee_cannot_log_in() {
    let app = TestApp::new().await;
    let employee = app.add_employee("bo@cafe.com", "Bo", "secret1").await;
    let path = format!("/api/employees/{}/block", employee["id"].as_str().unwrap());
    assert_eq!(
        app.send(Method::PATCH, &path, None, None).await.status,
        StatusCode::OK
    );

    let resp = app
        .post(
            "/api/auth/login",
            json!({ "email": "bo@cafe.com", "password": "secret1" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json()["code"], 1007);
}

#[tokio::test]
async fn malformed_json_body_is_a_validation_error() {
    let app = TestApp::new().await;
    let request = http::Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let resp = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ping_and_health() {
    let app = TestApp::new().await;
    let ping = app.get("/api/ping").await;
    assert_eq!(ping.status, StatusCode::OK);
    assert_eq!(ping.json()["message"], "ping");

    let health = app.get("/health").await;
    assert_eq!(health.json()["status"], "ok");
}
