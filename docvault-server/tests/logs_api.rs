mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;

async fn log(app: &TestApp, action: &str) {
    let resp = app
        .post(
            "/api/logs/activity",
            json!({
                "userId": "9", "userName": "Ana", "action": action,
                "documentName": "report.pdf",
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({ "success": true }));
}

#[tokio::test]
async fn append_requires_fields() {
    let app = TestApp::new().await;
    let resp = app
        .post("/api/logs/activity", json!({ "userId": "9", "action": "upload" }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"], "Missing required fields");
}

#[tokio::test]
async fn append_rejects_non_numeric_ids() {
    let app = TestApp::new().await;
    let bad_user = app
        .post(
            "/api/logs/activity",
            json!({ "userId": "ana", "userName": "Ana", "action": "view" }),
        )
        .await;
    assert_eq!(bad_user.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_user.json()["error"], "Invalid userId");

    let bad_doc = app
        .post(
            "/api/logs/activity",
            json!({ "userId": "9", "userName": "Ana", "action": "view", "documentId": "doc-1" }),
        )
        .await;
    assert_eq!(bad_doc.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_doc.json()["error"], "Invalid documentId");

    let logs = app.get("/api/logs/activity").await.json();
    assert!(logs["logs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn recent_activity_is_newest_first_and_limited() {
    let app = TestApp::new().await;
    for action in ["login", "upload", "download"] {
        log(&app, action).await;
    }

    let body = app.get("/api/logs/activity").await.json();
    let actions: Vec<_> = body["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["action"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(actions, ["download", "upload", "login"]);
    assert_eq!(body["logs"][0]["documentName"], "report.pdf");

    let limited = app.get("/api/logs/activity?limit=2").await.json();
    assert_eq!(limited["logs"].as_array().unwrap().len(), 2);

    let clamped = app.get("/api/logs/activity?limit=0").await.json();
    assert_eq!(clamped["logs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn dashboard_stats_are_consistent() {
    let app = TestApp::new().await;
    log(&app, "upload").await;
    log(&app, "upload").await;
    log(&app, "login").await;

    let resp = app
        .post(
            "/api/documents/upload",
            json!({
                "filename": "a.txt", "userId": "9", "userName": "Ana",
                "title": "A", "size": 1500,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let body = app.get("/api/dashboard/stats").await.json();
    let stats = &body["stats"];
    assert_eq!(body["success"], true);
    assert_eq!(stats["totalUploads"], 2);
    assert_eq!(stats["totalSize"], 1500);
    assert_eq!(stats["activeEmployees"], 1);

    let total = stats["totalUploads"].as_i64().unwrap();
    let month = stats["monthUploads"].as_i64().unwrap();
    let today = stats["todayUploads"].as_i64().unwrap();
    assert!(total >= month && month >= today);
}
