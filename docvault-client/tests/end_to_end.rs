//! Client against an in-process server via `OneshotHttpClient`

use docvault_client::views::{self, AdminDashboard, EmployeeDashboard, ResetPasswordForm};
use docvault_client::{ClientError, DocVaultClient, OneshotHttpClient, SessionStore, Viewer};
use docvault_server::{AppState, Config, create_router};
use shared::ErrorCode;
use shared::models::{DocumentSearchQuery, Role};

const ADMIN_EMAIL: &str = "admin@cafe.com";
const ADMIN_PASSWORD: &str = "admin123";

async fn client() -> DocVaultClient<OneshotHttpClient> {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "client-test-secret".to_string(),
        ..Config::default()
    };
    let state = AppState::new(&config).await.unwrap();
    DocVaultClient::new(OneshotHttpClient::new(create_router(state)))
}

#[tokio::test]
async fn ping_and_login() {
    let client = client().await;
    assert_eq!(client.ping().await.unwrap(), "ping");

    let auth = client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert_eq!(auth.user.role, Role::Admin);
    assert_eq!(client.token().await, Some(auth.token));
    assert_eq!(client.verify().await.unwrap().email, ADMIN_EMAIL);

    let err = client.login(ADMIN_EMAIL, "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.code(), Some(ErrorCode::InvalidCredentials));

    client.logout().await.unwrap();
    assert!(client.token().await.is_none());
}

#[tokio::test]
async fn session_survives_restart_and_logout_clears_it() {
    let client = client().await;
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path(), "session.json");

    let session = views::login(&client, &store, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap();
    client.set_token(None).await;

    let resumed = views::resume(&client, &store).await.unwrap().unwrap();
    assert_eq!(resumed.user, session.user);

    views::logout(&client, &store).await.unwrap();
    assert!(store.load().is_none());
    assert!(views::resume(&client, &store).await.unwrap().is_none());
}

#[tokio::test]
async fn employee_uploads_and_admin_manages() {
    let client = client().await;
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path(), "session.json");

    // Admin creates an employee account.
    let admin_session = views::login(&client, &store, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap();
    let mut admin = AdminDashboard::open(client.clone(), admin_session.clone())
        .await
        .unwrap();
    let weak = admin.add_employee("ana@cafe.com", "Ana", "123").await.unwrap_err();
    assert!(matches!(weak, ClientError::Validation(_)));
    let ana = admin
        .add_employee("ana@cafe.com", "Ana", "secret1")
        .await
        .unwrap();
    assert_eq!(admin.employees().len(), 2);

    // Employee uploads two files, one of them without a title.
    let ana_session = views::login(&client, &store, "ana@cafe.com", "secret1")
        .await
        .unwrap();
    let mut employee = EmployeeDashboard::open(client.clone(), ana_session)
        .await
        .unwrap();
    assert!(employee.documents().is_empty());
    assert!(!employee.can_delete());

    employee.queue.add_bytes("contract.pdf", b"%PDF-1.4 fake".to_vec());
    let photo = employee.queue.add_bytes("photo.png", vec![0x89, b'P', b'N', b'G']);
    employee.queue.set_title(photo, "");
    let err = employee.submit_uploads().await.unwrap_err();
    assert!(err.to_string().contains("Please add a title"));
    assert_eq!(employee.queue.files().len(), 2);

    employee.queue.set_title(photo, "Team photo");
    let outcome = employee.submit_uploads().await.unwrap();
    assert_eq!(outcome.documents.len(), 2);
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.summary(), "Successfully uploaded 2 documents!");
    assert!(employee.queue.is_empty());
    assert_eq!(employee.documents().len(), 2);
    assert_eq!(employee.documents()[0].title, "contract");

    let activity = client.recent_activity(Some(10)).await.unwrap();
    assert_eq!(activity[0].action, "upload");
    assert_eq!(activity[0].document_name.as_deref(), Some("2 documents"));

    // Employee filter by uploader name.
    employee.filter.user = "ANA".into();
    assert_eq!(employee.filtered().len(), 2);
    employee.filter.user = "bruno".into();
    assert!(employee.visible().is_empty());
    employee.filter.clear();

    let download = employee
        .download(&employee.documents()[0].id)
        .await
        .unwrap();
    assert_eq!(download.bytes, b"%PDF-1.4 fake");
    assert_eq!(download.filename.as_deref(), Some("contract.pdf"));

    // Admin sees everything, blocks Ana and removes a document.
    client.set_token(Some(admin_session.token.clone())).await;
    admin.reload().await.unwrap();
    assert_eq!(admin.documents().len(), 2);
    assert_eq!(admin.stats().total_uploads, 1);
    assert_eq!(admin.stats().active_employees, 2);

    admin.block_employee(&ana.id).await.unwrap();
    assert!(!admin.employees().iter().any(|e| e.id == ana.id && e.is_active));
    let blocked = client.login("ana@cafe.com", "secret1").await.unwrap_err();
    assert_eq!(blocked.code(), Some(ErrorCode::AccountDisabled));

    client.set_token(Some(admin_session.token.clone())).await;
    admin.unblock_employee(&ana.id).await.unwrap();

    let doc_id = admin.documents()[0].id.clone();
    admin.delete_document(&doc_id).await.unwrap();
    assert_eq!(admin.documents().len(), 1);
    let gone = client.get_document(&doc_id).await.unwrap_err();
    assert_eq!(gone.code(), Some(ErrorCode::DocumentNotFound));

    admin.delete_employee(&ana.id).await.unwrap();
    assert_eq!(admin.employees().len(), 1);
}

#[tokio::test]
async fn employee_dashboard_rejects_admin_session() {
    let client = client().await;
    let auth = client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    let result = EmployeeDashboard::open(client.clone(), auth.into()).await;
    assert!(matches!(result, Err(ClientError::Forbidden(_))));
}

#[tokio::test]
async fn search_and_role_query() {
    let client = client().await;
    client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    let employee = client
        .add_employee("bo@cafe.com", "Bo", "secret1")
        .await
        .unwrap();

    let mut upload = shared::models::DocumentUpload {
        filename: Some("menu.txt".into()),
        user_id: Some(employee.user_id.clone()),
        user_name: Some("Bo".into()),
        title: Some("Summer menu".into()),
        size: Some(4),
        ..Default::default()
    };
    client.upload_document(&upload).await.unwrap();
    upload.title = Some("Winter report".into());
    client.upload_document(&upload).await.unwrap();

    client.set_token(None).await;
    let hits = client
        .search_documents(
            &DocumentSearchQuery {
                query: Some("REPORT".into()),
                ..Default::default()
            },
            &Viewer::employee(employee.user_id.clone()),
        )
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Winter report");

    let denied = client
        .delete_document(&hits[0].id, &Viewer::employee(employee.user_id.clone()))
        .await
        .unwrap_err();
    assert_eq!(denied.status(), Some(403));

    let view = client.view_document(&hits[0].id).await.unwrap_err();
    assert_eq!(view.code(), Some(ErrorCode::NoFileData));
}

#[tokio::test]
async fn reset_password_form_round_trip() {
    let client = client().await;
    client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    client
        .add_employee("cy@cafe.com", "Cy", "secret1")
        .await
        .unwrap();

    let mut form = ResetPasswordForm {
        email: "cy@cafe.com".into(),
        current_password: "secret1".into(),
        new_password: "secret2".into(),
        confirm_password: "secret2".into(),
    };
    let message = form.submit(&client).await.unwrap();
    assert_eq!(message, "Password reset successfully");
    assert!(form.new_password.is_empty());

    client.login("cy@cafe.com", "secret2").await.unwrap();
    let wrong = ResetPasswordForm {
        email: "cy@cafe.com".into(),
        current_password: "nope".into(),
        new_password: "secret3".into(),
        confirm_password: "secret3".into(),
    }
    .submit(&client)
    .await
    .unwrap_err();
    assert_eq!(wrong.code(), Some(ErrorCode::IncorrectPassword));
}
