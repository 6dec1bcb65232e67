//! Typed DocVault API
//!
//! One method per server route. Login and register store the issued token
//! on the transport so later calls carry it as a bearer header.

use shared::models::{
    ActivityLog, ActivityLogCreate, ActivityLogListResponse, AuthResponse, BatchUploadRequest,
    BatchUploadResponse, DashboardStats, DashboardStatsResponse, Document, DocumentListResponse,
    DocumentResponse, DocumentSearchQuery, DocumentUpload, Employee, EmployeeCreate,
    EmployeeListResponse, EmployeeResponse, EmployeeUpdate, Empty, LoginRequest,
    MessageResponse, RegisterRequest, ResetPasswordRequest, Role, UserInfo, UserResponse,
};

use crate::ClientResult;
use crate::client::{FileBody, HttpClient, with_query};

/// `role` / `userId` query parameters sent on document routes.
///
/// Only honoured by servers running with `ALLOW_ROLE_QUERY`; a bearer token
/// always takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    pub role: Option<Role>,
    pub user_id: Option<String>,
}

impl Viewer {
    /// No query parameters
    pub fn none() -> Self {
        Self::default()
    }

    pub fn admin() -> Self {
        Self {
            role: Some(Role::Admin),
            user_id: None,
        }
    }

    pub fn employee(user_id: impl Into<String>) -> Self {
        Self {
            role: Some(Role::Employee),
            user_id: Some(user_id.into()),
        }
    }

    pub fn for_user(user: &UserInfo) -> Self {
        match user.role {
            Role::Admin => Self::admin(),
            Role::Employee => Self::employee(user.id.clone()),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(role) = self.role {
            params.push(("role", role.as_str().to_string()));
        }
        if let Some(user_id) = &self.user_id {
            params.push(("userId", user_id.clone()));
        }
        params
    }
}

/// DocVault API client over any [`HttpClient`] transport
#[derive(Debug, Clone)]
pub struct DocVaultClient<C> {
    http: C,
}

impl<C: HttpClient> DocVaultClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &C {
        &self.http
    }

    pub async fn token(&self) -> Option<String> {
        self.http.token().await
    }

    /// Reuse a token from a stored session
    pub async fn set_token(&self, token: Option<String>) {
        self.http.set_token(token).await;
    }

    // ==================== Health ====================

    pub async fn ping(&self) -> ClientResult<String> {
        let resp: MessageResponse = self.http.get("/api/ping").await?;
        Ok(resp.message)
    }

    pub async fn health(&self) -> ClientResult<serde_json::Value> {
        self.http.get("/health").await
    }

    // ==================== Auth ====================

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        let resp: AuthResponse = self.http.post("/api/auth/login", &body).await?;
        self.http.set_token(Some(resp.token.clone())).await;
        tracing::debug!(user = %resp.user.email, role = %resp.user.role, "Logged in");
        Ok(resp)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> ClientResult<AuthResponse> {
        let body = RegisterRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            name: Some(name.to_string()),
        };
        let resp: AuthResponse = self.http.post("/api/auth/register", &body).await?;
        self.http.set_token(Some(resp.token.clone())).await;
        Ok(resp)
    }

    /// Resolve the current token into its user
    pub async fn verify(&self) -> ClientResult<UserInfo> {
        let resp: UserResponse = self.http.get("/api/auth/verify").await?;
        Ok(resp.user)
    }

    /// Clears the local token even if the server call fails
    pub async fn logout(&self) -> ClientResult<()> {
        let result: ClientResult<Empty> = self.http.post_empty("/api/auth/logout").await;
        self.http.set_token(None).await;
        result.map(|_| ())
    }

    pub async fn reset_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> ClientResult<String> {
        let body = ResetPasswordRequest {
            email: Some(email.to_string()),
            current_password: Some(current_password.to_string()),
            new_password: Some(new_password.to_string()),
        };
        let resp: MessageResponse = self.http.post("/api/auth/reset-password", &body).await?;
        Ok(resp.message)
    }

    // ==================== Documents ====================

    pub async fn list_documents(&self, viewer: &Viewer) -> ClientResult<Vec<Document>> {
        let path = with_query("/api/documents", &viewer.params())?;
        let resp: DocumentListResponse = self.http.get(&path).await?;
        Ok(resp.documents)
    }

    pub async fn get_document(&self, id: &str) -> ClientResult<Document> {
        let resp: DocumentResponse = self.http.get(&format!("/api/documents/{id}")).await?;
        Ok(resp.document)
    }

    pub async fn search_documents(
        &self,
        query: &DocumentSearchQuery,
        viewer: &Viewer,
    ) -> ClientResult<Vec<Document>> {
        let mut params = Vec::new();
        let fields = [
            ("query", &query.query),
            ("category", &query.category),
            ("startDate", &query.start_date),
            ("endDate", &query.end_date),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                params.push((name, value.clone()));
            }
        }
        params.extend(viewer.params());
        let path = with_query("/api/documents/search/query", &params)?;
        let resp: DocumentListResponse = self.http.get(&path).await?;
        Ok(resp.documents)
    }

    pub async fn upload_document(&self, upload: &DocumentUpload) -> ClientResult<Document> {
        let resp: DocumentResponse = self.http.post("/api/documents/upload", upload).await?;
        Ok(resp.document)
    }

    pub async fn batch_upload(
        &self,
        request: &BatchUploadRequest,
    ) -> ClientResult<BatchUploadResponse> {
        self.http.post("/api/documents/batch-upload", request).await
    }

    /// Inline bytes with the stored content type
    pub async fn view_document(&self, id: &str) -> ClientResult<FileBody> {
        self.http.get_bytes(&format!("/api/documents/view/{id}")).await
    }

    /// Attachment bytes with the original filename
    pub async fn download_document(&self, id: &str) -> ClientResult<FileBody> {
        self.http
            .get_bytes(&format!("/api/documents/download/{id}"))
            .await
    }

    pub async fn delete_document(&self, id: &str, viewer: &Viewer) -> ClientResult<()> {
        let path = with_query(&format!("/api/documents/{id}"), &viewer.params())?;
        let _: Empty = self.http.delete(&path).await?;
        Ok(())
    }

    // ==================== Employees ====================

    pub async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        let resp: EmployeeListResponse = self.http.get("/api/employees").await?;
        Ok(resp.employees)
    }

    pub async fn add_employee(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> ClientResult<Employee> {
        let body = EmployeeCreate {
            email: Some(email.to_string()),
            name: Some(name.to_string()),
            password: Some(password.to_string()),
        };
        let resp: EmployeeResponse = self.http.post("/api/employees", &body).await?;
        Ok(resp.employee)
    }

    pub async fn update_employee(&self, update: &EmployeeUpdate) -> ClientResult<Employee> {
        let resp: EmployeeResponse = self.http.put("/api/employees", update).await?;
        Ok(resp.employee)
    }

    pub async fn block_employee(&self, id: &str) -> ClientResult<Employee> {
        let resp: EmployeeResponse = self
            .http
            .patch(&format!("/api/employees/{id}/block"))
            .await?;
        Ok(resp.employee)
    }

    pub async fn unblock_employee(&self, id: &str) -> ClientResult<Employee> {
        let resp: EmployeeResponse = self
            .http
            .patch(&format!("/api/employees/{id}/unblock"))
            .await?;
        Ok(resp.employee)
    }

    pub async fn delete_employee(&self, id: &str) -> ClientResult<()> {
        let _: Empty = self.http.delete(&format!("/api/employees/{id}")).await?;
        Ok(())
    }

    // ==================== Activity & stats ====================

    pub async fn log_activity(&self, entry: &ActivityLogCreate) -> ClientResult<()> {
        let _: Empty = self.http.post("/api/logs/activity", entry).await?;
        Ok(())
    }

    pub async fn recent_activity(
        &self,
        limit: Option<u32>,
    ) -> ClientResult<Vec<ActivityLog>> {
        let params: Vec<(&str, String)> =
            limit.map(|l| ("limit", l.to_string())).into_iter().collect();
        let path = with_query("/api/logs/activity", &params)?;
        let resp: ActivityLogListResponse = self.http.get(&path).await?;
        Ok(resp.logs)
    }

    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        let resp: DashboardStatsResponse = self.http.get("/api/dashboard/stats").await?;
        Ok(resp.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_params_follow_role() {
        assert!(Viewer::none().params().is_empty());
        assert_eq!(Viewer::admin().params(), [("role", "admin".to_string())]);
        assert_eq!(
            Viewer::employee("42").params(),
            [("role", "employee".to_string()), ("userId", "42".to_string())]
        );

        let user = UserInfo {
            id: "7".into(),
            email: "e@cafe.com".into(),
            name: "E".into(),
            role: Role::Employee,
        };
        assert_eq!(Viewer::for_user(&user), Viewer::employee("7"));
    }
}
