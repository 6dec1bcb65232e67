//! Admin dashboard

use shared::models::{DashboardStats, Document, Employee};

use super::filter::DocumentFilter;
use super::pagination;
use super::upload::{UploadOutcome, UploadQueue, submit_queue};
use crate::api::{DocVaultClient, Viewer};
use crate::client::{FileBody, HttpClient};
use crate::session::Session;
use crate::{ClientError, ClientResult};

pub const MIN_PASSWORD_LEN: usize = 6;

pub struct AdminDashboard<C> {
    client: DocVaultClient<C>,
    session: Session,
    employees: Vec<Employee>,
    stats: DashboardStats,
    documents: Vec<Document>,
    pub filter: DocumentFilter,
    pub show_more: bool,
    pub queue: UploadQueue,
}

impl<C: HttpClient> AdminDashboard<C> {
    pub async fn open(client: DocVaultClient<C>, session: Session) -> ClientResult<Self> {
        if !session.is_admin() {
            return Err(ClientError::Forbidden(
                "Admin dashboard requires an admin session".into(),
            ));
        }
        client.set_token(Some(session.token.clone())).await;
        let mut dashboard = Self {
            client,
            session,
            employees: Vec::new(),
            stats: DashboardStats::default(),
            documents: Vec::new(),
            filter: DocumentFilter::default(),
            show_more: false,
            queue: UploadQueue::new(),
        };
        dashboard.reload().await?;
        Ok(dashboard)
    }

    /// Employees, stats and every document, fetched concurrently
    pub async fn reload(&mut self) -> ClientResult<()> {
        let viewer = Viewer::admin();
        let (employees, stats, documents) = tokio::try_join!(
            self.client.list_employees(),
            self.client.dashboard_stats(),
            self.client.list_documents(&viewer),
        )?;
        self.employees = employees;
        self.stats = stats;
        self.documents = documents;
        Ok(())
    }

    pub async fn refresh_stats(&mut self) -> ClientResult<()> {
        self.stats = self.client.dashboard_stats().await?;
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn client(&self) -> &DocVaultClient<C> {
        &self.client
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn filtered(&self) -> Vec<Document> {
        self.filter.apply(&self.documents)
    }

    pub fn visible(&self) -> Vec<Document> {
        let filtered = self.filtered();
        pagination::visible(&filtered, self.show_more).to_vec()
    }

    // ==================== Employees ====================

    /// Create an account; the new employee is appended to the list.
    pub async fn add_employee(
        &mut self,
        email: &str,
        name: &str,
        password: &str,
    ) -> ClientResult<Employee> {
        if email.trim().is_empty() || name.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Please fill all fields (Email, Name, and Password)".into(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(
                "Password must be at least 6 characters".into(),
            ));
        }
        let employee = self.client.add_employee(email, name, password).await?;
        self.employees.push(employee.clone());
        Ok(employee)
    }

    pub async fn block_employee(&mut self, id: &str) -> ClientResult<()> {
        let updated = self.client.block_employee(id).await?;
        self.replace_employee(updated);
        Ok(())
    }

    pub async fn unblock_employee(&mut self, id: &str) -> ClientResult<()> {
        let updated = self.client.unblock_employee(id).await?;
        self.replace_employee(updated);
        Ok(())
    }

    pub async fn delete_employee(&mut self, id: &str) -> ClientResult<()> {
        self.client.delete_employee(id).await?;
        self.employees.retain(|e| e.id != id);
        Ok(())
    }

    fn replace_employee(&mut self, updated: Employee) {
        if let Some(slot) = self.employees.iter_mut().find(|e| e.id == updated.id) {
            *slot = updated;
        }
    }

    // ==================== Documents ====================

    pub async fn delete_document(&mut self, id: &str) -> ClientResult<()> {
        self.client.delete_document(id, &Viewer::admin()).await?;
        self.documents.retain(|d| d.id != id);
        Ok(())
    }

    pub async fn download(&self, id: &str) -> ClientResult<FileBody> {
        self.client.download_document(id).await
    }

    pub async fn submit_uploads(&mut self) -> ClientResult<UploadOutcome> {
        let outcome = submit_queue(&self.client, &self.session.user, &mut self.queue).await?;
        let mut documents = outcome.documents.clone();
        documents.append(&mut self.documents);
        self.documents = documents;
        Ok(outcome)
    }
}
