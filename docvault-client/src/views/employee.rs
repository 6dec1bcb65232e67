//! Employee dashboard

use shared::models::{Document, Role};

use super::filter::DocumentFilter;
use super::pagination;
use super::upload::{UploadOutcome, UploadQueue, submit_queue};
use crate::api::{DocVaultClient, Viewer};
use crate::client::{FileBody, HttpClient};
use crate::session::Session;
use crate::{ClientError, ClientResult};

pub struct EmployeeDashboard<C> {
    client: DocVaultClient<C>,
    session: Session,
    documents: Vec<Document>,
    pub filter: DocumentFilter,
    pub show_more: bool,
    pub queue: UploadQueue,
}

impl<C: HttpClient> EmployeeDashboard<C> {
    /// Admin sessions belong on the admin dashboard.
    pub async fn open(client: DocVaultClient<C>, session: Session) -> ClientResult<Self> {
        if session.role() != Role::Employee {
            return Err(ClientError::Forbidden(
                "Employee dashboard requires an employee session".into(),
            ));
        }
        client.set_token(Some(session.token.clone())).await;
        let mut dashboard = Self {
            client,
            session,
            documents: Vec::new(),
            filter: DocumentFilter::default(),
            show_more: false,
            queue: UploadQueue::new(),
        };
        dashboard.reload().await?;
        Ok(dashboard)
    }

    pub async fn reload(&mut self) -> ClientResult<()> {
        self.documents = self
            .client
            .list_documents(&Viewer::for_user(&self.session.user))
            .await?;
        tracing::debug!(count = self.documents.len(), "Loaded documents");
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn client(&self) -> &DocVaultClient<C> {
        &self.client
    }

    /// Documents as loaded, before filtering
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Filtered, newest first
    pub fn filtered(&self) -> Vec<Document> {
        self.filter.apply(&self.documents)
    }

    /// Rows for the table: collapsed to the first few unless `show_more`
    pub fn visible(&self) -> Vec<Document> {
        let filtered = self.filtered();
        pagination::visible(&filtered, self.show_more).to_vec()
    }

    /// Deleting is reserved for admins
    pub fn can_delete(&self) -> bool {
        self.session.is_admin()
    }

    /// Submit the queue; created documents go to the top of the list.
    pub async fn submit_uploads(&mut self) -> ClientResult<UploadOutcome> {
        let outcome = submit_queue(&self.client, &self.session.user, &mut self.queue).await?;
        let mut documents = outcome.documents.clone();
        documents.append(&mut self.documents);
        self.documents = documents;
        Ok(outcome)
    }

    pub async fn download(&self, id: &str) -> ClientResult<FileBody> {
        self.client.download_document(id).await
    }
}
