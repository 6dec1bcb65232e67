//! Dashboard view-models
//!
//! Each dashboard holds what it loaded from the server and filters, sorts
//! and paginates locally before display.

pub mod admin;
pub mod employee;
pub mod filter;
pub mod pagination;
pub mod reset;
pub mod upload;

pub use admin::AdminDashboard;
pub use employee::EmployeeDashboard;
pub use filter::DocumentFilter;
pub use reset::ResetPasswordForm;
pub use upload::{PendingFile, UploadOutcome, UploadQueue};

use crate::ClientResult;
use crate::api::DocVaultClient;
use crate::client::HttpClient;
use crate::session::{Session, SessionStore};

/// Log in and persist the session. The caller picks the dashboard from
/// [`Session::role`].
pub async fn login<C: HttpClient>(
    client: &DocVaultClient<C>,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> ClientResult<Session> {
    let session = Session::from(client.login(email, password).await?);
    store.save(&session)?;
    tracing::info!(user = %session.user.email, role = %session.role(), "Login successful");
    Ok(session)
}

/// Restore a stored session, dropping it if the server no longer accepts
/// the token.
pub async fn resume<C: HttpClient>(
    client: &DocVaultClient<C>,
    store: &SessionStore,
) -> ClientResult<Option<Session>> {
    let Some(mut session) = store.load() else {
        return Ok(None);
    };
    client.set_token(Some(session.token.clone())).await;
    match client.verify().await {
        Ok(user) => {
            session.user = user;
            Ok(Some(session))
        }
        Err(e) if e.status() == Some(401) => {
            tracing::info!("Stored session rejected; logging out");
            client.set_token(None).await;
            store.clear()?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Forget the session locally and on the server
pub async fn logout<C: HttpClient>(
    client: &DocVaultClient<C>,
    store: &SessionStore,
) -> ClientResult<()> {
    store.clear()?;
    if let Err(e) = client.logout().await {
        tracing::warn!(error = %e, "Server logout failed");
    }
    Ok(())
}
