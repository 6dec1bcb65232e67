//! Password reset form

use super::admin::MIN_PASSWORD_LEN;
use crate::api::DocVaultClient;
use crate::client::HttpClient;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> ClientResult<()> {
        if self.email.trim().is_empty()
            || self.current_password.is_empty()
            || self.new_password.is_empty()
        {
            return Err(ClientError::Validation("All fields are required".into()));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(
                "New password must be at least 6 characters".into(),
            ));
        }
        if self.new_password != self.confirm_password {
            return Err(ClientError::Validation("New passwords do not match".into()));
        }
        Ok(())
    }

    /// Validate locally, then call the API. Password fields are cleared
    /// after a successful reset.
    pub async fn submit<C: HttpClient>(
        &mut self,
        client: &DocVaultClient<C>,
    ) -> ClientResult<String> {
        self.validate()?;
        let message = client
            .reset_password(self.email.trim(), &self.current_password, &self.new_password)
            .await?;
        self.current_password.clear();
        self.new_password.clear();
        self.confirm_password.clear();
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(new: &str, confirm: &str) -> ResetPasswordForm {
        ResetPasswordForm {
            email: "ana@cafe.com".into(),
            current_password: "old-pass".into(),
            new_password: new.into(),
            confirm_password: confirm.into(),
        }
    }

    fn message(err: ClientError) -> String {
        match err {
            ClientError::Validation(m) => m,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn checks_run_in_order() {
        assert_eq!(
            message(ResetPasswordForm::default().validate().unwrap_err()),
            "All fields are required"
        );
        assert_eq!(
            message(form("12345", "12345").validate().unwrap_err()),
            "New password must be at least 6 characters"
        );
        assert_eq!(
            message(form("123456", "654321").validate().unwrap_err()),
            "New passwords do not match"
        );
        assert!(form("123456", "123456").validate().is_ok());
    }
}
