//! Login form

use validator::Validate;

use crate::{
    error::AppError,
    models::LoginRequest,
    router::{Navigation, Route},
    services::Services,
};

use super::user_message;

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[derive(Debug, Default)]
pub struct LoginView {
    form: LoginRequest,
    error: Option<String>,
    submitting: bool,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    pub fn email(&self) -> &str {
        &self.form.email
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Logging in..."
        } else {
            "Login"
        }
    }

    /// Submit the form. On success the session is started and the catalog
    /// follows; on failure the error is kept and the screen stays.
    pub async fn submit(&mut self, services: &Services) -> Navigation {
        self.error = None;

        if let Err(errors) = self.form.validate() {
            self.error = Some(AppError::from(errors).to_string());
            return Navigation::Stay;
        }

        self.submitting = true;
        let result = services.api.login(&self.form).await;
        self.submitting = false;

        match result {
            Ok(auth) => {
                services.session.login(auth.user, auth.token).await;
                Navigation::To(Route::Catalog)
            }
            Err(e) => {
                self.error = Some(user_message(&e, LOGIN_FAILED));
                Navigation::Stay
            }
        }
    }
}
