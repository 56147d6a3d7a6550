//! Registration form

use validator::Validate;

use crate::{
    error::AppError,
    models::RegisterRequest,
    router::{Navigation, Route},
    services::Services,
};

use super::user_message;

pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug, Default)]
pub struct RegisterView {
    form: RegisterRequest,
    error: Option<String>,
    submitting: bool,
}

impl RegisterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_firstname(&mut self, firstname: impl Into<String>) {
        self.form.firstname = firstname.into();
    }

    pub fn set_lastname(&mut self, lastname: impl Into<String>) {
        self.form.lastname = lastname.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Creating Account..."
        } else {
            "Sign Up"
        }
    }

    /// Create the account and start its session
    pub async fn submit(&mut self, services: &Services) -> Navigation {
        self.error = None;

        if let Err(errors) = self.form.validate() {
            self.error = Some(AppError::from(errors).to_string());
            return Navigation::Stay;
        }

        self.submitting = true;
        let result = services.api.register(&self.form).await;
        self.submitting = false;

        match result {
            Ok(auth) => {
                services.session.login(auth.user, auth.token).await;
                Navigation::To(Route::Catalog)
            }
            Err(e) => {
                self.error = Some(user_message(&e, REGISTRATION_FAILED));
                Navigation::Stay
            }
        }
    }
}
