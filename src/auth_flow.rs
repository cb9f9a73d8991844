//! Login/signup flow: one form that switches between two input sets and
//! writes the resulting session into the shared auth context.
//!
//! DESIGN
//! ======
//! Login mode tracks `email` and `password`. Signup adds `name` and `image`.
//! Switching modes replaces the input set wholesale, so the aggregate
//! validity is supplied explicitly instead of recomputed.

#[cfg(test)]
#[path = "auth_flow_test.rs"]
mod auth_flow_test;

use crate::api::users::{self, Credentials, SignupForm};
use crate::auth::{AuthContext, AuthSession};
use crate::config::ClientConfig;
use crate::error::ErrorCode;
use crate::form::{FormHook, InputState, InputValue, inputs};
use crate::http::{HttpHandle, RequestError};

pub const NAME: &str = "name";
pub const IMAGE: &str = "image";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    /// Submit attempted while some input is invalid.
    #[error("form has invalid inputs")]
    FormInvalid,

    /// A required input is absent or holds the wrong kind of value.
    #[error("missing input '{0}'")]
    MissingInput(&'static str),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl AuthFlowError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_cancelled())
    }
}

impl ErrorCode for AuthFlowError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FormInvalid => "E_FORM_INVALID",
            Self::MissingInput(_) => "E_MISSING_INPUT",
            Self::Request(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(e) if e.retryable())
    }
}

#[derive(Debug, Clone)]
pub struct AuthFlow {
    mode: AuthMode,
    form: FormHook,
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthFlow {
    #[must_use]
    pub fn new() -> Self {
        let form = FormHook::new(inputs([(EMAIL, InputState::blank()), (PASSWORD, InputState::blank())]), false);
        Self { mode: AuthMode::Login, form }
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub fn form(&self) -> &FormHook {
        &self.form
    }

    pub fn input_handler(&mut self, id: &str, value: impl Into<InputValue>, is_valid: bool) {
        self.form.input_handler(id, value, is_valid);
    }

    /// Label of the submit action for the current mode.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "LOGIN",
            AuthMode::Signup => "SIGNUP",
        }
    }

    pub fn toggle_mode(&mut self) {
        let state = self.form.state();
        match self.mode {
            AuthMode::Signup => {
                let mut remaining = state.inputs.clone();
                remaining.remove(NAME);
                remaining.remove(IMAGE);
                let validity = state.is_input_valid(EMAIL) && state.is_input_valid(PASSWORD);
                self.form.set_form_data(remaining, validity);
                self.mode = AuthMode::Login;
            }
            AuthMode::Login => {
                let mut extended = state.inputs.clone();
                extended.insert(NAME.to_string(), InputState::blank());
                extended.insert(IMAGE.to_string(), InputState::blank());
                self.form.set_form_data(extended, false);
                self.mode = AuthMode::Signup;
            }
        }
        tracing::debug!(mode = ?self.mode, "auth mode switched");
    }

    /// Submit the current form and, on success, log the user in.
    ///
    /// # Errors
    ///
    /// `FormInvalid` before any request is sent; otherwise the request error.
    /// A cancelled request leaves the auth context untouched.
    pub async fn submit(
        &self,
        http: &HttpHandle,
        config: &ClientConfig,
        auth: &AuthContext,
    ) -> Result<AuthSession, AuthFlowError> {
        let state = self.form.state();
        if !state.is_valid {
            return Err(AuthFlowError::FormInvalid);
        }

        let email = state.text(EMAIL).ok_or(AuthFlowError::MissingInput(EMAIL))?.to_string();
        let password = state.text(PASSWORD).ok_or(AuthFlowError::MissingInput(PASSWORD))?.to_string();

        let response = match self.mode {
            AuthMode::Login => users::login(http, config, &Credentials { email, password }).await?,
            AuthMode::Signup => {
                let name = state.text(NAME).ok_or(AuthFlowError::MissingInput(NAME))?.to_string();
                let image = state.file(IMAGE).ok_or(AuthFlowError::MissingInput(IMAGE))?.clone();
                users::signup(http, config, SignupForm { name, email, password, image }).await?
            }
        };

        auth.login(response.user.id, response.token);
        Ok(auth.session())
    }
}
