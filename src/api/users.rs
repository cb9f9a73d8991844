//! Auth and user-directory calls.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use serde_json::json;

use super::types::{AuthResponse, User, UsersEnvelope};
use crate::config::ClientConfig;
use crate::http::{FileUpload, HttpHandle, RequestError, RequestSpec};

pub(crate) const LOGIN_PATH: &str = "/api/users/login";
pub(crate) const SIGNUP_PATH: &str = "/api/users/signup";
pub(crate) const USERS_PATH: &str = "/api/users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: FileUpload,
}

fn login_spec(config: &ClientConfig, credentials: &Credentials) -> RequestSpec {
    RequestSpec::post(config.endpoint(LOGIN_PATH))
        .json(json!({ "email": credentials.email, "password": credentials.password }))
}

fn signup_spec(config: &ClientConfig, form: SignupForm) -> RequestSpec {
    RequestSpec::post(config.endpoint(SIGNUP_PATH))
        .text_field("name", form.name)
        .text_field("email", form.email)
        .text_field("password", form.password)
        .file_field("image", form.image)
}

/// Log in via `POST /api/users/login` with a JSON body.
///
/// # Errors
///
/// Returns the request hook's error (server message, network, parse, cancelled).
pub async fn login(
    http: &HttpHandle,
    config: &ClientConfig,
    credentials: &Credentials,
) -> Result<AuthResponse, RequestError> {
    http.send_request(login_spec(config, credentials)).await
}

/// Sign up via `POST /api/users/signup` with a multipart body including the avatar.
///
/// # Errors
///
/// Returns the request hook's error (server message, network, parse, cancelled).
pub async fn signup(http: &HttpHandle, config: &ClientConfig, form: SignupForm) -> Result<AuthResponse, RequestError> {
    http.send_request(signup_spec(config, form)).await
}

/// Fetch every user from `GET /api/users`.
///
/// # Errors
///
/// Returns the request hook's error (server message, network, parse, cancelled).
pub async fn list_users(http: &HttpHandle, config: &ClientConfig) -> Result<Vec<User>, RequestError> {
    let envelope: UsersEnvelope = http.send_request(RequestSpec::get(config.endpoint(USERS_PATH))).await?;
    Ok(envelope.users)
}
