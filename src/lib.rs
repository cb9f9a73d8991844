//! Client core for the share-places API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` tracks in-flight requests and their loading/error state, `form`
//! aggregates per-input validity, `auth` holds the shared session, and `api`
//! expresses the REST calling contract on top of `http`. `auth_flow` ties the
//! three together the way the login/signup screen does.

pub mod api;
pub mod auth;
pub mod auth_flow;
pub mod config;
pub mod error;
pub mod form;
pub mod http;

pub use auth::{AuthContext, AuthSession};
pub use config::ClientConfig;
pub use error::ErrorCode;
pub use form::{FormHook, FormState, InputState, InputValue};
pub use http::{HttpHandle, HttpHook, RequestError, RequestSpec, RequestState};
