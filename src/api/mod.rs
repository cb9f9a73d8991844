//! REST calling contract for the share-places API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `users` covers auth and the user directory, `places` the place listings,
//! and `types` the wire schema. Every call goes through an `HttpHandle`, so
//! loading/error state and cancellation come from the request hook.

pub mod places;
pub mod types;
pub mod users;

pub use types::{AuthResponse, AuthUser, Location, Place, User};
