//! Wire types returned by the API.

use serde::{Deserialize, Serialize};

/// A user as listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Server-relative avatar path.
    #[serde(default)]
    pub image: String,
    /// Ids of places this user created.
    #[serde(default)]
    pub places: Vec<String>,
}

impl User {
    /// "1 place" / "N places".
    #[must_use]
    pub fn place_count_label(&self) -> String {
        match self.places.len() {
            1 => "1 place".to_string(),
            n => format!("{n} places"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Id of the owning user.
    pub creator: String,
}

/// The user part of a login/signup answer. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: AuthUser,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersEnvelope {
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlacesEnvelope {
    pub places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceEnvelope {
    pub place: Place,
}
