//! Place listing calls. Mutating calls require the session token.

#[cfg(test)]
#[path = "places_test.rs"]
mod places_test;

use serde_json::json;

use super::types::{Place, PlaceEnvelope, PlacesEnvelope};
use crate::config::ClientConfig;
use crate::http::{FileUpload, HttpHandle, RequestError, RequestSpec};

const PLACES_PATH: &str = "/api/places";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlace {
    pub title: String,
    pub description: String,
    pub address: String,
    pub image: FileUpload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceUpdate {
    pub title: String,
    pub description: String,
}

/// Absolute URL under `/api/places` with each segment percent-encoded, so
/// ids containing `/`, `?` or `#` stay inside their segment.
fn places_url(config: &ClientConfig, segments: &[&str]) -> Result<String, RequestError> {
    let mut url = reqwest::Url::parse(&config.endpoint(PLACES_PATH))
        .map_err(|e| RequestError::InvalidRequest(format!("places url: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| RequestError::InvalidRequest("api url cannot carry a path".into()))?
        .extend(segments);
    Ok(url.into())
}

fn user_places_url(config: &ClientConfig, user_id: &str) -> Result<String, RequestError> {
    places_url(config, &["user", user_id])
}

fn place_url(config: &ClientConfig, place_id: &str) -> Result<String, RequestError> {
    places_url(config, &[place_id])
}

/// Places created by `user_id`.
///
/// # Errors
///
/// Returns the request hook's error (server message, network, parse, cancelled).
pub async fn user_places(
    http: &HttpHandle,
    config: &ClientConfig,
    user_id: &str,
) -> Result<Vec<Place>, RequestError> {
    let envelope: PlacesEnvelope = http
        .send_request(RequestSpec::get(user_places_url(config, user_id)?))
        .await?;
    Ok(envelope.places)
}

/// Fetch one place, e.g. to prefill the edit form.
///
/// # Errors
///
/// Returns the request hook's error (server message, network, parse, cancelled).
pub async fn get_place(
    http: &HttpHandle,
    config: &ClientConfig,
    place_id: &str,
) -> Result<Place, RequestError> {
    let envelope: PlaceEnvelope = http
        .send_request(RequestSpec::get(place_url(config, place_id)?))
        .await?;
    Ok(envelope.place)
}

/// Create a place via multipart `POST /api/places`.
///
/// # Errors
///
/// Returns the request hook's error (server message, network, parse, cancelled).
pub async fn create_place(
    http: &HttpHandle,
    config: &ClientConfig,
    token: &str,
    place: NewPlace,
) -> Result<Place, RequestError> {
    let spec = RequestSpec::post(config.endpoint(PLACES_PATH))
        .bearer(token)
        .text_field("title", place.title)
        .text_field("description", place.description)
        .text_field("address", place.address)
        .file_field("image", place.image);
    let envelope: PlaceEnvelope = http.send_request(spec).await?;
    Ok(envelope.place)
}

/// Edit title and description via `PATCH /api/places/{id}`.
///
/// # Errors
///
/// Returns the request hook's error (server message, network, parse, cancelled).
pub async fn update_place(
    http: &HttpHandle,
    config: &ClientConfig,
    token: &str,
    place_id: &str,
    update: &PlaceUpdate,
) -> Result<Place, RequestError> {
    let spec = RequestSpec::patch(place_url(config, place_id)?)
        .bearer(token)
        .json(json!({ "title": update.title, "description": update.description }));
    let envelope: PlaceEnvelope = http.send_request(spec).await?;
    Ok(envelope.place)
}

/// Delete a place. Any success body is ignored.
///
/// # Errors
///
/// Returns the request hook's error (server message, network, parse, cancelled).
pub async fn delete_place(
    http: &HttpHandle,
    config: &ClientConfig,
    token: &str,
    place_id: &str,
) -> Result<(), RequestError> {
    let spec = RequestSpec::delete(place_url(config, place_id)?).bearer(token);
    let _: serde_json::Value = http.send_request(spec).await?;
    Ok(())
}
