use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::http::HttpHook;

fn place_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "A tall tower",
        "image": "uploads/images/tower.png",
        "address": "20 W 34th St, New York",
        "location": { "lat": 40.748_4, "lng": -73.985_7 },
        "creator": "u1"
    })
}

async fn setup() -> (MockServer, ClientConfig, HttpHook) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(&server.uri()).unwrap();
    (server, config, HttpHook::with_client(reqwest::Client::new()))
}

#[test]
fn place_urls_format_expected_paths() {
    let config = ClientConfig::new("http://localhost:8080").unwrap();
    assert_eq!(user_places_url(&config, "u1").unwrap(), "http://localhost:8080/api/places/user/u1");
    assert_eq!(place_url(&config, "p1").unwrap(), "http://localhost:8080/api/places/p1");
}

#[test]
fn place_ids_are_percent_encoded_into_one_segment() {
    let config = ClientConfig::new("http://localhost:8080").unwrap();
    assert_eq!(
        place_url(&config, "a/b?c#d").unwrap(),
        "http://localhost:8080/api/places/a%2Fb%3Fc%23d"
    );
    assert_eq!(user_places_url(&config, "../u1").unwrap(), "http://localhost:8080/api/places/user/..%2Fu1");
}

#[tokio::test]
async fn user_places_unwraps_envelope() {
    let (server, config, hook) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/places/user/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "places": [place_json("p1", "Empire State")] })))
        .mount(&server)
        .await;

    let places = user_places(&hook, &config, "u1").await.unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].title, "Empire State");
    assert_eq!(places[0].location.map(|l| l.lat), Some(40.748_4));
}

#[tokio::test]
async fn get_place_returns_single_place() {
    let (server, config, hook) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/places/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "place": place_json("p1", "Empire State") })))
        .mount(&server)
        .await;

    let place = get_place(&hook, &config, "p1").await.unwrap();
    assert_eq!(place.id, "p1");
    assert_eq!(place.creator, "u1");
}

#[tokio::test]
async fn create_place_is_authorized_multipart() {
    let (server, config, hook) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/places"))
        .and(header("authorization", "Bearer t1"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("name=\"address\""))
        .and(body_string_contains("filename=\"tower.png\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "place": place_json("p2", "Tower") })))
        .expect(1)
        .mount(&server)
        .await;

    let place = create_place(
        &hook,
        &config,
        "t1",
        NewPlace {
            title: "Tower".into(),
            description: "A tall tower".into(),
            address: "20 W 34th St, New York".into(),
            image: FileUpload::new("tower.png", "image/png", vec![1, 2]),
        },
    )
    .await
    .unwrap();
    assert_eq!(place.id, "p2");
}

#[tokio::test]
async fn update_place_patches_title_and_description() {
    let (server, config, hook) = setup().await;
    Mock::given(method("PATCH"))
        .and(path("/api/places/p1"))
        .and(header("authorization", "Bearer t1"))
        .and(body_json(json!({ "title": "Renamed", "description": "Updated text" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "place": place_json("p1", "Renamed") })))
        .expect(1)
        .mount(&server)
        .await;

    let update = PlaceUpdate { title: "Renamed".into(), description: "Updated text".into() };
    let place = update_place(&hook, &config, "t1", "p1", &update).await.unwrap();
    assert_eq!(place.title, "Renamed");
}

#[tokio::test]
async fn delete_place_accepts_message_body() {
    let (server, config, hook) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/places/p1"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Deleted place." })))
        .expect(1)
        .mount(&server)
        .await;

    delete_place(&hook, &config, "t1", "p1").await.unwrap();
    assert_eq!(hook.error(), None);
}

#[tokio::test]
async fn unauthorized_delete_records_error() {
    let (server, config, hook) = setup().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "You are not allowed to delete this place." })))
        .mount(&server)
        .await;

    let err = delete_place(&hook, &config, "t2", "p1").await.unwrap_err();
    assert!(matches!(err, RequestError::Server { status: 403, .. }));
    assert_eq!(hook.error().as_deref(), Some("You are not allowed to delete this place."));
}
