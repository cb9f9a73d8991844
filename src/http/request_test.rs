use super::*;

fn build(spec: RequestSpec) -> reqwest::Request {
    spec.into_builder(&reqwest::Client::new()).unwrap().build().unwrap()
}

#[test]
fn defaults_to_get_without_body() {
    let spec = RequestSpec::get("http://localhost:8080/api/users");
    assert_eq!(spec.method, Method::GET);
    assert_eq!(spec.body, RequestBody::Empty);
    assert!(spec.headers.is_empty());

    let request = build(spec);
    assert_eq!(request.method(), Method::GET);
    assert!(request.body().is_none());
}

#[test]
fn json_body_sets_content_type() {
    let spec = RequestSpec::post("http://localhost:8080/api/users/login")
        .json(serde_json::json!({ "email": "a@b.com", "password": "secret" }));
    let request = build(spec);

    assert_eq!(request.headers()["content-type"], "application/json");
    let bytes = request.body().and_then(reqwest::Body::as_bytes).unwrap();
    let sent: serde_json::Value = serde_json::from_slice(bytes).unwrap();
    assert_eq!(sent["email"], "a@b.com");
}

#[test]
fn bearer_adds_authorization_header() {
    let request = build(RequestSpec::delete("http://localhost:8080/api/places/p1").bearer("t1"));
    assert_eq!(request.method(), Method::DELETE);
    assert_eq!(request.headers()["authorization"], "Bearer t1");
}

#[test]
fn fields_switch_body_to_multipart() {
    let spec = RequestSpec::post("http://localhost:8080/api/users/signup")
        .text_field("name", "Ada")
        .file_field("image", FileUpload::new("a.png", "image/png", vec![1, 2, 3]));

    match &spec.body {
        RequestBody::Multipart(fields) => {
            assert_eq!(fields.len(), 2);
            assert!(matches!(&fields[0], MultipartField::Text { name, value } if name == "name" && value == "Ada"));
            assert!(matches!(&fields[1], MultipartField::File { name, .. } if name == "image"));
        }
        other => panic!("expected multipart body, got {other:?}"),
    }

    let request = build(spec);
    let content_type = request.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
}

#[test]
fn invalid_header_name_is_rejected() {
    let spec = RequestSpec::get("http://localhost:8080/").header("bad header", "x");
    let err = spec.into_builder(&reqwest::Client::new()).unwrap_err();
    assert!(matches!(err, RequestError::InvalidRequest(_)));
}

#[test]
fn invalid_mime_is_rejected() {
    let spec = RequestSpec::post("http://localhost:8080/")
        .file_field("image", FileUpload::new("a.bin", "not a mime", vec![0]));
    let err = spec.into_builder(&reqwest::Client::new()).unwrap_err();
    assert!(matches!(err, RequestError::InvalidRequest(_)));
}

#[test]
fn mime_is_inferred_from_extension() {
    assert_eq!(mime_for_extension(Some("PNG")), "image/png");
    assert_eq!(mime_for_extension(Some("jpeg")), "image/jpeg");
    assert_eq!(mime_for_extension(None), "application/octet-stream");
}

#[tokio::test]
async fn from_path_reads_file_and_name() {
    let path = std::env::temp_dir().join(format!("share-places-{}.png", uuid::Uuid::new_v4()));
    tokio::fs::write(&path, [9_u8, 8, 7]).await.unwrap();

    let upload = FileUpload::from_path(&path).await.unwrap();
    assert_eq!(upload.bytes, vec![9, 8, 7]);
    assert_eq!(upload.mime, "image/png");
    assert!(upload.file_name.ends_with(".png"));

    tokio::fs::remove_file(&path).await.unwrap();
}
