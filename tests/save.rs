use std::fs;

use burphttp::{Error, HttpResponse};

fn response(body: &str) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_reason: "OK".to_string(),
        headers: [("Content-Type", "text/html")].into_iter().collect(),
        body: body.to_string(),
    }
}

#[test]
fn save_response_writes_full_text_and_creates_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("2024").join("resp.txt");
    response("<p>hi</p>").save_response(&path);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "HTTP/1.1 200 OK\nContent-Type: text/html\n\n<p>hi</p>"
    );
}

#[test]
fn save_empty_body_writes_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("body.html");
    let resp = response("");
    resp.save_response_body(&path);
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    assert!(resp.to_raw().ends_with("text/html\n\n"));
}

#[test]
fn save_failure_is_swallowed() {
    let dir = tempfile::tempdir().unwrap();
    // The target is an existing directory, so the write fails
    let resp = response("body");
    resp.save_response(dir.path());
    resp.save_response_body(dir.path());
    assert!(matches!(resp.try_save(dir.path()), Err(Error::Persistence(_))));
    assert!(matches!(resp.try_save_body(dir.path()), Err(Error::Persistence(_))));
    assert_eq!(resp.body, "body");
}
