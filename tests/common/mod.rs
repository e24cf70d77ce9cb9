#![allow(dead_code)]

use axum::body::Body;
use http::{header, Request, Response, StatusCode};
use tower::ServiceExt;

use sketchy::config::{derive_cookie_key, Config};
use sketchy::state::AppState;

/// Builds an `AppState` backed by a throwaway database and upload root
/// inside the given temp directory.
pub async fn test_state(dir: &tempfile::TempDir) -> AppState {
    let config = Config {
        database_url: format!("sqlite:{}", dir.path().join("test.db").display()),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        upload_root: dir.path().join("uploads"),
        session_duration_days: 7,
        cookie_key: derive_cookie_key("integration-test-secret"),
    };

    AppState::new(&config).await.unwrap()
}

pub fn get_request(path: &str, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form_request(path: &str, body: &str, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Builds a multipart POST carrying a single field. With `filename` set the
/// field is a file part; without it, a plain text field.
pub fn multipart_request(
    path: &str,
    field_name: &str,
    filename: Option<&str>,
    content: &[u8],
    cookies: Option<&str>,
) -> Request<Body> {
    let boundary = "test-boundary-7MA4YWxkTrZu0gW";
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    match filename {
        Some(name) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field_name}\"\r\n\r\n").as_bytes(),
        ),
    }
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        );
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Finds a `Set-Cookie` header for `name` and returns its `name=value`
/// pair, attributes stripped.
pub fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).trim())
        .find(|pair| pair.starts_with(&format!("{name}=")))
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Registers a user and logs in, returning the session cookie pair.
pub async fn register_and_login(state: &AppState, username: &str, password: &str) -> String {
    let body = format!("username={username}&password={password}&confirm_password={password}");
    let response = sketchy::app(state.clone())
        .oneshot(form_request("/register", &body, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let body = format!("username={username}&password={password}");
    let response = sketchy::app(state.clone())
        .oneshot(form_request("/login", &body, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    cookie_pair(&response, "session_id").expect("login should set a session cookie")
}
