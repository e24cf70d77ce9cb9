mod common;

use http::StatusCode;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn search_endpoints_require_login() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir).await;

    for path in ["/search-image", "/search-video"] {
        let response = sketchy::app(state.clone())
            .oneshot(multipart_request(
                path,
                "query_image",
                Some("face.jpg"),
                b"bytes",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), "/login", "{path}");
    }
}

#[tokio::test]
async fn missing_file_redirects_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir).await;
    let session = register_and_login(&state, "alice", "hunter2").await;

    // multipart body without the expected field at all
    let response = sketchy::app(state.clone())
        .oneshot(multipart_request(
            "/search-image",
            "unrelated",
            None,
            b"not a file",
            Some(&session),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(cookie_pair(&response, "flash")
        .unwrap()
        .contains("sketch"));

    // right field, empty filename
    let response = sketchy::app(state.clone())
        .oneshot(multipart_request(
            "/search-video",
            "video_file",
            Some(""),
            b"bytes",
            Some(&session),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(cookie_pair(&response, "flash")
        .unwrap()
        .contains("CCTV"));
}

#[tokio::test]
async fn disallowed_extensions_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir).await;
    let session = register_and_login(&state, "bob", "hunter2").await;

    for filename in ["payload.exe", "notes.txt", "face.png.exe", "noextension"] {
        let response = sketchy::app(state.clone())
            .oneshot(multipart_request(
                "/search-image",
                "query_image",
                Some(filename),
                b"whatever the content claims to be",
                Some(&session),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{filename}");
        assert_eq!(location(&response), "/", "{filename}");
        assert!(
            cookie_pair(&response, "flash")
                .unwrap()
                .contains("Unsupported"),
            "{filename}"
        );
    }

    let response = sketchy::app(state.clone())
        .oneshot(multipart_request(
            "/search-video",
            "video_file",
            Some("clip.gif"),
            b"gif bytes",
            Some(&session),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(cookie_pair(&response, "flash")
        .unwrap()
        .contains("Unsupported"));
}

#[tokio::test]
async fn valid_image_is_saved_and_matches_rendered() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir).await;
    let session = register_and_login(&state, "carol", "hunter2").await;

    let content = b"\xff\xd8\xff\xe0 not really a jpeg";
    let response = sketchy::app(state.clone())
        .oneshot(multipart_request(
            "/search-image",
            "query_image",
            Some("face sketch 01.jpg"),
            content,
            Some(&session),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // filename is sanitized on the way to disk
    let saved = std::fs::read(dir.path().join("uploads/images/face_sketch_01.jpg")).unwrap();
    assert_eq!(saved, content);

    let html = body_string(response).await;
    assert_eq!(html.matches("match-row").count(), 3);
    assert!(html.contains("Person_A"));
    assert!(html.contains("suspect_ali_1.jpg"));
    assert!(html.contains("/static/uploads/images/face_sketch_01.jpg"));
}

#[tokio::test]
async fn valid_video_is_saved_and_timeline_rendered() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir).await;
    let session = register_and_login(&state, "dave", "hunter2").await;

    let content = b"fake mp4 bytes";
    let response = sketchy::app(state.clone())
        .oneshot(multipart_request(
            "/search-video",
            "video_file",
            Some("cam 01.MP4"),
            content,
            Some(&session),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let saved = std::fs::read(dir.path().join("uploads/videos/cam_01.MP4")).unwrap();
    assert_eq!(saved, content);

    let html = body_string(response).await;
    assert_eq!(html.matches("match-row").count(), 3);
    assert!(html.contains("00:05"));
    assert!(html.contains("cam_01.MP4"));
}

#[tokio::test]
async fn path_components_in_filenames_are_stripped() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir).await;
    let session = register_and_login(&state, "erin", "hunter2").await;

    let response = sketchy::app(state.clone())
        .oneshot(multipart_request(
            "/search-image",
            "query_image",
            Some("../../escape.png"),
            b"png bytes",
            Some(&session),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // lands inside the images directory, not two levels up
    assert!(dir.path().join("uploads/images/escape.png").exists());
    assert!(!dir.path().join("escape.png").exists());
}

#[tokio::test]
async fn reupload_overwrites_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir).await;
    let session = register_and_login(&state, "frank", "hunter2").await;

    for content in [b"first".as_slice(), b"second".as_slice()] {
        let response = sketchy::app(state.clone())
            .oneshot(multipart_request(
                "/search-image",
                "query_image",
                Some("same.jpg"),
                content,
                Some(&session),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let saved = std::fs::read(dir.path().join("uploads/images/same.jpg")).unwrap();
    assert_eq!(saved, b"second");
}
