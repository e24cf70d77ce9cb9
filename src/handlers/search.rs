use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use tower_cookies::Cookies;

use crate::{
    error::Result,
    flash::{self, Flash},
    models::session::Session,
    pages,
    services::search::{self, UploadKind},
    state::AppState,
    validation::upload::{allowed_file, sanitize_filename},
};

/// Renders the main dashboard with the two upload forms.
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    cookies: Cookies,
) -> Html<String> {
    let pending = flash::take(&cookies, &state.config.cookie_key);
    Html(pages::dashboard_page(&session.username, pending.as_ref()))
}

/// Pulls the named file field out of a multipart body.
///
/// Returns `None` when the field is absent; an empty filename is reported
/// as `Some` with an empty name so the caller can flash the same message
/// the absent case gets.
async fn read_upload_field(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Option<(String, Vec<u8>)>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?.to_vec();
        return Ok(Some((filename, bytes)));
    }
    Ok(None)
}

/// Handles a query-face upload and renders placeholder matches.
#[axum::debug_handler]
pub async fn search_image(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    cookies: Cookies,
    mut multipart: Multipart,
) -> Result<Response> {
    tracing::info!("🔍 Image search requested by user: {}", session.user_id);

    let upload = read_upload_field(&mut multipart, "query_image").await?;

    let (filename, bytes) = match upload {
        Some((name, bytes)) if !name.is_empty() => (name, bytes),
        _ => {
            return Ok(warn_redirect(
                &state,
                &cookies,
                "Please choose a sketch or photo to upload.",
            ));
        }
    };

    if !allowed_file(&filename, UploadKind::Image.allowed_extensions()) {
        return Ok(warn_redirect(
            &state,
            &cookies,
            "Unsupported image type. Please upload a JPG or PNG.",
        ));
    }

    let Some(saved_name) = sanitize_filename(&filename) else {
        return Ok(warn_redirect(
            &state,
            &cookies,
            "Please choose a sketch or photo to upload.",
        ));
    };

    search::save_upload(&state.config.upload_root, UploadKind::Image, &saved_name, &bytes).await?;

    let query_image_url = format!("/static/uploads/images/{}", saved_name);

    Ok(Html(pages::image_results_page(&query_image_url, search::image_matches())).into_response())
}

/// Handles a CCTV/video upload and renders a placeholder match timeline.
#[axum::debug_handler]
pub async fn search_video(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    cookies: Cookies,
    mut multipart: Multipart,
) -> Result<Response> {
    tracing::info!("🎞️  Video search requested by user: {}", session.user_id);

    let upload = read_upload_field(&mut multipart, "video_file").await?;

    let (filename, bytes) = match upload {
        Some((name, bytes)) if !name.is_empty() => (name, bytes),
        _ => {
            return Ok(warn_redirect(
                &state,
                &cookies,
                "Please choose a CCTV/video file to upload.",
            ));
        }
    };

    if !allowed_file(&filename, UploadKind::Video.allowed_extensions()) {
        return Ok(warn_redirect(
            &state,
            &cookies,
            "Unsupported video type. Please upload MP4 / AVI / MOV / MKV.",
        ));
    }

    let Some(saved_name) = sanitize_filename(&filename) else {
        return Ok(warn_redirect(
            &state,
            &cookies,
            "Please choose a CCTV/video file to upload.",
        ));
    };

    search::save_upload(&state.config.upload_root, UploadKind::Video, &saved_name, &bytes).await?;

    Ok(Html(pages::video_results_page(&saved_name, search::video_matches())).into_response())
}

fn warn_redirect(state: &AppState, cookies: &Cookies, message: &str) -> Response {
    flash::set(cookies, &state.config.cookie_key, Flash::warning(message));
    Redirect::to("/").into_response()
}
