use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_cookies::cookie::time::Duration;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    flash::{self, Flash},
    models::session::Session,
    pages,
    services::auth as auth_service,
    state::AppState,
    validation::auth::validate_username,
};

/// The form payload for user login.
#[derive(Deserialize, Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// The form payload for user registration.
#[derive(Deserialize, Debug)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Creates the session cookie.
fn session_cookie(session_id: Uuid, max_age_days: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new("session_id", session_id.to_string());

    let is_production =
        std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()) == "production";

    cookie.set_http_only(true);
    if is_production {
        cookie.set_secure(true);
    }
    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::seconds(max_age_days * 86400));
    cookie.set_path("/");

    cookie
}

/// Queues a flash message and redirects; the common shape of every
/// user-facing failure in the app.
fn flash_redirect(state: &AppState, cookies: &Cookies, message: Flash, to: &str) -> Response {
    flash::set(cookies, &state.config.cookie_key, message);
    Redirect::to(to).into_response()
}

/// Renders the login form.
pub async fn login_page(State(state): State<AppState>, cookies: Cookies) -> Html<String> {
    let pending = flash::take(&cookies, &state.config.cookie_key);
    Html(pages::login_page(pending.as_ref()))
}

/// Handles a login attempt.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(payload): Form<LoginForm>,
) -> Result<Response> {
    let username = payload.username.trim().to_string();
    let password = payload.password.trim().to_string();

    tracing::info!("🔐 Login attempt for: {}", username);

    let user = match auth_service::authenticate_user(&state.db, &username, &password).await {
        Ok(user) => user,
        Err(AppError::Authentication(message)) => {
            return Ok(flash_redirect(
                &state,
                &cookies,
                Flash::danger(message),
                "/login",
            ));
        }
        Err(e) => return Err(e),
    };

    let session_id = Uuid::new_v4();
    let session = Session {
        user_id: user.id,
        username: user.username.clone(),
        created_at: Utc::now(),
        expires_at: Utc::now() + chrono::Duration::days(state.config.session_duration_days),
    };
    state.sessions.insert(session_id, session).await;

    cookies.add(session_cookie(
        session_id,
        state.config.session_duration_days,
    ));

    tracing::info!("✅ User logged in: {}", user.id);

    Ok(flash_redirect(
        &state,
        &cookies,
        Flash::success("Logged in successfully."),
        "/",
    ))
}

/// Renders the registration form.
pub async fn register_page(State(state): State<AppState>, cookies: Cookies) -> Html<String> {
    let pending = flash::take(&cookies, &state.config.cookie_key);
    Html(pages::register_page(pending.as_ref()))
}

/// Handles a registration attempt.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(payload): Form<RegisterForm>,
) -> Result<Response> {
    let username = payload.username.trim().to_string();
    let password = payload.password.trim().to_string();
    let confirm_password = payload.confirm_password.trim().to_string();

    tracing::info!("📝 Register attempt for: {}", username);

    if username.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Ok(flash_redirect(
            &state,
            &cookies,
            Flash::danger("All fields are required."),
            "/register",
        ));
    }

    if password != confirm_password {
        return Ok(flash_redirect(
            &state,
            &cookies,
            Flash::danger("Passwords do not match."),
            "/register",
        ));
    }

    if let Err(AppError::Validation(message)) = validate_username(&username) {
        return Ok(flash_redirect(
            &state,
            &cookies,
            Flash::danger(message),
            "/register",
        ));
    }

    match auth_service::register_user(&state.db, &username, &password).await {
        Ok(user) => {
            tracing::info!("✅ User registered: {}", user.id);
            Ok(flash_redirect(
                &state,
                &cookies,
                Flash::success("Account created. Please log in."),
                "/login",
            ))
        }
        Err(AppError::Validation(message)) => Ok(flash_redirect(
            &state,
            &cookies,
            Flash::danger(message),
            "/register",
        )),
        Err(e) => Err(e),
    }
}

/// Logs the current user out, whoever they are.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Response {
    if let Some(cookie) = cookies.get("session_id") {
        if let Ok(session_id) = Uuid::parse_str(cookie.value()) {
            if let Some(session) = state.sessions.remove(&session_id).await {
                tracing::info!("👋 User logged out: {}", session.user_id);
            }
        }
    }

    let mut removal = Cookie::new("session_id", "");
    removal.set_path("/");
    cookies.remove(removal);

    flash_redirect(
        &state,
        &cookies,
        Flash::info("You have been logged out."),
        "/login",
    )
}
