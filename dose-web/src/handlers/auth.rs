//! Authentication handlers: signup, login, logout
//!
//! Passwords are compared verbatim against the user store. Failures are
//! reported as flash messages, never as error responses.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use dose_core::SignupError;

use crate::middleware::auth::CurrentUser;
use crate::models::CredentialsForm;
use crate::session::{Flash, FlashLevel};
use crate::{views, AppResult, AppState};

/// GET /signup
pub async fn signup_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let mut session = state.session(&jar);
    let flashes = session.take_flashes();
    let jar = state.store_session(jar, &session)?;

    Ok((jar, views::signup(&flashes)))
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let mut session = state.session(&jar);

    let target = match state.users.register(&form.username, &form.password) {
        Ok(()) => {
            tracing::info!("New user signed up: {}", form.username);
            session.flash(FlashLevel::Success, "Signup successful! Please login.");
            "/login"
        }
        Err(SignupError::AlreadyExists(_)) => {
            session.flash(FlashLevel::Warning, "User already exists! Try login.");
            "/signup"
        }
    };

    let jar = state.store_session(jar, &session)?;
    Ok((jar, Redirect::to(target)))
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let mut session = state.session(&jar);
    let flashes = session.take_flashes();
    let jar = state.store_session(jar, &session)?;

    Ok((jar, views::login(&flashes)))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Response> {
    let mut session = state.session(&jar);

    if state.users.authenticate(&form.username, &form.password).is_ok() {
        session.login(&form.username);
        tracing::info!("User logged in: {}", form.username);

        let jar = state.store_session(jar, &session)?;
        return Ok((jar, Redirect::to("/instructions")).into_response());
    }

    // Re-render in place, like a form error
    let mut flashes = session.take_flashes();
    flashes.push(Flash::new(FlashLevel::Danger, "Invalid credentials!"));
    let jar = state.store_session(jar, &session)?;

    Ok((jar, views::login(&flashes)).into_response())
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    let mut session = state.session(&jar);
    session.logout();
    session.flash(FlashLevel::Info, "Logged out successfully.");

    tracing::info!("User logged out: {}", user.username);

    let jar = state.store_session(jar, &session)?;
    Ok((jar, Redirect::to("/")))
}
