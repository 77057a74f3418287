//! Static pages: welcome, instructions, meal selection

use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use crate::middleware::auth::CurrentUser;
use crate::{views, AppResult, AppState};

/// GET /
pub async fn welcome(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let mut session = state.session(&jar);
    let flashes = session.take_flashes();
    let jar = state.store_session(jar, &session)?;

    Ok((jar, views::welcome(session.user.as_deref(), &flashes)))
}

/// GET /instructions
pub async fn instructions(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let mut session = state.session(&jar);
    let flashes = session.take_flashes();
    let jar = state.store_session(jar, &session)?;

    Ok((jar, views::instructions(&user.username, &flashes)))
}

/// GET /meals
pub async fn meals(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let mut session = state.session(&jar);
    let flashes = session.take_flashes();
    let jar = state.store_session(jar, &session)?;

    Ok((jar, views::meals(&user.username, &flashes)))
}
