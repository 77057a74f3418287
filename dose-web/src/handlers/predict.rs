//! Dose prediction
//!
//! Reachable without visiting the calorie step first; the session total
//! then defaults to 0.

use axum::{extract::State, response::Html};
use axum_extra::extract::{cookie::CookieJar, Form};

use crate::middleware::auth::CurrentUser;
use crate::models::ClinicalInput;
use crate::{views, AppResult, AppState};

/// GET /predict
pub async fn predict_page(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let mut session = state.session(&jar);
    let flashes = session.take_flashes();
    let jar = state.store_session(jar, &session)?;

    Ok((jar, views::predict(&user.username, &flashes, session.calories_or_zero(), None)))
}

/// POST /predict
pub async fn predict(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
    Form(input): Form<ClinicalInput>,
) -> AppResult<(CookieJar, Html<String>)> {
    let mut session = state.session(&jar);
    let flashes = session.take_flashes();
    let calories = session.calories_or_zero();

    let named = input.named_features(calories as f64);
    let prediction = state.predictor.predict_named(&named);

    tracing::info!("Prediction for {}: {}", user.username, prediction);

    let jar = state.store_session(jar, &session)?;
    Ok((jar, views::predict(&user.username, &flashes, calories, Some(&prediction))))
}
