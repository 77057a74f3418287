//! Calorie entry for one meal category

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::{cookie::CookieJar, Form};
use dose_core::calculate_total_calories;

use crate::middleware::auth::CurrentUser;
use crate::models::CalorieForm;
use crate::{views, AppResult, AppState};

/// GET /calories/:meal_type
pub async fn calories_page(
    State(state): State<AppState>,
    Path(meal_type): Path<String>,
    user: CurrentUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let mut session = state.session(&jar);
    let flashes = session.take_flashes();
    let jar = state.store_session(jar, &session)?;

    let items = state.meals.items_for(&meal_type);
    Ok((jar, views::calories(&user.username, &flashes, &meal_type, &items)))
}

/// POST /calories/:meal_type
pub async fn submit_calories(
    State(state): State<AppState>,
    Path(meal_type): Path<String>,
    user: CurrentUser,
    jar: CookieJar,
    Form(form): Form<CalorieForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let items = state.meals.items_for(&meal_type);
    let total = calculate_total_calories(form.items.as_slice(), form.quantities.as_slice(), &items);

    tracing::info!(
        "{} entered {} kcal for {} ({} items)",
        user.username,
        total,
        meal_type,
        form.items.len()
    );

    let mut session = state.session(&jar);
    session.calories = Some(total);
    let jar = state.store_session(jar, &session)?;

    Ok((jar, Redirect::to("/predict")))
}
