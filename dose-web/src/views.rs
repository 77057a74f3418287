//! HTML views
//!
//! Plain server-rendered pages; every dynamic value goes through
//! `html_escape` before it reaches the markup.

use std::fmt::Write;

use axum::response::Html;
use dose_core::constants::APP_NAME;
use dose_core::logic::meals::{MealCategory, MealItems};
use dose_core::Prediction;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::session::Flash;

// ============================================================================
// LAYOUT
// ============================================================================

fn page(title: &str, user: Option<&str>, flashes: &[Flash], body: &str) -> Html<String> {
    let mut nav = String::from(r#"<a href="/">Home</a>"#);
    match user {
        Some(name) => {
            let _ = write!(
                nav,
                r#" | <a href="/instructions">Instructions</a> | <a href="/meals">Meals</a> | <a href="/predict">Predict</a> | <a href="/logout">Logout ({})</a>"#,
                text(name)
            );
        }
        None => nav.push_str(r#" | <a href="/signup">Sign up</a> | <a href="/login">Login</a>"#),
    }

    let mut messages = String::new();
    for flash in flashes {
        let _ = write!(
            messages,
            r#"<div class="flash flash-{}">{}</div>"#,
            flash.level.as_str(),
            text(&flash.message)
        );
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} - {app}</title></head>
<body>
<nav>{nav}</nav>
{messages}
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = text(title),
        app = APP_NAME,
    ))
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">{submit}</button>
</form>"#
    )
}

// ============================================================================
// PAGES
// ============================================================================

pub fn welcome(user: Option<&str>, flashes: &[Flash]) -> Html<String> {
    let body = r#"<p>Estimate your meal calories and get an insulin dose suggestion from a trained model.</p>
<p><a href="/signup">Create an account</a> or <a href="/login">log in</a> to start.</p>"#;
    page("Welcome", user, flashes, body)
}

pub fn signup(flashes: &[Flash]) -> Html<String> {
    page("Sign up", None, flashes, &credentials_form("/signup", "Sign up"))
}

pub fn login(flashes: &[Flash]) -> Html<String> {
    page("Login", None, flashes, &credentials_form("/login", "Login"))
}

pub fn instructions(user: &str, flashes: &[Flash]) -> Html<String> {
    let body = r#"<ol>
<li>Open <a href="/meals">Meals</a> and pick the meal you are about to eat.</li>
<li>Select the items and quantities; the calorie total is kept for this session.</li>
<li>Open <a href="/predict">Predict</a>, fill in glucose, carb rate, insulin on board, weight, ICR and ISF.</li>
<li>Fields left blank or not numeric count as 0. Always double-check the suggested dose.</li>
</ol>"#;
    page("Instructions", Some(user), flashes, body)
}

pub fn meals(user: &str, flashes: &[Flash]) -> Html<String> {
    let mut body = String::from("<ul>");
    for category in MealCategory::ALL {
        let _ = write!(
            body,
            r#"<li><a href="/calories/{}">{}</a></li>"#,
            attr(category.as_str()),
            text(category.as_str())
        );
    }
    body.push_str("</ul>");
    page("Choose a meal", Some(user), flashes, &body)
}

pub fn calories(user: &str, flashes: &[Flash], meal_type: &str, items: &MealItems) -> Html<String> {
    let mut body = String::new();

    if items.is_empty() {
        body.push_str("<p>No items are listed for this meal.</p>");
    } else {
        let mut options = String::new();
        for (name, kcal) in items {
            let _ = write!(
                options,
                r#"<option value="{}">{} ({} kcal)</option>"#,
                attr(name),
                text(name),
                kcal
            );
        }

        let _ = write!(body, r#"<form method="post" action="/calories/{}">"#, attr(meal_type));
        for _ in 0..3 {
            let _ = write!(
                body,
                r#"<div><select name="item[]">{options}</select> <input type="number" name="quantity[]" min="0" value="0"></div>"#
            );
        }
        body.push_str(r#"<button type="submit">Calculate</button></form>"#);
    }

    page(&format!("{} calories", meal_type), Some(user), flashes, &body)
}

pub fn predict(user: &str, flashes: &[Flash], calories: u64, prediction: Option<&Prediction>) -> Html<String> {
    let mut body = format!("<p>Meal calories this session: <strong>{}</strong></p>", calories);

    body.push_str(r#"<form method="post" action="/predict">"#);
    for (name, label) in [
        ("glucose", "Glucose level (mg/dL)"),
        ("carb_rate", "Carb rate (g/hr)"),
        ("sIOB", "Short-acting insulin on board"),
        ("dIOB", "Long-acting insulin on board"),
        ("weight", "Weight (kg)"),
        ("ICR", "Insulin-to-carb ratio"),
        ("ISF", "Insulin sensitivity factor"),
    ] {
        let _ = write!(body, r#"<label>{label} <input type="text" name="{name}"></label>"#);
    }
    body.push_str(r#"<label>Meal <select name="meal">"#);
    for category in MealCategory::ALL {
        let _ = write!(body, r#"<option value="{}">{}</option>"#, category.key(), category.as_str());
    }
    body.push_str(r#"</select></label><button type="submit">Predict</button></form>"#);

    if let Some(result) = prediction {
        let class = if result.dose().is_some() { "result" } else { "result result-error" };
        let _ = write!(
            body,
            r#"<section class="{}"><h2>Predicted insulin dose</h2><p>{}</p></section>"#,
            class,
            text(&result.to_string())
        );
    }

    page("Predict", Some(user), flashes, &body)
}
