//! Insulin Dose Predictor - Web Server
//!
//! Session-gated form flow in front of `dose-core`.
//!
//! # Flow
//!
//! ```text
//! /login ──▶ /instructions ──▶ /meals ──▶ /calories/:meal_type ──▶ /predict
//!                                              │ total kcal            ▲
//!                                              └──── session ──────────┘
//! ```
//!
//! Everything but `/`, `/signup`, `/login` and `/health` redirects anonymous
//! visitors to `/login`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod session;
pub mod views;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use axum_extra::extract::cookie::CookieJar;
use dose_core::{MealCatalog, Predictor, UserStore};
use tower_http::{
    compression::CompressionLayer,
    trace::TraceLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};
use session::SessionData;

/// Shared application state, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: Arc<UserStore>,
    pub meals: Arc<MealCatalog>,
    pub predictor: Arc<Predictor>,
}

impl AppState {
    /// Open the user store and load the model named by `config`
    pub fn new(config: Config) -> Self {
        let users = UserStore::open(&config.user_store_path);
        let predictor = Predictor::load(&config.model_path);

        if !predictor.is_loaded() {
            tracing::warn!("No model loaded from {}; predictions are unavailable", config.model_path.display());
        }

        Self {
            config: Arc::new(config),
            users: Arc::new(users),
            meals: Arc::new(MealCatalog::standard()),
            predictor: Arc::new(predictor),
        }
    }

    /// Current session for this request's cookies
    pub fn session(&self, jar: &CookieJar) -> SessionData {
        SessionData::from_jar(jar, &self.config.secret_key)
    }

    /// Write `session` back into the cookie jar
    pub fn store_session(&self, jar: CookieJar, session: &SessionData) -> AppResult<CookieJar> {
        session.store(jar, &self.config.secret_key, self.config.session_hours)
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(handlers::pages::welcome))
        .route("/health", get(handlers::health::check))
        .route("/signup", get(handlers::auth::signup_page).post(handlers::auth::signup))
        .route("/login", get(handlers::auth::login_page).post(handlers::auth::login));

    // Session routes (login required)
    let session_routes = Router::new()
        .route("/logout", get(handlers::auth::logout))
        .route("/instructions", get(handlers::pages::instructions))
        .route("/meals", get(handlers::pages::meals))
        .route(
            "/calories/:meal_type",
            get(handlers::calories::calories_page).post(handlers::calories::submit_calories),
        )
        .route("/predict", get(handlers::predict::predict_page).post(handlers::predict::predict))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_login,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
