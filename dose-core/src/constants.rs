//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the core and the web server.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Insulin Dose Predictor";

/// Default location of the user store snapshot
pub const DEFAULT_USER_STORE_PATH: &str = "Logs/users.json";

/// Default location of the model bundle manifest
pub const DEFAULT_MODEL_PATH: &str = "insulin_predictor_final.json";

/// Shown instead of a dose when no model could be loaded
pub const MODEL_NOT_LOADED: &str = "Model not loaded";

/// Meal used for the one-hot indicators when the form omits it
pub const DEFAULT_MEAL: &str = "breakfast";

/// Decimal places kept on a predicted dose
pub const DOSE_DECIMALS: i32 = 2;
