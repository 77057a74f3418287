//! Request models

pub mod forms;

pub use dose_core::ClinicalInput;
pub use forms::*;
