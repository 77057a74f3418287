//! Users Module - credential storage
//!
//! Flat username → password mapping persisted as one JSON snapshot.

pub mod store;

pub use store::{LoginError, SignupError, UserMap, UserStore};
