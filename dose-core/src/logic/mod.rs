//! Logic Module - domain logic, no transport concerns

pub mod features;
pub mod meals;
pub mod model;
pub mod users;
