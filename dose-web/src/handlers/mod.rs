//! HTTP handlers

pub mod auth;
pub mod calories;
pub mod health;
pub mod pages;
pub mod predict;
