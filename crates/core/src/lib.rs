//! Core business logic for blogr.

pub mod services;

pub use services::*;
