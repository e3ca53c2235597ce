//! Lost & Found - a small bulletin board for lost and found item reports.
//!
//! Library exports for testing and external use.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod views;

pub use error::{Error, Result};
pub use state::AppState;
