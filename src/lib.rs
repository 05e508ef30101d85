//! Alumnet - AlumniConnect directory API
//!
//! A minimal web backend for an alumni/student directory backed by MongoDB:
//! mock signup/login keyed on email, profile read/update, a searchable
//! directory, and an events list with a demo-safe fallback.

pub mod config;
pub mod db;
pub mod projection;
pub mod routes;
pub mod server;
pub mod services;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{AlumnetError, Result};
