//! Database schemas for Alumnet
//!
//! Defines MongoDB document structures for users and events.

mod event;
mod user;

pub use event::{EventDoc, EVENT_COLLECTION};
pub use user::{UserDoc, UserStatus, USER_COLLECTION};
