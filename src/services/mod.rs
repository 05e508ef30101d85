//! Domain services over the document store

pub mod directory;
pub mod events;
pub mod identity;

pub use directory::{directory_filter, DirectoryService, DEFAULT_LIMIT};
pub use events::{sample_event, EventsService, EVENTS_LIMIT};
pub use identity::{IdentityService, ProfileFields};
