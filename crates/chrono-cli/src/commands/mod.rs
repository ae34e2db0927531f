//! Command implementations.

pub mod events;
pub mod extract;
pub mod profile;
pub mod tasks;

pub use self::events::execute_events;
pub use self::extract::execute_extract;
pub use self::profile::execute_profile;
pub use self::tasks::execute_tasks;
