//! Services - storage, timers and validation used by the controller

pub mod storage;
pub mod timers;
pub mod validation;

pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use timers::{Scheduler, TimerId, TimerTask};
pub use validation::{check_field, is_valid_email, is_valid_phone};
