pub mod models;
pub mod services;

pub use models::{SlotError, SlotSelection, TimeSlot};
pub use services::calendar::{available_slots, generate_slots};
