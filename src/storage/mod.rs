pub mod models;
pub mod slot_store;

pub use models::*;
pub use slot_store::{BookingOutcome, SlotStore};
