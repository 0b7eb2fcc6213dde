//! Automatic demo cycling for the two demo slots.

pub mod scheduler;
pub mod selector;

pub use scheduler::{DemoRotationScheduler, RotationState, SlotInputs, TickOutcome};
pub use selector::DemoSelector;
