pub mod delay_model;

// Re-export the items from delay_model
pub use delay_model::{light_constants, light_delay, total_delay};
