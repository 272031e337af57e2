// Handler modules
pub mod audit;
pub mod controls;

// Re-export all handler functions
pub use audit::{RunOptions, handle_run, run_targets};
pub use controls::handle_controls;
