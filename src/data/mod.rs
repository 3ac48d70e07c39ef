//! Data loading modules

pub mod draft_loader;

// Re-export commonly used types
pub use draft_loader::{load_assembly_config, load_race_drafts, LoadError};
