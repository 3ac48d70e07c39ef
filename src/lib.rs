//! Chartline - race chart result assembly
//!
//! This library provides:
//! - Race distance descriptions in long, alternate and compact forms
//! - Race splits and estimated per-starter fractional times
//! - Coupled/field entry grouping and win/place/show payoff attribution
//! - Betting choice ranks and dead heat detection
//! - Condensed race conditions summaries
//!
//! # Example
//!
//! ```no_run
//! use chartline::core::Assembler;
//! use chartline::data::load_race_drafts;
//!
//! let drafts = load_race_drafts("race.json").unwrap();
//! let assembler = Assembler::default();
//!
//! for assembled in assembler.assemble_all(drafts).into_iter().flatten() {
//!     println!("{}", assembled.result.simple_summary());
//! }
//! ```

pub mod core;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use crate::core::{AssembledRace, Assembler, AssemblyConfig, RaceDistance};
pub use diagnostics::{Diagnostics, Issue};
pub use error::ChartError;
pub use models::{Breed, RaceDraft, RaceResult, Starter, StarterDraft};
