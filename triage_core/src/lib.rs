#![forbid(unsafe_code)]

//! Core domain model and decision logic for the injury triage system.
//!
//! This crate provides:
//! - Domain types (symptom reports, zones, injury types, triage results)
//! - Request normalization and validation
//! - The triage decision engine (classifier adapter, clinical overrides,
//!   severity grading, referral rules, load estimation)
//! - Local persistence (history, feedback, retraining dataset)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod normalize;
pub mod zone;
pub mod classifier;
pub mod clinical;
pub mod severity;
pub mod referral;
pub mod load;
pub mod guidance;
pub mod engine;
pub mod history;
pub mod feedback;
pub mod dataset;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{ClassifierConfig, Config, DataConfig};
pub use classifier::ClassifierAdapter;
pub use engine::{TriageEngine, DISCLAIMER};
pub use normalize::normalize;
pub use history::{load_recent, JsonlSink, RecordSink};
pub use feedback::append_feedback;
pub use dataset::append_case;
