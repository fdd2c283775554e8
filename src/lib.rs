//! Self-administered mental-health screening toolkit.
//!
//! Implements the PHQ-9 and GAD-7 questionnaires as a deterministic core:
//! a static scale catalog, a validated score-to-band rule table, a scoring
//! engine with a per-scale safety predicate, an action resolver, and the
//! assessment session state machine that front ends drive. Draft persistence
//! and CSV record export are provided as boundary collaborators.
//!
//! This performs a fixed, publicly documented scoring rubric; it is not a
//! diagnostic or clinical decision system.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
