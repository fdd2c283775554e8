//! Screening core: catalog, banding rules, scoring, action resolution, and
//! the assessment session state machine, plus the draft and export
//! collaborators that cross the process boundary.

pub mod actions;
pub mod catalog;
pub mod draft;
pub mod export;
pub mod levels;
pub mod scoring;
pub mod selfhelp;
pub mod session;

#[cfg(test)]
mod tests;

pub use actions::{ActionPlan, RecommendedAction};
pub use catalog::{AnswerOption, Question, Scale, ScaleCatalog, ScaleId};
pub use draft::{DraftError, DraftSnapshot, DraftStore, FileDraftStore, MemoryDraftStore};
pub use export::{ExportError, ScreeningRecord};
pub use levels::{
    ActionIntent, ActionKind, ActionTemplate, AttentionLevel, LevelRule, LevelRuleTable,
    LevelTableError,
};
pub use selfhelp::{SelfHelpContent, SelfHelpLibrary};
pub use session::{AssessmentSession, ScreeningOutcome, SessionError, SessionPhase};
