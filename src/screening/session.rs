use super::actions::{self, ActionPlan};
use super::catalog::{Question, Scale, ScaleCatalog, ScaleId};
use super::draft::DraftSnapshot;
use super::levels::{LevelRule, LevelRuleTable, LevelTableError};
use super::scoring;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    InProgress,
    Completed,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("scale {0} is not registered in the catalog")]
    UnknownScale(ScaleId),
    #[error("an assessment is already in progress; reset it before selecting a scale")]
    AlreadyInProgress,
    #[error("no assessment is in progress")]
    NotInProgress,
    #[error("{value} is not a valid option score for this scale")]
    InvalidAnswer { value: u8 },
    #[error("{missing} question(s) still unanswered")]
    Incomplete { missing: usize },
    #[error(transparent)]
    RuleTable(#[from] LevelTableError),
}

/// Everything derived from a submitted answer sheet. Recomputed wholesale on
/// every submission, never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningOutcome {
    pub scale: ScaleId,
    pub total_score: u32,
    pub level: LevelRule,
    pub risk_flag: bool,
    pub actions: ActionPlan,
    pub completed_at: DateTime<Utc>,
}

/// The single active assessment: scale selection, in-progress answers, the
/// question pointer, and the derived outcome once submitted.
///
/// Rejected transitions leave the session untouched.
#[derive(Debug, Clone, Default)]
pub struct AssessmentSession {
    scale: Option<Scale>,
    answers: Vec<Option<u8>>,
    current_index: usize,
    outcome: Option<ScreeningOutcome>,
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.outcome.is_some() {
            SessionPhase::Completed
        } else if self.scale.is_some() {
            SessionPhase::InProgress
        } else {
            SessionPhase::Idle
        }
    }

    /// `Idle | Completed -> InProgress`. Clears any previous answers and
    /// outcome and points at the first question.
    pub fn select_scale(
        &mut self,
        catalog: &ScaleCatalog,
        id: ScaleId,
    ) -> Result<(), SessionError> {
        if self.phase() == SessionPhase::InProgress {
            return Err(SessionError::AlreadyInProgress);
        }

        let scale = catalog
            .get(id)
            .cloned()
            .ok_or(SessionError::UnknownScale(id))?;

        self.answers = vec![None; scale.question_count()];
        self.current_index = 0;
        self.outcome = None;
        self.scale = Some(scale);
        Ok(())
    }

    fn in_progress_scale(&self) -> Result<&Scale, SessionError> {
        if self.outcome.is_some() {
            return Err(SessionError::NotInProgress);
        }
        self.scale.as_ref().ok_or(SessionError::NotInProgress)
    }

    /// Records the answer for the current question and advances, except on
    /// the last question where the pointer stays put awaiting submit.
    pub fn answer(&mut self, value: u8) -> Result<(), SessionError> {
        let scale = self.in_progress_scale()?;
        if !scale.is_valid_answer(value) {
            return Err(SessionError::InvalidAnswer { value });
        }
        let question_count = scale.question_count();

        self.answers[self.current_index] = Some(value);
        if self.current_index + 1 < question_count {
            self.current_index += 1;
        }
        Ok(())
    }

    /// Steps back one question. The answer left behind is kept. A no-op on
    /// the first question or outside an in-progress assessment.
    pub fn go_back(&mut self) {
        if self.phase() == SessionPhase::InProgress && self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Computes the outcome and moves to `Completed`. Rejected while any
    /// question is unanswered, leaving the session in progress.
    pub fn submit(
        &mut self,
        rules: &LevelRuleTable,
        completed_at: DateTime<Utc>,
    ) -> Result<&ScreeningOutcome, SessionError> {
        let scale_id = self.in_progress_scale()?.id;

        let missing = self.answers.iter().filter(|answer| answer.is_none()).count();
        if missing > 0 {
            return Err(SessionError::Incomplete { missing });
        }

        let total_score = scoring::total_score(&self.answers);
        let level = scoring::classify(rules, scale_id, total_score)?.clone();
        let risk_flag = scoring::risk_flag(scale_id, &self.answers);
        let actions = actions::resolve(&level, risk_flag);

        let outcome = ScreeningOutcome {
            scale: scale_id,
            total_score,
            level,
            risk_flag,
            actions,
            completed_at,
        };
        Ok(self.outcome.insert(outcome))
    }

    /// Any state -> `Idle`, discarding selection, answers, and outcome.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn scale(&self) -> Option<&Scale> {
        self.scale.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.scale
            .as_ref()
            .and_then(|scale| scale.questions().get(self.current_index))
    }

    pub fn answers(&self) -> &[Option<u8>] {
        &self.answers
    }

    pub fn outcome(&self) -> Option<&ScreeningOutcome> {
        self.outcome.as_ref()
    }

    pub fn can_go_back(&self) -> bool {
        self.phase() == SessionPhase::InProgress && self.current_index > 0
    }

    pub fn can_submit(&self) -> bool {
        self.phase() == SessionPhase::InProgress
            && self.answers.iter().all(|answer| answer.is_some())
    }

    /// Progress through the questionnaire as shown on the progress bar.
    pub fn progress_percent(&self) -> f32 {
        match self.scale.as_ref() {
            Some(scale) if self.outcome.is_none() => {
                (self.current_index as f32 + 1.0) / scale.question_count() as f32 * 100.0
            }
            _ => 0.0,
        }
    }

    /// Captures the in-progress state for draft persistence. Drafts are
    /// always pre-submission, so this is `None` outside `InProgress`.
    pub fn snapshot(&self) -> Option<DraftSnapshot> {
        match (&self.outcome, &self.scale) {
            (None, Some(scale)) => Some(DraftSnapshot {
                scale_id: scale.id,
                current_question_index: self.current_index,
                answers: self.answers.clone(),
            }),
            _ => None,
        }
    }

    /// Rebuilds an in-progress session from a persisted draft. Any snapshot
    /// that does not line up with the catalog (unknown scale, index or
    /// answer out of range, wrong sheet length) yields `None`; a corrupt
    /// draft is never partially applied.
    pub fn restore(catalog: &ScaleCatalog, snapshot: &DraftSnapshot) -> Option<Self> {
        let scale = catalog.get(snapshot.scale_id)?.clone();

        if snapshot.answers.len() != scale.question_count() {
            return None;
        }
        if snapshot.current_question_index >= scale.question_count() {
            return None;
        }
        if snapshot
            .answers
            .iter()
            .flatten()
            .any(|value| !scale.is_valid_answer(*value))
        {
            return None;
        }

        Some(Self {
            scale: Some(scale),
            answers: snapshot.answers.clone(),
            current_index: snapshot.current_question_index,
            outcome: None,
        })
    }
}
