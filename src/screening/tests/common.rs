use crate::screening::catalog::{ScaleCatalog, ScaleId};
use crate::screening::levels::LevelRuleTable;
use crate::screening::session::AssessmentSession;
use chrono::{DateTime, TimeZone, Utc};

pub(super) fn catalog() -> ScaleCatalog {
    ScaleCatalog::standard()
}

pub(super) fn rule_table(catalog: &ScaleCatalog) -> LevelRuleTable {
    LevelRuleTable::standard(catalog).expect("standard rule table validates")
}

pub(super) fn completed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 28, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Starts a session on `scale_id` and records the given answers in order.
pub(super) fn session_with_answers(
    catalog: &ScaleCatalog,
    scale_id: ScaleId,
    answers: &[u8],
) -> AssessmentSession {
    let mut session = AssessmentSession::new();
    session
        .select_scale(catalog, scale_id)
        .expect("scale is in the catalog");
    for value in answers {
        session.answer(*value).expect("answer accepted");
    }
    session
}

pub(super) fn uniform_answers(count: usize, value: u8) -> Vec<u8> {
    vec![value; count]
}
