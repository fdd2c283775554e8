use chrono::{DateTime, TimeZone, Utc};
use mindscreen::screening::{
    export, ActionIntent, ActionKind, AssessmentSession, AttentionLevel, DraftStore,
    LevelRuleTable, MemoryDraftStore, ScaleCatalog, ScaleId, ScreeningRecord, SelfHelpLibrary,
    SessionError, SessionPhase,
};

fn completed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 28, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn phq9_walkthrough_produces_a_flagged_red_result() {
    let catalog = ScaleCatalog::standard();
    let table = LevelRuleTable::standard(&catalog).expect("standard table validates");
    let mut session = AssessmentSession::new();

    session
        .select_scale(&catalog, ScaleId::Phq9)
        .expect("PHQ-9 is registered");
    assert_eq!(
        session.current_question().map(|question| question.number),
        Some(1)
    );

    for value in [3, 2, 3, 2, 3, 2, 3, 2] {
        session.answer(value).expect("valid answer");
    }

    // Step back to revisit question 8, then change the answer.
    session.go_back();
    assert_eq!(session.answers()[7], Some(2));
    session.answer(3).expect("valid answer");

    // Submitting early is rejected and leaves the assessment running.
    let err = session
        .submit(&table, completed_at())
        .expect_err("question 9 unanswered");
    assert_eq!(err, SessionError::Incomplete { missing: 1 });
    assert_eq!(session.phase(), SessionPhase::InProgress);

    session.answer(2).expect("valid answer");
    let outcome = session
        .submit(&table, completed_at())
        .expect("full sheet submits")
        .clone();

    assert_eq!(outcome.total_score, 23);
    assert_eq!(outcome.level.level, AttentionLevel::Red);
    assert!(outcome.risk_flag);

    // Red surfaces crisis help first, and the risk flag adds the standalone
    // urgent affordance on top.
    assert_eq!(outcome.actions.primary.kind, ActionKind::Danger);
    assert_eq!(outcome.actions.primary.intent, ActionIntent::CrisisHelp);
    let ordered = outcome.actions.ordered();
    assert_eq!(ordered.len(), 3);
    assert_eq!(ordered[0].intent, ActionIntent::CrisisHelp);

    // Red results do not get self-help content recommendations.
    let library = SelfHelpLibrary::standard();
    assert!(library.recommended_for(outcome.level.level).is_empty());
}

#[test]
fn gad7_low_score_recommends_self_help_content() {
    let catalog = ScaleCatalog::standard();
    let table = LevelRuleTable::standard(&catalog).expect("standard table validates");
    let mut session = AssessmentSession::new();

    session
        .select_scale(&catalog, ScaleId::Gad7)
        .expect("GAD-7 is registered");
    for value in [0, 1, 0, 1, 0, 1, 0] {
        session.answer(value).expect("valid answer");
    }

    let outcome = session
        .submit(&table, completed_at())
        .expect("full sheet submits");

    assert_eq!(outcome.total_score, 3);
    assert_eq!(outcome.level.level, AttentionLevel::Green);
    assert!(!outcome.risk_flag);
    assert!(outcome.actions.urgent.is_none());
    assert_eq!(outcome.actions.primary.intent, ActionIntent::SelfHelp);
    assert_eq!(
        outcome.actions.secondary.intent,
        ActionIntent::FollowUpReminder { days: 14 }
    );

    let library = SelfHelpLibrary::standard();
    let suggested = library.recommended_for(outcome.level.level);
    assert_eq!(suggested.len(), 3);
    assert!(suggested.iter().any(|content| content.id == "breathing"));
}

#[test]
fn draft_survives_a_session_restart() {
    let catalog = ScaleCatalog::standard();
    let table = LevelRuleTable::standard(&catalog).expect("standard table validates");
    let store = MemoryDraftStore::new();

    let mut first = AssessmentSession::new();
    first
        .select_scale(&catalog, ScaleId::Phq9)
        .expect("PHQ-9 is registered");
    for value in [1, 0, 2, 1] {
        first.answer(value).expect("valid answer");
    }
    store
        .save(&first.snapshot().expect("in-progress snapshot"))
        .expect("draft saved");
    first.reset();
    assert_eq!(first.phase(), SessionPhase::Idle);

    let snapshot = store
        .load()
        .expect("load succeeds")
        .expect("draft present");
    let mut resumed =
        AssessmentSession::restore(&catalog, &snapshot).expect("snapshot is consistent");

    assert_eq!(resumed.current_index(), 4);
    assert_eq!(resumed.answers()[..4], [Some(1), Some(0), Some(2), Some(1)]);

    for value in [0, 1, 0, 1, 0] {
        resumed.answer(value).expect("valid answer");
    }
    let outcome = resumed
        .submit(&table, completed_at())
        .expect("full sheet submits");
    assert_eq!(outcome.total_score, 6);
    assert_eq!(outcome.level.level, AttentionLevel::Yellow);
}

#[test]
fn export_record_keeps_the_tabular_contract() {
    let catalog = ScaleCatalog::standard();
    let table = LevelRuleTable::standard(&catalog).expect("standard table validates");
    let mut session = AssessmentSession::new();

    session
        .select_scale(&catalog, ScaleId::Phq9)
        .expect("PHQ-9 is registered");
    for value in [3; 9] {
        session.answer(value).expect("valid answer");
    }
    let outcome = session
        .submit(&table, completed_at())
        .expect("full sheet submits")
        .clone();

    let record = ScreeningRecord::from_outcome("demo-user", &outcome);
    assert_eq!(record.scale_type, "PHQ-9");
    assert_eq!(record.total_score, 27);
    assert_eq!(record.score_level, AttentionLevel::Red);
    assert!(record.has_risk_flag);

    let mut buffer = Vec::new();
    export::write_csv(&mut buffer, std::slice::from_ref(&record)).expect("csv writes");
    let csv = String::from_utf8(buffer).expect("utf8 output");
    let mut lines = csv.lines();

    assert_eq!(
        lines.next(),
        Some("user_id,scale_type,total_score,score_level,has_risk_flag,created_at"),
        "header order is a compatibility contract"
    );
    let row = lines.next().expect("one data row");
    assert!(row.starts_with("demo-user,PHQ-9,27,red,true,2026-08-28T09:30:00"));
}
