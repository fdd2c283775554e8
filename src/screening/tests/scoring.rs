use super::common::*;
use crate::screening::catalog::ScaleId;
use crate::screening::levels::AttentionLevel;
use crate::screening::scoring;

#[test]
fn total_is_the_exact_sum_of_a_full_sheet() {
    let answers: Vec<Option<u8>> = vec![Some(3); 9];
    assert_eq!(scoring::total_score(&answers), 27);

    let mixed: Vec<Option<u8>> = [0, 1, 2, 3, 0, 1, 2, 3, 1]
        .into_iter()
        .map(Some)
        .collect();
    assert_eq!(scoring::total_score(&mixed), 13);
}

#[test]
fn unset_answers_contribute_zero_to_draft_totals() {
    let answers = vec![Some(2), None, Some(3), None, None];
    assert_eq!(scoring::total_score(&answers), 5);
    assert_eq!(scoring::total_score(&[]), 0);
}

#[test]
fn all_threes_on_phq9_classifies_red() {
    let catalog = catalog();
    let table = rule_table(&catalog);

    let answers: Vec<Option<u8>> = vec![Some(3); 9];
    let total = scoring::total_score(&answers);
    let matched = scoring::classify(&table, ScaleId::Phq9, total).expect("27 is covered");

    assert_eq!(total, 27);
    assert_eq!(matched.level, AttentionLevel::Red);
}

#[test]
fn phq9_risk_flag_follows_question_nine() {
    let mut answers: Vec<Option<u8>> = vec![Some(2); 9];
    answers[8] = Some(0);
    assert!(!scoring::risk_flag(ScaleId::Phq9, &answers));

    answers[8] = Some(1);
    assert!(scoring::risk_flag(ScaleId::Phq9, &answers));

    answers[8] = None;
    assert!(!scoring::risk_flag(ScaleId::Phq9, &answers));
}

#[test]
fn risk_flag_is_independent_of_the_total() {
    let catalog = catalog();
    let table = rule_table(&catalog);

    // All-zero sheet except the self-harm item: low total, green band, flagged.
    let mut answers: Vec<Option<u8>> = vec![Some(0); 9];
    answers[8] = Some(1);

    let total = scoring::total_score(&answers);
    let matched = scoring::classify(&table, ScaleId::Phq9, total).expect("1 is covered");

    assert_eq!(total, 1);
    assert_eq!(matched.level, AttentionLevel::Green);
    assert!(scoring::risk_flag(ScaleId::Phq9, &answers));
}

#[test]
fn scales_without_a_predicate_never_flag() {
    let answers: Vec<Option<u8>> = vec![Some(3); 7];
    assert!(!scoring::risk_flag(ScaleId::Gad7, &answers));

    // Even with a hypothetical ninth position set, GAD-7 has no risk rule.
    let padded: Vec<Option<u8>> = vec![Some(3); 9];
    assert!(!scoring::risk_flag(ScaleId::Gad7, &padded));
}

#[test]
fn gad7_boundary_totals_classify_as_specified() {
    let catalog = catalog();
    let table = rule_table(&catalog);

    for (total, level) in [
        (9, AttentionLevel::Yellow),
        (10, AttentionLevel::Orange),
        (15, AttentionLevel::Red),
    ] {
        let matched = scoring::classify(&table, ScaleId::Gad7, total).expect("covered");
        assert_eq!(matched.level, level, "GAD-7 total {total}");
    }
}
