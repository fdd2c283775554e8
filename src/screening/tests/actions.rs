use super::common::*;
use crate::screening::actions;
use crate::screening::catalog::ScaleId;
use crate::screening::levels::{
    ActionIntent, ActionKind, ActionTemplate, AttentionLevel, LevelRule,
};

fn red_rule_with_misconfigured_primary() -> LevelRule {
    LevelRule {
        level: AttentionLevel::Red,
        label: AttentionLevel::Red.label(),
        description: "test band",
        min_score: 15,
        max_score: 27,
        recommendation: "test recommendation",
        primary: ActionTemplate {
            label: "Self-help exercises",
            intent: ActionIntent::SelfHelp,
        },
        secondary: ActionTemplate {
            label: "Book an appointment",
            intent: ActionIntent::ScheduleVisit,
        },
    }
}

#[test]
fn base_plan_mirrors_the_rule_slots() {
    let catalog = catalog();
    let table = rule_table(&catalog);
    let green = table.rule_for(ScaleId::Phq9, 2).expect("green band");

    let plan = actions::resolve(green, false);

    assert!(plan.urgent.is_none());
    assert_eq!(plan.primary.kind, ActionKind::Primary);
    assert_eq!(plan.primary.intent, ActionIntent::SelfHelp);
    assert_eq!(plan.secondary.kind, ActionKind::Secondary);
    assert_eq!(
        plan.secondary.intent,
        ActionIntent::FollowUpReminder { days: 14 }
    );
}

#[test]
fn orange_band_schedules_a_seven_day_follow_up() {
    let catalog = catalog();
    let table = rule_table(&catalog);
    let orange = table.rule_for(ScaleId::Gad7, 12).expect("orange band");

    let plan = actions::resolve(orange, false);

    assert_eq!(plan.primary.intent, ActionIntent::ScheduleVisit);
    assert_eq!(
        plan.secondary.intent,
        ActionIntent::FollowUpReminder { days: 7 }
    );
}

#[test]
fn red_always_surfaces_crisis_help_first() {
    let catalog = catalog();
    let table = rule_table(&catalog);
    let red = table.rule_for(ScaleId::Phq9, 20).expect("red band");

    for risk_flag in [false, true] {
        let plan = actions::resolve(red, risk_flag);
        assert_eq!(plan.primary.kind, ActionKind::Danger);
        assert_eq!(plan.primary.intent, ActionIntent::CrisisHelp);
    }
}

#[test]
fn red_override_holds_even_against_an_edited_table() {
    let tampered = red_rule_with_misconfigured_primary();

    let plan = actions::resolve(&tampered, false);

    assert_eq!(plan.primary.kind, ActionKind::Danger);
    assert_eq!(plan.primary.intent, ActionIntent::CrisisHelp);
    assert_eq!(plan.secondary.intent, ActionIntent::ScheduleVisit);
}

#[test]
fn risk_flag_adds_an_urgent_action_at_any_level() {
    let catalog = catalog();
    let table = rule_table(&catalog);

    for score in [0, 7, 12, 27] {
        let rule = table.rule_for(ScaleId::Phq9, score).expect("covered");
        let plan = actions::resolve(rule, true);

        let urgent = plan.urgent.as_ref().expect("urgent action present");
        assert_eq!(urgent.kind, ActionKind::Danger);
        assert_eq!(urgent.intent, ActionIntent::CrisisHelp);
    }
}

#[test]
fn ordered_lists_urgent_before_the_two_slots() {
    let catalog = catalog();
    let table = rule_table(&catalog);
    let yellow = table.rule_for(ScaleId::Phq9, 6).expect("yellow band");

    let plan = actions::resolve(yellow, true);
    let ordered = plan.ordered();

    assert_eq!(ordered.len(), 3);
    assert_eq!(ordered[0].intent, ActionIntent::CrisisHelp);
    assert_eq!(ordered[1].intent, ActionIntent::SelfHelp);
    assert_eq!(ordered[2].intent, ActionIntent::ScheduleVisit);

    let without_flag = actions::resolve(yellow, false);
    assert_eq!(without_flag.ordered().len(), 2);
}
