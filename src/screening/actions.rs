use super::levels::{
    ActionIntent, ActionKind, ActionTemplate, AttentionLevel, LevelRule, CRISIS_HELP,
};
use serde::Serialize;

/// A single resolved action surfaced on the result screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendedAction {
    pub label: &'static str,
    pub kind: ActionKind,
    pub intent: ActionIntent,
}

impl RecommendedAction {
    fn from_template(template: ActionTemplate, kind: ActionKind) -> Self {
        Self {
            label: template.label,
            kind,
            intent: template.intent,
        }
    }
}

/// The ordered action set for a completed screening. `urgent` sits outside
/// the two-slot primary/secondary list and is present iff the risk flag is
/// raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgent: Option<RecommendedAction>,
    pub primary: RecommendedAction,
    pub secondary: RecommendedAction,
}

impl ActionPlan {
    /// Display order: urgent (when present), then primary, then secondary.
    pub fn ordered(&self) -> Vec<&RecommendedAction> {
        let mut actions = Vec::with_capacity(3);
        if let Some(urgent) = &self.urgent {
            actions.push(urgent);
        }
        actions.push(&self.primary);
        actions.push(&self.secondary);
        actions
    }
}

/// Derives the action set from the matched rule and the risk flag.
///
/// The red band force-overwrites the primary slot with the crisis action
/// even though the standard table already configures it that way; the
/// override must hold if the table copy is ever edited.
pub fn resolve(rule: &LevelRule, risk_flag: bool) -> ActionPlan {
    let primary = if rule.level == AttentionLevel::Red {
        RecommendedAction::from_template(CRISIS_HELP, ActionKind::Danger)
    } else {
        RecommendedAction::from_template(rule.primary, ActionKind::Primary)
    };

    let urgent = risk_flag
        .then(|| RecommendedAction::from_template(CRISIS_HELP, ActionKind::Danger));

    ActionPlan {
        urgent,
        primary,
        secondary: RecommendedAction::from_template(rule.secondary, ActionKind::Secondary),
    }
}
