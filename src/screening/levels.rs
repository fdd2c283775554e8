use super::catalog::{ScaleCatalog, ScaleId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attention band a total score falls into, from least to most concerning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionLevel {
    Green,
    Yellow,
    Orange,
    Red,
}

impl AttentionLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Green, Self::Yellow, Self::Orange, Self::Red]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Low concern",
            Self::Yellow => "Worth monitoring",
            Self::Orange => "Further evaluation advised",
            Self::Red => "Needs attention",
        }
    }
}

/// Presentation emphasis for a recommended action. Carries no behavioral
/// meaning beyond how the front end styles the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Primary,
    Secondary,
    Danger,
}

impl ActionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Danger => "danger",
        }
    }
}

/// What following an action should navigate to or trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionIntent {
    SelfHelp,
    ScheduleVisit,
    FollowUpReminder { days: u8 },
    CrisisHelp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionTemplate {
    pub label: &'static str,
    pub intent: ActionIntent,
}

/// One row of a scale's banding rubric: a closed score interval plus the
/// copy and default actions shown when a result lands in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelRule {
    pub level: AttentionLevel,
    pub label: &'static str,
    pub description: &'static str,
    pub min_score: u8,
    pub max_score: u8,
    pub recommendation: &'static str,
    pub primary: ActionTemplate,
    pub secondary: ActionTemplate,
}

impl LevelRule {
    pub fn contains(&self, score: u32) -> bool {
        score >= u32::from(self.min_score) && score <= u32::from(self.max_score)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LevelTableError {
    #[error("no banding rules registered for {0}")]
    MissingRules(ScaleId),
    #[error("banding rules reference {0}, which is not in the catalog")]
    UnknownScale(ScaleId),
    #[error("banding rules list {0} more than once")]
    DuplicateRules(ScaleId),
    #[error("{scale} rule [{min_score}, {max_score}] has an inverted range")]
    InvertedRange {
        scale: ScaleId,
        min_score: u8,
        max_score: u8,
    },
    #[error("{scale} rules must start at score 0, first rule starts at {found}")]
    CoverageStart { scale: ScaleId, found: u8 },
    #[error("{scale} rules are not contiguous: a rule ends at {previous_max} and the next starts at {next_min}")]
    Discontinuity {
        scale: ScaleId,
        previous_max: u8,
        next_min: u8,
    },
    #[error("{scale} rules end at {found} but the scale's maximum total is {expected}")]
    CoverageEnd {
        scale: ScaleId,
        expected: u32,
        found: u8,
    },
    #[error("score {score} is outside the {scale} rule table (covers 0..={max}); catalog and rules are out of sync")]
    ScoreOutOfRange {
        scale: ScaleId,
        score: u32,
        max: u8,
    },
}

/// Per-scale banding rubric, validated once at construction: intervals must
/// be contiguous, disjoint, and cover exactly `[0, max_score]`.
#[derive(Debug, Clone)]
pub struct LevelRuleTable {
    rules: HashMap<ScaleId, Vec<LevelRule>>,
}

impl LevelRuleTable {
    pub fn standard(catalog: &ScaleCatalog) -> Result<Self, LevelTableError> {
        Self::new(
            catalog,
            vec![
                (ScaleId::Phq9, phq9_rules()),
                (ScaleId::Gad7, gad7_rules()),
            ],
        )
    }

    pub fn new(
        catalog: &ScaleCatalog,
        entries: Vec<(ScaleId, Vec<LevelRule>)>,
    ) -> Result<Self, LevelTableError> {
        let mut rules: HashMap<ScaleId, Vec<LevelRule>> = HashMap::new();

        for (scale_id, mut scale_rules) in entries {
            let scale = catalog
                .get(scale_id)
                .ok_or(LevelTableError::UnknownScale(scale_id))?;

            scale_rules.sort_by_key(|rule| rule.min_score);
            validate_coverage(scale_id, scale.max_score(), &scale_rules)?;
            if rules.insert(scale_id, scale_rules).is_some() {
                return Err(LevelTableError::DuplicateRules(scale_id));
            }
        }

        for scale in catalog.scales() {
            if !rules.contains_key(&scale.id) {
                return Err(LevelTableError::MissingRules(scale.id));
            }
        }

        Ok(Self { rules })
    }

    /// Unique rule whose interval contains `score`. A miss above the covered
    /// range means the catalog and the table disagree, which is fatal
    /// configuration drift rather than something to clamp.
    pub fn rule_for(&self, scale: ScaleId, score: u32) -> Result<&LevelRule, LevelTableError> {
        let rules = self
            .rules
            .get(&scale)
            .ok_or(LevelTableError::MissingRules(scale))?;

        rules
            .iter()
            .find(|rule| rule.contains(score))
            .ok_or_else(|| LevelTableError::ScoreOutOfRange {
                scale,
                score,
                max: rules.last().map(|rule| rule.max_score).unwrap_or(0),
            })
    }

    pub fn rules_for(&self, scale: ScaleId) -> Option<&[LevelRule]> {
        self.rules.get(&scale).map(Vec::as_slice)
    }
}

fn validate_coverage(
    scale: ScaleId,
    max_score: u32,
    rules: &[LevelRule],
) -> Result<(), LevelTableError> {
    let (first, last) = match (rules.first(), rules.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(LevelTableError::MissingRules(scale)),
    };

    if first.min_score != 0 {
        return Err(LevelTableError::CoverageStart {
            scale,
            found: first.min_score,
        });
    }

    for rule in rules {
        if rule.min_score > rule.max_score {
            return Err(LevelTableError::InvertedRange {
                scale,
                min_score: rule.min_score,
                max_score: rule.max_score,
            });
        }
    }

    for window in rules.windows(2) {
        let (previous, next) = (&window[0], &window[1]);
        if u32::from(next.min_score) != u32::from(previous.max_score) + 1 {
            return Err(LevelTableError::Discontinuity {
                scale,
                previous_max: previous.max_score,
                next_min: next.min_score,
            });
        }
    }

    if u32::from(last.max_score) != max_score {
        return Err(LevelTableError::CoverageEnd {
            scale,
            expected: max_score,
            found: last.max_score,
        });
    }

    Ok(())
}

const SELF_HELP: ActionTemplate = ActionTemplate {
    label: "Self-help exercises",
    intent: ActionIntent::SelfHelp,
};

const SCHEDULE_VISIT: ActionTemplate = ActionTemplate {
    label: "Book an appointment",
    intent: ActionIntent::ScheduleVisit,
};

const FOLLOW_UP_14: ActionTemplate = ActionTemplate {
    label: "Set a 14-day follow-up reminder",
    intent: ActionIntent::FollowUpReminder { days: 14 },
};

const FOLLOW_UP_7: ActionTemplate = ActionTemplate {
    label: "Set a 7-day follow-up reminder",
    intent: ActionIntent::FollowUpReminder { days: 7 },
};

pub(crate) const CRISIS_HELP: ActionTemplate = ActionTemplate {
    label: "Crisis help now",
    intent: ActionIntent::CrisisHelp,
};

fn phq9_rules() -> Vec<LevelRule> {
    vec![
        LevelRule {
            level: AttentionLevel::Green,
            label: AttentionLevel::Green.label(),
            description: "No depressive symptoms",
            min_score: 0,
            max_score: 4,
            recommendation: "Your mood looks steady right now. Keep up the routines that \
                             are working for you.",
            primary: SELF_HELP,
            secondary: FOLLOW_UP_14,
        },
        LevelRule {
            level: AttentionLevel::Yellow,
            label: AttentionLevel::Yellow.label(),
            description: "Mild depressive symptoms",
            min_score: 5,
            max_score: 9,
            recommendation: "You may be carrying some mild distress. Self-guided \
                             techniques are a good place to start.",
            primary: SELF_HELP,
            secondary: SCHEDULE_VISIT,
        },
        LevelRule {
            level: AttentionLevel::Orange,
            label: AttentionLevel::Orange.label(),
            description: "Moderate depressive symptoms",
            min_score: 10,
            max_score: 14,
            recommendation: "A follow-up evaluation with a professional is recommended.",
            primary: SCHEDULE_VISIT,
            secondary: FOLLOW_UP_7,
        },
        LevelRule {
            level: AttentionLevel::Red,
            label: AttentionLevel::Red.label(),
            description: "Moderately severe or severe depressive symptoms",
            min_score: 15,
            max_score: 27,
            recommendation: "Please reach out to a professional for help and support as \
                             soon as you can.",
            primary: CRISIS_HELP,
            secondary: SCHEDULE_VISIT,
        },
    ]
}

fn gad7_rules() -> Vec<LevelRule> {
    vec![
        LevelRule {
            level: AttentionLevel::Green,
            label: AttentionLevel::Green.label(),
            description: "No anxiety symptoms",
            min_score: 0,
            max_score: 4,
            recommendation: "Your mood looks steady right now. Keep up the routines that \
                             are working for you.",
            primary: SELF_HELP,
            secondary: FOLLOW_UP_14,
        },
        LevelRule {
            level: AttentionLevel::Yellow,
            label: AttentionLevel::Yellow.label(),
            description: "Mild anxiety symptoms",
            min_score: 5,
            max_score: 9,
            recommendation: "You may be carrying some mild anxiety. Relaxation \
                             techniques are a good place to start.",
            primary: SELF_HELP,
            secondary: SCHEDULE_VISIT,
        },
        LevelRule {
            level: AttentionLevel::Orange,
            label: AttentionLevel::Orange.label(),
            description: "Moderate anxiety symptoms",
            min_score: 10,
            max_score: 14,
            recommendation: "A follow-up evaluation with a professional is recommended.",
            primary: SCHEDULE_VISIT,
            secondary: FOLLOW_UP_7,
        },
        LevelRule {
            level: AttentionLevel::Red,
            label: AttentionLevel::Red.label(),
            description: "Moderately severe or severe anxiety symptoms",
            min_score: 15,
            max_score: 21,
            recommendation: "Please reach out to a professional for help and support as \
                             soon as you can.",
            primary: CRISIS_HELP,
            secondary: SCHEDULE_VISIT,
        },
    ]
}
