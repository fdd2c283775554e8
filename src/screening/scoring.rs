use super::catalog::ScaleId;
use super::levels::{LevelRule, LevelRuleTable, LevelTableError};

/// Zero-based position of the PHQ-9 self-harm item (question 9).
const PHQ9_RISK_ITEM: usize = 8;

/// Sum of all set answers. Unset positions contribute 0, which is only
/// meaningful for partial/draft display; submission requires a full sheet.
pub fn total_score(answers: &[Option<u8>]) -> u32 {
    answers
        .iter()
        .flatten()
        .map(|value| u32::from(*value))
        .sum()
}

/// Scale-keyed safety predicate. Scales without an explicit entry never
/// raise the flag.
pub fn risk_flag(scale: ScaleId, answers: &[Option<u8>]) -> bool {
    match scale {
        ScaleId::Phq9 => answers
            .get(PHQ9_RISK_ITEM)
            .copied()
            .flatten()
            .map_or(false, |value| value > 0),
        ScaleId::Gad7 => false,
    }
}

pub fn classify<'a>(
    table: &'a LevelRuleTable,
    scale: ScaleId,
    total: u32,
) -> Result<&'a LevelRule, LevelTableError> {
    table.rule_for(scale, total)
}
