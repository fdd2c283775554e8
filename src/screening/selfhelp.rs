use super::levels::AttentionLevel;
use serde::Serialize;

/// A self-guided exercise offered after a screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfHelpContent {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub duration_minutes: u8,
    target_levels: &'static [AttentionLevel],
}

impl SelfHelpContent {
    pub fn targets(&self, level: AttentionLevel) -> bool {
        self.target_levels.contains(&level)
    }
}

/// Static library of self-help content. Only the lower attention bands get
/// content recommendations; orange and red results route to professional
/// follow-up instead.
#[derive(Debug, Clone)]
pub struct SelfHelpLibrary {
    contents: Vec<SelfHelpContent>,
}

const LOWER_BANDS: &[AttentionLevel] = &[AttentionLevel::Green, AttentionLevel::Yellow];

impl SelfHelpLibrary {
    pub fn standard() -> Self {
        Self {
            contents: vec![
                SelfHelpContent {
                    id: "meditation",
                    title: "Calming Meditation",
                    category: "Guided meditation",
                    description: "A guided meditation to relax body and mind and ease stress.",
                    duration_minutes: 5,
                    target_levels: LOWER_BANDS,
                },
                SelfHelpContent {
                    id: "breathing",
                    title: "Breathing Practice",
                    category: "Breathing exercise",
                    description: "Learn belly-breathing techniques to settle anxious moments quickly.",
                    duration_minutes: 3,
                    target_levels: LOWER_BANDS,
                },
                SelfHelpContent {
                    id: "exercise",
                    title: "Gentle Yoga",
                    category: "Light movement",
                    description: "Soft stretching to release tension held in the body.",
                    duration_minutes: 10,
                    target_levels: LOWER_BANDS,
                },
            ],
        }
    }

    pub fn contents(&self) -> &[SelfHelpContent] {
        &self.contents
    }

    pub fn recommended_for(&self, level: AttentionLevel) -> Vec<&SelfHelpContent> {
        self.contents
            .iter()
            .filter(|content| content.targets(level))
            .collect()
    }
}
