use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of scales this system administers. New instruments require a
/// new variant plus catalog, rule-table, and risk-predicate entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleId {
    #[serde(rename = "PHQ-9")]
    Phq9,
    #[serde(rename = "GAD-7")]
    Gad7,
}

impl ScaleId {
    pub const fn ordered() -> [Self; 2] {
        [Self::Phq9, Self::Gad7]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Phq9 => "PHQ-9",
            Self::Gad7 => "GAD-7",
        }
    }

    /// Accepts the canonical code plus common unhyphenated spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "phq-9" | "phq9" => Some(Self::Phq9),
            "gad-7" | "gad7" => Some(Self::Gad7),
            _ => None,
        }
    }
}

impl fmt::Display for ScaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// 1-based position as printed on the published instrument.
    pub number: u8,
    pub prompt: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub score: u8,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scale {
    pub id: ScaleId,
    pub name: &'static str,
    pub full_name: &'static str,
    pub description: &'static str,
    /// Rough completion time shown on the selection screen.
    pub duration_minutes: u8,
    questions: Vec<Question>,
    options: Vec<AnswerOption>,
}

impl Scale {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Highest total a fully answered sheet can reach.
    pub fn max_score(&self) -> u32 {
        let per_question = self
            .options
            .iter()
            .map(|option| u32::from(option.score))
            .max()
            .unwrap_or(0);
        per_question * self.questions.len() as u32
    }

    pub fn is_valid_answer(&self, value: u8) -> bool {
        self.options.iter().any(|option| option.score == value)
    }
}

/// Static registry of every administered scale.
#[derive(Debug, Clone)]
pub struct ScaleCatalog {
    scales: Vec<Scale>,
}

impl ScaleCatalog {
    pub fn standard() -> Self {
        Self {
            scales: vec![phq9(), gad7()],
        }
    }

    pub fn get(&self, id: ScaleId) -> Option<&Scale> {
        self.scales.iter().find(|scale| scale.id == id)
    }

    pub fn scales(&self) -> &[Scale] {
        &self.scales
    }
}

/// The 0-3 frequency options are shared verbatim by both instruments.
fn frequency_options() -> Vec<AnswerOption> {
    vec![
        AnswerOption {
            score: 0,
            label: "Not at all",
            description: "Never over the past two weeks",
        },
        AnswerOption {
            score: 1,
            label: "Several days",
            description: "On a few days over the past two weeks",
        },
        AnswerOption {
            score: 2,
            label: "More than half the days",
            description: "On more than half the days over the past two weeks",
        },
        AnswerOption {
            score: 3,
            label: "Nearly every day",
            description: "Nearly every day over the past two weeks",
        },
    ]
}

fn phq9() -> Scale {
    Scale {
        id: ScaleId::Phq9,
        name: "PHQ-9",
        full_name: "PHQ-9 Depression Self-Assessment",
        description: "Screens for the severity of depressive symptoms over the past two weeks.",
        duration_minutes: 3,
        questions: vec![
            Question {
                number: 1,
                prompt: "Little interest or pleasure in doing things",
            },
            Question {
                number: 2,
                prompt: "Feeling down, depressed, or hopeless",
            },
            Question {
                number: 3,
                prompt: "Trouble falling or staying asleep, or sleeping too much",
            },
            Question {
                number: 4,
                prompt: "Feeling tired or having little energy",
            },
            Question {
                number: 5,
                prompt: "Poor appetite or overeating",
            },
            Question {
                number: 6,
                prompt: "Feeling bad about yourself, or that you are a failure, \
                         or have let yourself or your family down",
            },
            Question {
                number: 7,
                prompt: "Trouble concentrating on things, such as reading the \
                         newspaper or watching television",
            },
            Question {
                number: 8,
                prompt: "Moving or speaking so slowly that other people could have \
                         noticed, or the opposite, being fidgety or restless",
            },
            Question {
                number: 9,
                prompt: "Thoughts that you would be better off dead or of hurting \
                         yourself in some way",
            },
        ],
        options: frequency_options(),
    }
}

fn gad7() -> Scale {
    Scale {
        id: ScaleId::Gad7,
        name: "GAD-7",
        full_name: "GAD-7 Anxiety Self-Assessment",
        description: "Screens for the severity of anxiety symptoms over the past two weeks.",
        duration_minutes: 3,
        questions: vec![
            Question {
                number: 1,
                prompt: "Feeling nervous, anxious, or on edge",
            },
            Question {
                number: 2,
                prompt: "Not being able to stop or control worrying",
            },
            Question {
                number: 3,
                prompt: "Worrying too much about different things",
            },
            Question {
                number: 4,
                prompt: "Trouble relaxing",
            },
            Question {
                number: 5,
                prompt: "Being so restless that it is hard to sit still",
            },
            Question {
                number: 6,
                prompt: "Becoming easily annoyed or irritable",
            },
            Question {
                number: 7,
                prompt: "Feeling afraid as if something awful might happen",
            },
        ],
        options: frequency_options(),
    }
}
