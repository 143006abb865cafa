mod generator;

pub use generator::{GenerateError, QuizGenerator};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub const OPTION_COUNT: usize = 4;

const MAX_PROMPT_LEN: usize = 1024;
const MAX_OPTION_LEN: usize = 512;
const MAX_TOPIC_LEN: usize = 200;

/// One quiz item: a prompt, exactly four answer options, and the index of
/// the correct one. The serialized layout matches the quiz service payload
/// and the persisted session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

impl Question {
    pub fn validate(&self) -> Result<()> {
        if self.question.trim().is_empty() {
            return Err(anyhow!("question text is empty"));
        }
        if self.question.len() > MAX_PROMPT_LEN {
            return Err(anyhow!("question text too long"));
        }
        if self.options.len() != OPTION_COUNT {
            return Err(anyhow!(
                "expected {} options, got {}",
                OPTION_COUNT,
                self.options.len()
            ));
        }
        for option in &self.options {
            if option.trim().is_empty() {
                return Err(anyhow!("answer option is empty"));
            }
            if option.len() > MAX_OPTION_LEN {
                return Err(anyhow!("answer option too long"));
            }
        }
        for (i, a) in self.options.iter().enumerate() {
            if self.options[i + 1..].contains(a) {
                return Err(anyhow!("answer options are not distinct"));
            }
        }
        if self.correct_answer_index >= OPTION_COUNT {
            return Err(anyhow!(
                "correct answer index {} out of range",
                self.correct_answer_index
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    #[default]
    Landscape,
    Portrait,
}

impl Aspect {
    pub fn all() -> &'static [Aspect] {
        &[Aspect::Landscape, Aspect::Portrait]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Aspect::Landscape => "Landscape (16:9)",
            Aspect::Portrait => "Portrait (9:16)",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Aspect::Landscape => "Best for YouTube",
            Aspect::Portrait => "Best for TikTok/Reels",
        }
    }

    /// Fixed stage dimensions for the playback surface, in logical pixels.
    pub fn stage_size(&self) -> (f32, f32) {
        match self {
            Aspect::Landscape => (800.0, 450.0),
            Aspect::Portrait => (360.0, 640.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuestionCount {
    Five,
    #[default]
    Ten,
    Fifteen,
    Twenty,
}

impl QuestionCount {
    pub fn all() -> &'static [QuestionCount] {
        &[
            QuestionCount::Five,
            QuestionCount::Ten,
            QuestionCount::Fifteen,
            QuestionCount::Twenty,
        ]
    }

    pub fn as_usize(&self) -> usize {
        match self {
            QuestionCount::Five => 5,
            QuestionCount::Ten => 10,
            QuestionCount::Fifteen => 15,
            QuestionCount::Twenty => 20,
        }
    }
}

/// A generated quiz plus the settings it was generated with. This is the
/// record the session store persists, serialized with the questions under a
/// `quiz` key to match the original session layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub topic: String,
    pub aspect: Aspect,
    #[serde(rename = "quiz")]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(anyhow!("topic is empty"));
        }
        if self.topic.len() > MAX_TOPIC_LEN {
            return Err(anyhow!("topic too long"));
        }
        if self.questions.is_empty() {
            return Err(anyhow!("quiz has no questions"));
        }
        for question in &self.questions {
            question.validate()?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            question: "Which planet is known as the Red Planet?".to_string(),
            options: vec![
                "Venus".to_string(),
                "Mars".to_string(),
                "Jupiter".to_string(),
                "Saturn".to_string(),
            ],
            correct_answer_index: 1,
        }
    }

    #[test]
    fn valid_question_passes() {
        assert!(question().validate().is_ok());
    }

    #[test]
    fn wrong_option_count_rejected() {
        let mut q = question();
        q.options.pop();
        assert!(q.validate().is_err());
    }

    #[test]
    fn out_of_range_answer_rejected() {
        let mut q = question();
        q.correct_answer_index = 4;
        assert!(q.validate().is_err());
    }

    #[test]
    fn duplicate_options_rejected() {
        let mut q = question();
        q.options[3] = q.options[0].clone();
        assert!(q.validate().is_err());
    }

    #[test]
    fn question_payload_uses_camel_case() {
        let json = serde_json::to_value(question()).unwrap();
        assert!(json.get("correctAnswerIndex").is_some());
    }

    #[test]
    fn quiz_serializes_questions_under_quiz_key() {
        let quiz = Quiz {
            topic: "Space".to_string(),
            aspect: Aspect::Portrait,
            questions: vec![question()],
        };
        let json = serde_json::to_value(&quiz).unwrap();
        assert!(json.get("quiz").unwrap().is_array());
        assert_eq!(json.get("aspect").unwrap(), "portrait");
    }

    #[test]
    fn empty_quiz_rejected() {
        let quiz = Quiz {
            topic: "Space".to_string(),
            aspect: Aspect::Landscape,
            questions: Vec::new(),
        };
        assert!(quiz.validate().is_err());
    }
}
