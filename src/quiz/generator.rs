use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::{Question, QuestionCount, OPTION_COUNT};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_ENV: &str = "GEMINI_API_KEY";
const REQUEST_TIMEOUT_SECS: u64 = 90;
const MAX_TOPIC_LEN: usize = 200;
const MAX_ERROR_BODY_LEN: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("{API_KEY_ENV} environment variable is not set")]
    MissingApiKey,
    #[error("topic must be 1-{MAX_TOPIC_LEN} characters")]
    InvalidTopic,
    #[error("could not reach the quiz service: {0}")]
    Transport(String),
    #[error("quiz service rejected the request ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("quiz service returned malformed data: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct QuizPayload {
    quiz: Vec<Question>,
}

/// Client for the generateContent endpoint. Built once per request task; the
/// blocking client is driven from a UI task the same way uploads are.
pub struct QuizGenerator {
    client: reqwest::blocking::Client,
    model: String,
}

impl QuizGenerator {
    pub fn new(model: &str) -> Result<Self, GenerateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("quizreel/0.1")
            .build()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            model: model.to_string(),
        })
    }

    pub fn generate(
        &self,
        topic: &str,
        count: QuestionCount,
    ) -> Result<Vec<Question>, GenerateError> {
        let topic = topic.trim();
        if topic.is_empty() || topic.len() > MAX_TOPIC_LEN {
            return Err(GenerateError::InvalidTopic);
        }
        let key = std::env::var(API_KEY_ENV).map_err(|_| GenerateError::MissingApiKey)?;

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(topic, count),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(count.as_usize()),
            },
        };

        tracing::info!(topic, count = count.as_usize(), "requesting quiz");
        let response = self
            .client
            .post(&url)
            .query(&[("key", key.as_str())])
            .json(&request)
            .send()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_LEN).collect(),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GenerateError::InvalidPayload(e.to_string()))?;
        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| GenerateError::InvalidPayload("response has no content".to_string()))?;

        parse_quiz_payload(text, count.as_usize())
    }
}

fn build_prompt(topic: &str, count: QuestionCount) -> String {
    format!(
        "Generate a {count}-question multiple-choice quiz about the topic: \"{topic}\". \
         For each question, provide 4 distinct answer options labeled A, B, C, D. \
         Only one option should be correct. \
         Ensure the questions cover a range of difficulty from easy to medium. \
         Identify the correct answer for each question using a zero-based index \
         (0 for A, 1 for B, 2 for C, 3 for D). \
         The output must be a valid JSON object that adheres to the provided schema. \
         Do not include any markdown formatting.",
        count = count.as_usize(),
        topic = topic,
    )
}

fn response_schema(count: usize) -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "quiz": {
                "type": "ARRAY",
                "minItems": count,
                "maxItems": count,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "minItems": OPTION_COUNT,
                            "maxItems": OPTION_COUNT,
                        },
                        "correctAnswerIndex": { "type": "INTEGER" },
                    },
                    "required": ["question", "options", "correctAnswerIndex"],
                },
            },
        },
        "required": ["quiz"],
    })
}

/// Parses and validates the model's JSON text. Anything off-contract (wrong
/// length, missing fields, out-of-range index) is malformed data, never a
/// partially accepted quiz.
fn parse_quiz_payload(text: &str, expected: usize) -> Result<Vec<Question>, GenerateError> {
    let payload: QuizPayload = serde_json::from_str(text.trim())
        .map_err(|e| GenerateError::InvalidPayload(e.to_string()))?;
    if payload.quiz.len() != expected {
        return Err(GenerateError::InvalidPayload(format!(
            "expected {} questions, got {}",
            expected,
            payload.quiz.len()
        )));
    }
    for question in &payload.quiz {
        question
            .validate()
            .map_err(|e| GenerateError::InvalidPayload(e.to_string()))?;
    }
    Ok(payload.quiz)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(questions: usize) -> String {
        let items: Vec<String> = (0..questions)
            .map(|i| {
                format!(
                    r#"{{"question":"Question {i}?","options":["a{i}","b{i}","c{i}","d{i}"],"correctAnswerIndex":{}}}"#,
                    i % 4
                )
            })
            .collect();
        format!(r#"{{"quiz":[{}]}}"#, items.join(","))
    }

    #[test]
    fn well_formed_payload_parses() {
        let questions = parse_quiz_payload(&payload(5), 5).unwrap();
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[1].correct_answer_index, 1);
    }

    #[test]
    fn wrong_question_count_is_malformed() {
        assert!(matches!(
            parse_quiz_payload(&payload(4), 5),
            Err(GenerateError::InvalidPayload(_))
        ));
    }

    #[test]
    fn wrong_option_count_is_malformed() {
        let text = r#"{"quiz":[{"question":"q?","options":["a","b","c"],"correctAnswerIndex":0}]}"#;
        assert!(matches!(
            parse_quiz_payload(text, 1),
            Err(GenerateError::InvalidPayload(_))
        ));
    }

    #[test]
    fn out_of_range_index_is_malformed() {
        let text = r#"{"quiz":[{"question":"q?","options":["a","b","c","d"],"correctAnswerIndex":4}]}"#;
        assert!(matches!(
            parse_quiz_payload(text, 1),
            Err(GenerateError::InvalidPayload(_))
        ));
    }

    #[test]
    fn non_json_text_is_malformed() {
        assert!(matches!(
            parse_quiz_payload("Sure! Here is your quiz:", 5),
            Err(GenerateError::InvalidPayload(_))
        ));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let text = format!("\n  {}  \n", payload(5));
        assert!(parse_quiz_payload(&text, 5).is_ok());
    }

    #[test]
    fn prompt_names_topic_and_count() {
        let prompt = build_prompt("The Roman Empire", QuestionCount::Ten);
        assert!(prompt.contains("10-question"));
        assert!(prompt.contains("The Roman Empire"));
    }
}
