use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

use crate::quiz::Quiz;

const SESSION_FILE: &str = "session.json";

/// Single-slot persistence for the last generated quiz. Saving replaces the
/// slot wholesale; a malformed record is never an error to the caller, it is
/// reported as absent and purged.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Option<Self> {
        ProjectDirs::from("com", "quizreel", "quizreel")
            .map(|dirs| Self::at(dirs.data_dir().join(SESSION_FILE)))
    }

    pub fn save(&self, quiz: &Quiz) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string(quiz)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn load(&self) -> Option<Quiz> {
        if !self.path.exists() {
            return None;
        }
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("failed to read saved session: {}", e);
                self.clear();
                return None;
            }
        };
        let quiz: Quiz = match serde_json::from_str(&content) {
            Ok(quiz) => quiz,
            Err(e) => {
                tracing::warn!("discarding malformed saved session: {}", e);
                self.clear();
                return None;
            }
        };
        if let Err(e) = quiz.validate() {
            tracing::warn!("discarding invalid saved session: {}", e);
            self.clear();
            return None;
        }
        Some(quiz)
    }

    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Aspect, Question};

    fn quiz() -> Quiz {
        Quiz {
            topic: "World War II".to_string(),
            aspect: Aspect::Landscape,
            questions: vec![Question {
                question: "In which year did the war end?".to_string(),
                options: vec![
                    "1943".to_string(),
                    "1944".to_string(),
                    "1945".to_string(),
                    "1946".to_string(),
                ],
                correct_answer_index: 2,
            }],
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::at(dir.path().join(SESSION_FILE))
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&quiz()).unwrap();
        assert_eq!(store.load(), Some(quiz()));
    }

    #[test]
    fn save_replaces_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&quiz()).unwrap();

        let mut replacement = quiz();
        replacement.topic = "Roman Empire".to_string();
        store.save(&replacement).unwrap();
        assert_eq!(store.load(), Some(replacement));
    }

    #[test]
    fn clear_then_load_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&quiz()).unwrap();
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load(), None);
    }

    #[test]
    fn malformed_record_is_absent_and_purged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);
        fs::write(&path, r#"{"topic": "broken"}"#).unwrap();

        let store = SessionStore::at(&path);
        assert_eq!(store.load(), None);
        assert!(!path.exists());
    }

    #[test]
    fn invalid_quiz_shape_is_absent_and_purged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);
        // Parses, but violates the four-option invariant.
        fs::write(
            &path,
            r#"{"topic":"x","aspect":"landscape","quiz":[{"question":"q","options":["a"],"correctAnswerIndex":0}]}"#,
        )
        .unwrap();

        let store = SessionStore::at(&path);
        assert_eq!(store.load(), None);
        assert!(!path.exists());
    }
}
