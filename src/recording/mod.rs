mod recorder;

pub use recorder::QuizRecorder;

use std::time::Duration;

/// Capture controller states. `Preparing` covers the interval between the
/// user's start request and the first frame grab; permission or monitor
/// failures land in `Error`, from which the user may retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Preparing,
    Recording,
    Processing,
    Finished,
    Error,
}

impl RecordingState {
    /// A new recording may only begin when no capture is in flight.
    pub fn can_start(self) -> bool {
        matches!(
            self,
            RecordingState::Idle | RecordingState::Finished | RecordingState::Error
        )
    }
}

#[derive(Debug, Clone)]
pub struct RecordingSettings {
    pub fps: u32,
    pub max_duration: Duration,
    pub monitor_id: Option<u32>,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            fps: 10,
            max_duration: Duration::from_secs(300),
            monitor_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_rejected_while_capture_in_flight() {
        assert!(RecordingState::Idle.can_start());
        assert!(RecordingState::Finished.can_start());
        assert!(RecordingState::Error.can_start());
        assert!(!RecordingState::Preparing.can_start());
        assert!(!RecordingState::Recording.can_start());
        assert!(!RecordingState::Processing.can_start());
    }
}
