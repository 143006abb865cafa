pub mod style;
pub mod views;

use iced::{Element, Task, Theme};
use std::path::PathBuf;
use std::time::Instant;

use crate::capture::list_monitors;
use crate::clipboard::{get_unique_filepath, show_notification, ClipboardManager};
use crate::config::Config;
use crate::player::{Player, PlayerEvent};
use crate::quiz::{Aspect, GenerateError, QuestionCount, Quiz, QuizGenerator};
use crate::recording::{QuizRecorder, RecordingSettings, RecordingState};
use crate::session::SessionStore;
use crate::sound::{Music, Sound};

use self::style::AppTheme;
use self::views::{ErrorView, GeneratingView, PlayerView, TopicFormState, TopicView};

#[derive(Debug, Clone)]
pub enum Message {
    TopicChanged(String),
    CountSelected(QuestionCount),
    AspectSelected(Aspect),
    Generate,
    QuizGenerated(Result<Quiz, GenerateError>),
    Tick,
    StartRecording,
    CaptureProbed(Result<crate::capture::MonitorInfo, String>),
    StopRecording,
    RecordingSaved(Result<String, String>),
    Replay,
    SaveCopyAs,
    SaveCopyPath(Option<PathBuf>),
    StartOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Topic,
    Generating,
    Player,
    GenerationError,
}

pub struct App {
    config: Config,
    theme: AppTheme,
    view: View,
    form: TopicFormState,
    quiz: Option<Quiz>,
    player: Option<Player>,
    now: Instant,
    music: Music,
    recording_state: RecordingState,
    recorder: Option<QuizRecorder>,
    clipboard: Option<ClipboardManager>,
    store: Option<SessionStore>,
    generation_error: Option<String>,
    recording_error: Option<String>,
    last_save_path: Option<PathBuf>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let config = Config::load().unwrap_or_default();
        let theme = match config.ui.theme {
            crate::config::Theme::Dark => AppTheme::dark(),
            crate::config::Theme::Light => AppTheme::light(),
        };

        let form = TopicFormState::from_config(&config);
        let store = SessionStore::default_location();
        let restored = store.as_ref().and_then(|s| s.load());

        let mut app = Self {
            config,
            theme,
            view: View::Topic,
            form,
            quiz: None,
            player: None,
            now: Instant::now(),
            music: Music::spawn(),
            recording_state: RecordingState::Idle,
            recorder: None,
            clipboard: ClipboardManager::new().ok(),
            store,
            generation_error: None,
            recording_error: None,
            last_save_path: None,
        };

        if let Some(quiz) = restored {
            tracing::info!(topic = %quiz.topic, "restored saved session");
            app.quiz = Some(quiz);
            app.start_playback();
        }

        (app, Task::none())
    }

    pub fn title(&self) -> String {
        match self.view {
            View::Topic => String::from("quizreel"),
            View::Generating => String::from("quizreel - Generating"),
            View::Player => match &self.quiz {
                Some(quiz) => format!("quizreel - {}", quiz.topic),
                None => String::from("quizreel"),
            },
            View::GenerationError => String::from("quizreel - Error"),
        }
    }

    pub fn theme(&self) -> Theme {
        if self.theme.is_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TopicChanged(topic) => {
                self.form.topic = topic;
            }
            Message::CountSelected(count) => {
                self.form.count = count;
                self.config.playback.default_question_count = count;
                let _ = self.config.save();
            }
            Message::AspectSelected(aspect) => {
                self.form.aspect = aspect;
                self.config.playback.default_aspect = aspect;
                let _ = self.config.save();
            }
            Message::Generate => {
                if !self.form.can_submit() || self.view == View::Generating {
                    return Task::none();
                }
                self.view = View::Generating;
                self.generation_error = None;

                let topic = self.form.topic.trim().to_string();
                let count = self.form.count;
                let aspect = self.form.aspect;
                let model = self.config.generator.model.clone();
                return Task::perform(
                    async move {
                        let generator = QuizGenerator::new(&model)?;
                        let questions = generator.generate(&topic, count)?;
                        Ok(Quiz {
                            topic,
                            aspect,
                            questions,
                        })
                    },
                    Message::QuizGenerated,
                );
            }
            Message::QuizGenerated(Ok(quiz)) => {
                if let Some(ref store) = self.store {
                    if let Err(e) = store.save(&quiz) {
                        tracing::warn!("failed to persist session: {}", e);
                    }
                }
                self.quiz = Some(quiz);
                self.start_playback();
            }
            Message::QuizGenerated(Err(e)) => {
                tracing::warn!("quiz generation failed: {}", e);
                self.generation_error = Some(e.to_string());
                self.view = View::GenerationError;
            }
            Message::Tick => {
                self.now = Instant::now();
                let events = match self.player.as_mut() {
                    Some(player) => player.poll(self.now),
                    None => Vec::new(),
                };
                for event in events {
                    match event {
                        PlayerEvent::PhaseChanged { phase, index } => {
                            tracing::debug!(?phase, index, "phase change");
                        }
                        PlayerEvent::Finished => {
                            tracing::info!("playback finished");
                            if self.recording_state == RecordingState::Recording {
                                return self.stop_recording();
                            }
                        }
                    }
                }
            }
            Message::StartRecording => {
                if !self.recording_state.can_start() || self.quiz.is_none() {
                    return Task::none();
                }
                self.recording_state = RecordingState::Preparing;
                self.recording_error = None;
                return Task::perform(
                    async move {
                        let monitors = list_monitors().map_err(|e| e.to_string())?;
                        monitors
                            .iter()
                            .find(|m| m.is_primary)
                            .or_else(|| monitors.first())
                            .cloned()
                            .ok_or_else(|| "No monitors found".to_string())
                    },
                    Message::CaptureProbed,
                );
            }
            Message::CaptureProbed(result) => {
                // StartOver may have raced the probe; only act if still preparing.
                if self.recording_state != RecordingState::Preparing {
                    return Task::none();
                }
                match result {
                    Ok(monitor) => {
                        tracing::info!(
                            display = %monitor.name,
                            width = monitor.width,
                            height = monitor.height,
                            "recording display"
                        );
                        let settings = RecordingSettings {
                            fps: self.config.recording.fps,
                            max_duration: std::time::Duration::from_secs(
                                self.config.recording.max_duration_secs as u64,
                            ),
                            monitor_id: Some(monitor.id),
                        };
                        let mut recorder = QuizRecorder::new(settings);
                        match recorder.start() {
                            Ok(()) => {
                                self.recorder = Some(recorder);
                                self.recording_state = RecordingState::Recording;
                                // The tape should hold the whole quiz, so
                                // playback restarts from the intro.
                                self.restart_playback();
                            }
                            Err(e) => {
                                tracing::warn!("failed to start recording: {}", e);
                                self.recording_state = RecordingState::Error;
                                self.recording_error = Some(e.to_string());
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("screen probe failed: {}", e);
                        self.recording_state = RecordingState::Error;
                        self.recording_error = Some(e);
                    }
                }
            }
            Message::StopRecording => {
                if self.recording_state == RecordingState::Recording {
                    return self.stop_recording();
                }
            }
            Message::RecordingSaved(result) => {
                match result {
                    Ok(path) => {
                        Sound::Saved.play_if_enabled(self.config.playback.music_enabled);
                        self.recording_state = RecordingState::Finished;
                        self.last_save_path = Some(PathBuf::from(&path));
                        if let Some(ref mut cb) = self.clipboard {
                            let _ = cb.copy_file_path(&path);
                        }
                        if self.config.ui.show_notifications {
                            let _ = show_notification(
                                "Recording Saved",
                                &format!("Saved to {}", path),
                            );
                        }
                    }
                    Err(e) => {
                        tracing::warn!("failed to save recording: {}", e);
                        self.recording_state = RecordingState::Error;
                        self.recording_error = Some(e.clone());
                        if self.config.ui.show_notifications {
                            let _ = show_notification("Recording Failed", &e);
                        }
                    }
                }
            }
            Message::Replay => {
                if self.recording_state.can_start() && self.quiz.is_some() {
                    self.restart_playback();
                }
            }
            Message::SaveCopyAs => {
                if let Some(ref source) = self.last_save_path {
                    let file_name = source
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| String::from("quiz.gif"));
                    return Task::perform(
                        async move {
                            let dialog = rfd::AsyncFileDialog::new()
                                .add_filter("GIF", &["gif"])
                                .set_file_name(file_name);
                            dialog.save_file().await.map(|h| h.path().to_path_buf())
                        },
                        Message::SaveCopyPath,
                    );
                }
            }
            Message::SaveCopyPath(dest) => {
                if let (Some(dest), Some(source)) = (dest, self.last_save_path.clone()) {
                    let result = std::fs::copy(&source, &dest);
                    if self.config.ui.show_notifications {
                        let _ = match result {
                            Ok(_) => show_notification(
                                "Copy Saved",
                                &format!("Saved to {}", dest.to_string_lossy()),
                            ),
                            Err(ref e) => show_notification("Copy Failed", &e.to_string()),
                        };
                    }
                    if let Err(e) = result {
                        tracing::warn!("failed to copy recording: {}", e);
                    }
                }
            }
            Message::StartOver => {
                self.music.stop();
                if let Some(ref mut recorder) = self.recorder {
                    recorder.reset();
                }
                self.recorder = None;
                self.recording_state = RecordingState::Idle;
                self.recording_error = None;
                self.generation_error = None;
                self.last_save_path = None;
                if let Some(ref mut player) = self.player {
                    player.stop();
                }
                self.player = None;
                self.quiz = None;
                self.form.topic.clear();
                if let Some(ref store) = self.store {
                    store.clear();
                }
                self.view = View::Topic;
            }
        }
        Task::none()
    }

    fn start_playback(&mut self) {
        let Some(ref quiz) = self.quiz else {
            return;
        };
        if quiz.is_empty() {
            return;
        }
        self.now = Instant::now();
        self.player = Some(Player::start(quiz.len(), self.now));
        self.view = View::Player;
        self.recording_state = RecordingState::Idle;
        self.recording_error = None;
        self.last_save_path = None;
        if self.config.playback.music_enabled {
            self.music.play(self.config.playback.music_volume);
        }
    }

    fn restart_playback(&mut self) {
        self.now = Instant::now();
        if let Some(ref mut player) = self.player {
            player.restart(self.now);
        } else if let Some(ref quiz) = self.quiz {
            self.player = Some(Player::start(quiz.len(), self.now));
        }
        if self.config.playback.music_enabled {
            self.music.play(self.config.playback.music_volume);
        }
    }

    fn stop_recording(&mut self) -> Task<Message> {
        let Some(mut recorder) = self.recorder.take() else {
            self.recording_state = RecordingState::Idle;
            return Task::none();
        };
        recorder.stop();
        tracing::info!(frames = recorder.frame_count(), "stopping recording");
        self.recording_state = RecordingState::Processing;

        let topic = self
            .quiz
            .as_ref()
            .map(|q| q.topic.clone())
            .unwrap_or_default();
        if let Err(e) = self.config.ensure_output_dir() {
            tracing::warn!("output directory unavailable: {}", e);
        }
        let output_path = get_unique_filepath(&self.config.recording_path(&topic));

        Task::perform(
            async move {
                // Give the capture thread a beat to land its final frames.
                std::thread::sleep(std::time::Duration::from_millis(500));
                match recorder.save(&output_path) {
                    Ok(()) => Ok(output_path.to_string_lossy().to_string()),
                    Err(e) => Err(e.to_string()),
                }
            },
            Message::RecordingSaved,
        )
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self.view {
            View::Topic => TopicView::view(&self.theme, &self.form),
            View::Generating => GeneratingView::view(&self.theme, self.form.topic.trim()),
            View::GenerationError => ErrorView::view(
                &self.theme,
                self.generation_error.as_deref().unwrap_or("Unknown error"),
            ),
            View::Player => match (&self.quiz, &self.player) {
                (Some(quiz), Some(player)) => PlayerView::view(
                    &self.theme,
                    quiz,
                    player,
                    player.phase_progress(self.now),
                    self.recording_state,
                    self.recording_error.as_deref(),
                    self.last_save_path
                        .as_ref()
                        .map(|p| p.to_str().unwrap_or_default()),
                ),
                _ => TopicView::view(&self.theme, &self.form),
            },
        }
    }

    pub fn subscription(&self) -> iced::Subscription<Message> {
        // Ticks only matter while phase timers are pending.
        let playing = self.player.as_ref().is_some_and(Player::is_running);
        if playing {
            iced::time::every(std::time::Duration::from_millis(100)).map(|_| Message::Tick)
        } else {
            iced::Subscription::none()
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new().0
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.music.stop();
        if let Some(ref mut recorder) = self.recorder {
            recorder.reset();
        }
    }
}
