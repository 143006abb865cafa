use iced::widget::{button, column, container, progress_bar, row, text};
use iced::{Alignment, Color, Element, Length};

use crate::player::{Phase, Player};
use crate::quiz::{Aspect, Question, Quiz};
use crate::recording::RecordingState;
use crate::ui::style::{
    container_style, option_style, record_button_style, stage_card_style, stage_style,
    tile_button_hovered_style, tile_button_style, AppTheme, ACCENT, CORRECT,
};
use crate::ui::Message;

const OPTION_LETTERS: [&str; 4] = ["A", "B", "C", "D"];
const ERROR_RED: Color = Color::from_rgb(0.9, 0.35, 0.35);

pub struct PlayerView;

impl PlayerView {
    #[allow(clippy::too_many_arguments)]
    pub fn view<'a>(
        theme: &AppTheme,
        quiz: &'a Quiz,
        player: &'a Player,
        countdown_progress: f32,
        recording_state: RecordingState,
        recording_error: Option<&'a str>,
        saved_path: Option<&'a str>,
    ) -> Element<'a, Message> {
        let stage = Self::stage(theme, quiz, player, countdown_progress);
        let controls = Self::controls(theme, recording_state, saved_path.is_some());
        let status = Self::status(theme, recording_state, recording_error, saved_path);

        let content = column![stage, controls, status]
            .spacing(14)
            .align_x(Alignment::Center);

        let background = container_style(theme);
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(move |_| background)
            .into()
    }

    fn stage<'a>(
        theme: &AppTheme,
        quiz: &'a Quiz,
        player: &'a Player,
        countdown_progress: f32,
    ) -> Element<'a, Message> {
        let (width, height) = quiz.aspect.stage_size();

        let inner: Element<'a, Message> = match player.phase() {
            Phase::Intro => column![
                text(quiz.topic.to_uppercase()).size(40),
                text("Quiz Challenge").size(22).color(ACCENT),
            ]
            .spacing(10)
            .align_x(Alignment::Center)
            .into(),
            Phase::Finished => column![
                text("Quiz Complete!").size(36),
                text("Thanks for playing.").size(18).color(theme.muted_text()),
            ]
            .spacing(10)
            .align_x(Alignment::Center)
            .into(),
            phase => match quiz.questions.get(player.index()) {
                Some(question) => {
                    Self::question_card(theme, quiz, question, player, phase, countdown_progress)
                }
                None => text("").into(),
            },
        };

        let style = stage_style(theme);
        container(inner)
            .center_x(Length::Fixed(width))
            .center_y(Length::Fixed(height))
            .padding(16)
            .style(move |_| style)
            .into()
    }

    fn question_card<'a>(
        theme: &AppTheme,
        quiz: &'a Quiz,
        question: &'a Question,
        player: &'a Player,
        phase: Phase,
        countdown_progress: f32,
    ) -> Element<'a, Message> {
        let revealed = phase == Phase::Reveal;

        let header = text(format!(
            "Question {} / {}",
            player.index() + 1,
            player.question_count()
        ))
        .size(14)
        .color(ACCENT);

        let prompt_size = match quiz.aspect {
            Aspect::Landscape => 24,
            Aspect::Portrait => 19,
        };
        let prompt = text(question.question.as_str()).size(prompt_size);

        let options = Self::options(theme, quiz.aspect, question, revealed);

        let mut card = column![header, prompt, options].spacing(14);
        if phase == Phase::Countdown {
            // Shrinks from full width to zero over the countdown.
            card = card.push(
                progress_bar(0.0..=1.0, (1.0 - countdown_progress).clamp(0.0, 1.0)).height(6.0),
            );
        }

        let style = stage_card_style(theme);
        container(card)
            .padding(18)
            .width(Length::Fill)
            .style(move |_| style)
            .into()
    }

    fn options<'a>(
        theme: &AppTheme,
        aspect: Aspect,
        question: &'a Question,
        revealed: bool,
    ) -> Element<'a, Message> {
        let tiles: Vec<Element<'a, Message>> = question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let is_correct = i == question.correct_answer_index;
                let style = option_style(theme, revealed, is_correct);
                let letter_color = if revealed && is_correct {
                    Color::WHITE
                } else {
                    ACCENT
                };
                container(
                    row![
                        text(OPTION_LETTERS[i.min(3)]).size(15).color(letter_color),
                        text(option.as_str()).size(15),
                    ]
                    .spacing(10)
                    .align_y(Alignment::Center),
                )
                .padding([10, 14])
                .width(Length::Fill)
                .style(move |_| style)
                .into()
            })
            .collect();

        match aspect {
            // Two columns of two, like the widescreen layout.
            Aspect::Landscape => {
                let mut rows = column![].spacing(8);
                let mut iter = tiles.into_iter();
                while let (Some(a), b) = (iter.next(), iter.next()) {
                    let mut pair = row![a].spacing(8);
                    if let Some(b) = b {
                        pair = pair.push(b);
                    }
                    rows = rows.push(pair);
                }
                rows.into()
            }
            Aspect::Portrait => {
                let mut rows = column![].spacing(8);
                for tile in tiles {
                    rows = rows.push(tile);
                }
                rows.into()
            }
        }
    }

    fn controls(
        theme: &AppTheme,
        recording_state: RecordingState,
        has_saved_copy: bool,
    ) -> Element<'static, Message> {
        let record_label = match recording_state {
            RecordingState::Idle => "Record Video",
            RecordingState::Preparing => "Preparing...",
            RecordingState::Recording => "◉ Recording...",
            RecordingState::Processing => "Saving...",
            RecordingState::Finished => "Record Again",
            RecordingState::Error => "Retry Recording",
        };
        let record_style = record_button_style(theme);
        let record_btn = button(text(record_label).size(14))
            .padding([10, 18])
            .style(move |_t, _s| record_style)
            .on_press_maybe(
                recording_state
                    .can_start()
                    .then_some(Message::StartRecording),
            );

        let mut controls = row![record_btn].spacing(10).align_y(Alignment::Center);

        if recording_state == RecordingState::Recording {
            controls = controls.push(Self::plain_button(theme, "Stop", Some(Message::StopRecording)));
        }

        controls = controls.push(Self::plain_button(
            theme,
            "Replay",
            recording_state.can_start().then_some(Message::Replay),
        ));

        if has_saved_copy {
            controls = controls.push(Self::plain_button(
                theme,
                "Save a copy...",
                Some(Message::SaveCopyAs),
            ));
        }

        controls = controls.push(Self::plain_button(
            theme,
            "Start Over",
            Some(Message::StartOver),
        ));

        controls.into()
    }

    fn plain_button(
        theme: &AppTheme,
        label: &'static str,
        on_press: Option<Message>,
    ) -> Element<'static, Message> {
        let normal_style = tile_button_style(theme);
        let hover_style = tile_button_hovered_style(theme);

        button(text(label).size(14))
            .padding([10, 18])
            .style(move |_t, status| {
                if matches!(status, button::Status::Hovered | button::Status::Pressed) {
                    hover_style
                } else {
                    normal_style
                }
            })
            .on_press_maybe(on_press)
            .into()
    }

    fn status<'a>(
        theme: &AppTheme,
        recording_state: RecordingState,
        recording_error: Option<&'a str>,
        saved_path: Option<&'a str>,
    ) -> Element<'a, Message> {
        let line: Element<'a, Message> = match recording_state {
            RecordingState::Recording => text("Recording stops automatically when the quiz ends.")
                .size(14)
                .color(ACCENT)
                .into(),
            RecordingState::Preparing => text("Preparing to record the screen...")
                .size(14)
                .color(theme.muted_text())
                .into(),
            RecordingState::Processing => text("Encoding the recording...")
                .size(14)
                .color(theme.muted_text())
                .into(),
            RecordingState::Finished => text(format!(
                "Saved to {}",
                saved_path.unwrap_or("the output folder")
            ))
            .size(14)
            .color(CORRECT)
            .into(),
            RecordingState::Error => text(format!(
                "Recording failed: {}",
                recording_error.unwrap_or("unknown error")
            ))
            .size(14)
            .color(ERROR_RED)
            .into(),
            RecordingState::Idle => text("Record the playback to save it as a video.")
                .size(14)
                .color(theme.muted_text())
                .into(),
        };

        container(line).height(Length::Fixed(24.0)).into()
    }
}
