use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::config::Config;
use crate::quiz::{Aspect, QuestionCount};
use crate::ui::style::{
    card_style, container_style, primary_button_style, selected_button_style, tile_button_style,
    AppTheme, ACCENT,
};
use crate::ui::Message;

#[derive(Debug, Clone)]
pub struct TopicFormState {
    pub topic: String,
    pub count: QuestionCount,
    pub aspect: Aspect,
}

impl TopicFormState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            topic: String::new(),
            count: config.playback.default_question_count,
            aspect: config.playback.default_aspect,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.topic.trim().is_empty()
    }
}

pub struct TopicView;

impl TopicView {
    pub fn view<'a>(theme: &AppTheme, state: &'a TopicFormState) -> Element<'a, Message> {
        let title = text("AI Quiz Video Generator").size(34).color(ACCENT);
        let subtitle = text(
            "Enter any topic, choose your settings, and the AI will \
             create a quiz video for you to record.",
        )
        .size(15)
        .color(theme.muted_text());

        let topic_input = text_input("e.g. 'The Roman Empire' or '80s Pop Music'", &state.topic)
            .on_input(Message::TopicChanged)
            .on_submit(Message::Generate)
            .padding(12)
            .size(16);

        let count_row = QuestionCount::all()
            .iter()
            .fold(row![].spacing(8), |r, &count| {
                let style = if count == state.count {
                    selected_button_style(theme)
                } else {
                    tile_button_style(theme)
                };
                r.push(
                    button(text(count.as_usize().to_string()).size(14))
                        .padding([8, 18])
                        .style(move |_t, _s| style)
                        .on_press(Message::CountSelected(count)),
                )
            });

        let aspect_row = Aspect::all().iter().fold(row![].spacing(8), |r, &aspect| {
            let style = if aspect == state.aspect {
                selected_button_style(theme)
            } else {
                tile_button_style(theme)
            };
            r.push(
                button(
                    column![
                        text(aspect.display_name()).size(14),
                        text(aspect.hint()).size(11),
                    ]
                    .spacing(2)
                    .align_x(Alignment::Center),
                )
                .padding([8, 14])
                .style(move |_t, _s| style)
                .on_press(Message::AspectSelected(aspect)),
            )
        });

        let generate_style = primary_button_style(theme);
        let generate_btn = button(text("Generate Quiz Video").size(16))
            .padding([12, 24])
            .style(move |_t, _s| generate_style)
            .on_press_maybe(state.can_submit().then_some(Message::Generate));

        let form = column![
            topic_input,
            column![text("Number of Questions").size(14), count_row].spacing(6),
            column![text("Video Format").size(14), aspect_row].spacing(6),
            generate_btn,
        ]
        .spacing(18)
        .align_x(Alignment::Center);

        let card = container(form).padding(24).style({
            let style = card_style(theme);
            move |_| style
        });

        let content = column![title, subtitle, card]
            .spacing(16)
            .align_x(Alignment::Center)
            .max_width(560);

        let background = container_style(theme);
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(move |_| background)
            .into()
    }
}
