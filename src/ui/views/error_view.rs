use iced::widget::{button, column, container, text};
use iced::{Alignment, Color, Element, Length};

use crate::ui::style::{container_style, tile_button_style, AppTheme};
use crate::ui::Message;

const ERROR_RED: Color = Color::from_rgb(0.9, 0.35, 0.35);

pub struct ErrorView;

impl ErrorView {
    pub fn view<'a>(theme: &AppTheme, message: &'a str) -> Element<'a, Message> {
        let title = text("Generation Failed").size(26).color(ERROR_RED);
        let detail = text(message).size(15);

        let retry_style = tile_button_style(theme);
        let retry_btn = button(text("Try Again").size(15))
            .padding([10, 20])
            .style(move |_t, _s| retry_style)
            .on_press(Message::StartOver);

        let content = column![title, detail, retry_btn]
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
