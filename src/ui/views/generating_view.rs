use iced::widget::{column, container, text};
use iced::{Alignment, Element, Length};

use crate::ui::style::{container_style, AppTheme, ACCENT};
use crate::ui::Message;

pub struct GeneratingView;

impl GeneratingView {
    pub fn view(theme: &AppTheme, topic: &str) -> Element<'static, Message> {
        let message = text(format!("Generating a quiz about {}...", topic))
            .size(20)
            .color(ACCENT);
        let hint = text("This may take a moment...")
            .size(14)
            .color(theme.muted_text());

        let content = column![message, hint]
            .spacing(10)
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
}
