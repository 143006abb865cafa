use iced::widget::{button, container};
use iced::{Border, Color};

pub const BACKGROUND_DARK: Color = Color::from_rgb(0.08, 0.09, 0.12);
pub const BACKGROUND_LIGHT: Color = Color::from_rgb(0.95, 0.95, 0.95);
pub const SURFACE_DARK: Color = Color::from_rgb(0.13, 0.15, 0.19);
pub const SURFACE_LIGHT: Color = Color::from_rgb(0.9, 0.9, 0.9);
pub const TILE_DARK: Color = Color::from_rgb(0.2, 0.22, 0.27);
pub const TILE_LIGHT: Color = Color::from_rgb(0.85, 0.85, 0.85);
pub const TEXT_DARK: Color = Color::from_rgb(0.92, 0.93, 0.95);
pub const TEXT_LIGHT: Color = Color::from_rgb(0.1, 0.1, 0.1);
pub const HOVER_DARK: Color = Color::from_rgb(0.27, 0.29, 0.35);
pub const HOVER_LIGHT: Color = Color::from_rgb(0.75, 0.75, 0.75);

pub const ACCENT: Color = Color::from_rgb(0.25, 0.75, 0.85);
pub const CORRECT: Color = Color::from_rgb(0.16, 0.62, 0.32);
pub const RECORD: Color = Color::from_rgb(0.78, 0.22, 0.25);

pub const BORDER_RADIUS: f32 = 12.0;
pub const SMALL_RADIUS: f32 = 8.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppTheme {
    pub is_dark: bool,
}

impl AppTheme {
    pub fn dark() -> Self {
        Self { is_dark: true }
    }

    pub fn light() -> Self {
        Self { is_dark: false }
    }

    pub fn background(&self) -> Color {
        if self.is_dark {
            BACKGROUND_DARK
        } else {
            BACKGROUND_LIGHT
        }
    }

    pub fn surface(&self) -> Color {
        if self.is_dark {
            SURFACE_DARK
        } else {
            SURFACE_LIGHT
        }
    }

    pub fn tile(&self) -> Color {
        if self.is_dark {
            TILE_DARK
        } else {
            TILE_LIGHT
        }
    }

    pub fn text(&self) -> Color {
        if self.is_dark {
            TEXT_DARK
        } else {
            TEXT_LIGHT
        }
    }

    pub fn muted_text(&self) -> Color {
        if self.is_dark {
            Color::from_rgb(0.6, 0.63, 0.68)
        } else {
            Color::from_rgb(0.4, 0.4, 0.4)
        }
    }

    pub fn hover(&self) -> Color {
        if self.is_dark {
            HOVER_DARK
        } else {
            HOVER_LIGHT
        }
    }
}

pub fn tile_button_style(theme: &AppTheme) -> button::Style {
    button::Style {
        background: Some(iced::Background::Color(theme.tile())),
        text_color: theme.text(),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: SMALL_RADIUS.into(),
        },
        shadow: iced::Shadow::default(),
    }
}

pub fn tile_button_hovered_style(theme: &AppTheme) -> button::Style {
    button::Style {
        background: Some(iced::Background::Color(theme.hover())),
        text_color: theme.text(),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: SMALL_RADIUS.into(),
        },
        shadow: iced::Shadow::default(),
    }
}

pub fn selected_button_style(_theme: &AppTheme) -> button::Style {
    button::Style {
        background: Some(iced::Background::Color(ACCENT)),
        text_color: Color::WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: SMALL_RADIUS.into(),
        },
        shadow: iced::Shadow::default(),
    }
}

pub fn primary_button_style(_theme: &AppTheme) -> button::Style {
    button::Style {
        background: Some(iced::Background::Color(ACCENT)),
        text_color: Color::WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: SMALL_RADIUS.into(),
        },
        shadow: iced::Shadow::default(),
    }
}

pub fn record_button_style(_theme: &AppTheme) -> button::Style {
    button::Style {
        background: Some(iced::Background::Color(RECORD)),
        text_color: Color::WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: SMALL_RADIUS.into(),
        },
        shadow: iced::Shadow::default(),
    }
}

pub fn container_style(theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(theme.background())),
        text_color: Some(theme.text()),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 0.0.into(),
        },
        shadow: iced::Shadow::default(),
    }
}

/// The fixed-aspect playback surface the recording captures.
pub fn stage_style(theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(if theme.is_dark {
            Color::from_rgb(0.06, 0.07, 0.1)
        } else {
            Color::from_rgb(0.12, 0.13, 0.17)
        })),
        text_color: Some(TEXT_DARK),
        border: Border {
            color: theme.tile(),
            width: 1.0,
            radius: BORDER_RADIUS.into(),
        },
        shadow: iced::Shadow::default(),
    }
}

pub fn card_style(theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(theme.surface())),
        text_color: Some(theme.text()),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: BORDER_RADIUS.into(),
        },
        shadow: iced::Shadow::default(),
    }
}

/// The translucent question card shown on the stage.
pub fn stage_card_style(_theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color::from_rgba(
            0.16, 0.18, 0.22, 0.85,
        ))),
        text_color: Some(TEXT_DARK),
        border: Border {
            color: Color::from_rgb(0.25, 0.27, 0.32),
            width: 1.0,
            radius: BORDER_RADIUS.into(),
        },
        shadow: iced::Shadow::default(),
    }
}

/// Answer option tile; during the reveal the correct option is highlighted
/// and the rest fade back. The stage is always dark, whatever the app theme.
pub fn option_style(_theme: &AppTheme, revealed: bool, is_correct: bool) -> container::Style {
    let (background, text_color) = if revealed {
        if is_correct {
            (CORRECT, Color::WHITE)
        } else {
            (
                Color::from_rgba(0.2, 0.2, 0.24, 0.5),
                Color::from_rgb(0.55, 0.57, 0.6),
            )
        }
    } else {
        (Color::from_rgb(0.24, 0.26, 0.31), TEXT_DARK)
    };

    container::Style {
        background: Some(iced::Background::Color(background)),
        text_color: Some(text_color),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: SMALL_RADIUS.into(),
        },
        shadow: iced::Shadow::default(),
    }
}
