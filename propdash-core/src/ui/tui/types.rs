use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextStyle {
    pub color: Option<Color>,
    pub bold: bool,
}

impl TextStyle {
    #[must_use]
    pub fn merge_color(mut self, fallback: Option<Color>) -> Self {
        if self.color.is_none() {
            self.color = fallback;
        }
        self
    }

    #[must_use]
    pub fn to_style(&self, fallback: Option<Color>) -> Style {
        let mut style = Style::default();
        if let Some(color) = self.color.or(fallback) {
            style = style.fg(color);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PickerTheme {
    pub foreground: Option<Color>,
    pub primary: Option<Color>,
    pub muted: Option<Color>,
    pub error: Option<Color>,
    pub highlight_bg: Color,
}

impl Default for PickerTheme {
    fn default() -> Self {
        Self {
            foreground: None,
            primary: Some(Color::Cyan),
            muted: Some(Color::DarkGray),
            error: Some(Color::Red),
            highlight_bg: Color::Blue,
        }
    }
}

impl PickerTheme {
    pub fn muted(&self) -> Style {
        TextStyle::default()
            .merge_color(self.muted)
            .to_style(self.foreground)
    }

    /// Headings and the selected player.
    pub fn primary(&self) -> Style {
        TextStyle {
            color: self.primary,
            bold: true,
        }
        .to_style(self.foreground)
    }

    pub fn error(&self) -> Style {
        TextStyle::default()
            .merge_color(self.error)
            .to_style(self.foreground)
    }

    pub fn highlighted(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}
