use ratatui::style::Color;

/// Dashboard palette, selectable between a dark and a light variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub border: Color,
    pub title: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub header_accent_fg: Color,
    pub header_accent_bg: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
    pub gauge_critical: Color,
    pub sparkline: Color,
    pub statusbar_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub status_err: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            border: Color::Rgb(88, 91, 112),
            title: Color::Rgb(205, 214, 244),
            text: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(147, 153, 178),
            header_accent_fg: Color::Rgb(17, 17, 27),
            header_accent_bg: Color::Rgb(137, 180, 250),
            gauge_filled: Color::Rgb(166, 227, 161),
            gauge_unfilled: Color::Rgb(49, 50, 68),
            gauge_critical: Color::Rgb(243, 139, 168),
            sparkline: Color::Rgb(137, 180, 250),
            statusbar_bg: Color::Rgb(24, 24, 37),
            pill_key_fg: Color::Rgb(17, 17, 27),
            pill_key_bg: Color::Rgb(137, 180, 250),
            status_err: Color::Rgb(243, 139, 168),
        }
    }

    pub fn light() -> Self {
        Theme {
            border: Color::Rgb(124, 127, 147),
            title: Color::Rgb(76, 79, 105),
            text: Color::Rgb(76, 79, 105),
            text_secondary: Color::Rgb(108, 111, 133),
            header_accent_fg: Color::Rgb(239, 241, 245),
            header_accent_bg: Color::Rgb(30, 102, 245),
            gauge_filled: Color::Rgb(64, 160, 43),
            gauge_unfilled: Color::Rgb(204, 208, 218),
            gauge_critical: Color::Rgb(210, 15, 57),
            sparkline: Color::Rgb(30, 102, 245),
            statusbar_bg: Color::Rgb(220, 224, 232),
            pill_key_fg: Color::Rgb(239, 241, 245),
            pill_key_bg: Color::Rgb(30, 102, 245),
            status_err: Color::Rgb(210, 15, 57),
        }
    }

    pub fn from_config(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Theme::light(),
            _ => Theme::dark(),
        }
    }
}
