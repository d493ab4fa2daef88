//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::responses::Answer;
use crate::scoring::Rating;
use crate::taxonomy::Pillar;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Pillar colors (chart segments and list headers)
    pub environmental: Color,
    pub social: Color,
    pub governance: Color,

    // Answer markers
    pub answer_yes: Color,
    pub answer_no: Color,
    pub answer_none: Color,

    pub bar_empty: Color,

    // Question list
    pub category_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            environmental: Color::Green,
            social: Color::LightBlue,
            governance: Color::LightMagenta,
            answer_yes: Color::Green,
            answer_no: Color::Red,
            answer_none: Color::DarkGray,
            bar_empty: Color::Indexed(238),
            category_style: Style::new().fg(Color::Cyan).bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash: Color::Green,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
        }
    }

    /// Light theme palette: darker foregrounds, lighter bars
    pub fn light() -> Self {
        Self {
            environmental: Color::Rgb(0, 120, 0),
            social: Color::Blue,
            governance: Color::Magenta,
            answer_yes: Color::Rgb(0, 120, 0),
            answer_no: Color::Rgb(170, 0, 0),
            answer_none: Color::Gray,
            bar_empty: Color::Indexed(252),
            category_style: Style::new().fg(Color::Blue).bold(),
            row_selected: Style::new().reversed(),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash: Color::Rgb(0, 120, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
        }
    }

    pub fn pillar_color(&self, pillar: Pillar) -> Color {
        match pillar {
            Pillar::Environmental => self.environmental,
            Pillar::Social => self.social,
            Pillar::Governance => self.governance,
        }
    }

    pub fn answer_color(&self, answer: Answer) -> Color {
        match answer {
            Answer::Yes => self.answer_yes,
            Answer::No => self.answer_no,
            Answer::Unanswered => self.answer_none,
        }
    }

    /// Badge color of a rating, same on both palettes
    pub fn rating_color(&self, rating: Rating) -> Color {
        let (r, g, b) = rating.rgb();
        Color::Rgb(r, g, b)
    }
}

/// Pick the palette matching the terminal background.
///
/// Must run before the terminal switches to the alternate screen. Falls back
/// to the dark palette when the background cannot be queried.
pub fn resolve_theme() -> ThemeColors {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => {
            tracing::debug!("Light terminal background (luma {:.2})", luma);
            ThemeColors::light()
        }
        Ok(luma) => {
            tracing::debug!("Dark terminal background (luma {:.2})", luma);
            ThemeColors::dark()
        }
        Err(e) => {
            tracing::debug!("Could not detect terminal background: {}", e);
            ThemeColors::dark()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_colors_match_rating_rgb() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.rating_color(Rating::Bronze), Color::Rgb(0xcd, 0x7f, 0x32));
        assert_eq!(theme.rating_color(Rating::Green), Color::Rgb(0, 128, 0));
    }

    #[test]
    fn test_pillar_colors_distinct() {
        for theme in [ThemeColors::dark(), ThemeColors::light()] {
            let colors: Vec<Color> = Pillar::ALL.iter().map(|p| theme.pillar_color(*p)).collect();
            assert_ne!(colors[0], colors[1]);
            assert_ne!(colors[1], colors[2]);
            assert_ne!(colors[0], colors[2]);
        }
    }
}
