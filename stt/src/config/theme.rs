use cadence::Status;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Colors used to draw the test
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Theme {
    /// Characters not typed yet
    pub pending: Color,
    pub correct: Color,
    pub wrong: Color,
    /// Title and key hints
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            pending: Color::Rgb(0x80, 0x80, 0x80),
            correct: Color::Rgb(0xFF, 0xFF, 0x00),
            wrong: Color::Rgb(0xFF, 0x00, 0x00),
            highlight: Color::Blue,
        }
    }
}

impl Theme {
    /// Style of a character with the given status
    pub fn style_for(&self, status: Status) -> Style {
        let color = match status {
            Status::Pending => self.pending,
            Status::Correct => self.correct,
            Status::Wrong => self.wrong,
        };

        Style::new().fg(color)
    }

    /// Style of the character under the cursor
    pub fn cursor_style(&self, status: Status) -> Style {
        self.style_for(status).add_modifier(Modifier::UNDERLINED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        let theme = Theme::default();

        assert_eq!(theme.style_for(Status::Pending).fg, Some(theme.pending));
        assert_eq!(theme.style_for(Status::Correct).fg, Some(theme.correct));
        assert_eq!(theme.style_for(Status::Wrong).fg, Some(theme.wrong));
    }

    #[test]
    fn test_cursor_is_underlined() {
        let theme = Theme::default();
        let style = theme.cursor_style(Status::Pending);

        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(style.fg, Some(theme.pending));
    }
}
