use ratatui::{prelude::*, style::palette::tailwind};

/// Application theme - centralized color and style management
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg_primary: Color,
    pub bg_panel: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accent colors
    pub accent_primary: Color,

    // Build and line status colors
    pub status_success: Color,
    pub status_error: Color,
    pub status_warning: Color,
    pub status_running: Color,

    // Focused log line
    pub focused_bg: Color,
    pub focused_fg: Color,

    // Selected dashboard row
    pub selected_bg: Color,
    pub selected_fg: Color,

    // Minimap column
    pub minimap_bg: Color,
    pub minimap_viewport: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg_primary: tailwind::SLATE.c950,
            bg_panel: tailwind::SLATE.c800,

            text_primary: tailwind::SLATE.c100,
            text_secondary: tailwind::SLATE.c200,
            text_muted: tailwind::SLATE.c400,

            accent_primary: tailwind::CYAN.c400,

            status_success: tailwind::GREEN.c400,
            status_error: tailwind::RED.c400,
            status_warning: tailwind::YELLOW.c400,
            status_running: tailwind::BLUE.c400,

            focused_bg: tailwind::AMBER.c300,
            focused_fg: tailwind::SLATE.c950,

            selected_bg: tailwind::BLUE.c400,
            selected_fg: Color::White,

            minimap_bg: tailwind::SLATE.c900,
            minimap_viewport: tailwind::SLATE.c600,
        }
    }

    /// Style for panel backgrounds (status bar, help line)
    pub fn panel_background(&self) -> Style {
        Style::default().bg(self.bg_panel)
    }

    /// Style for panel borders
    pub fn panel_border(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn panel_title(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints (e.g., "q" in "q quit")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_description(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Style for the focused log line
    pub fn focused_line(&self) -> Style {
        Style::default()
            .fg(self.focused_fg)
            .bg(self.focused_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the selected dashboard row
    pub fn table_selected(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for log line numbers
    pub fn line_number(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.status_error)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for muted/helper text
    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }
}
