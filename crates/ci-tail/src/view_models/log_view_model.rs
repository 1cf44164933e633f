//! Log View Model
//!
//! Pre-computes the visible rows, minimap cells and status text of the
//! log viewer. Only the rows inside the viewport are converted.

use crate::state::LogViewState;
use ci_tail_ansi::{parse_line, AnsiStyle, Color as AnsiColor, NamedColor, ParsedLine, Severity, StyledSegment};
use ci_tail_core::LogView;
use ci_tail_theme::Theme;
use ratatui::style::{Color, Modifier, Style};

/// View model for the log viewer screen
#[derive(Debug, Clone)]
pub struct LogViewModel {
    pub title: String,
    /// Shareable link of the focused line, when there is one
    pub share_link: Option<String>,
    pub rows: Vec<LogRowViewModel>,
    pub minimap: Vec<MinimapCellViewModel>,
    pub status: LogStatusViewModel,
}

/// One visible log line
#[derive(Debug, Clone)]
pub struct LogRowViewModel {
    pub line_number: String, // right-aligned, 1-based
    pub segments: Vec<(String, Style)>,
    pub is_focused: bool,
    /// Text still waiting for its newline; has no line number yet
    pub is_provisional: bool,
}

/// One row of the minimap column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapCellViewModel {
    /// Marked line drawn in this row, if any
    pub mark: Option<usize>,
    pub severity: Option<Severity>,
    pub color: Color,
    /// Row lies inside the part of the log that is on screen
    pub in_viewport: bool,
}

/// Bottom status bar
#[derive(Debug, Clone)]
pub struct LogStatusViewModel {
    pub mode_text: String, // "FOLLOW" / "PAUSED" / ":12"
    pub mode_color: Color,
    pub position_text: String, // "lines 10-30 of 120 · 4096 bytes"
    pub marks_text: String, // "3 failures"
    pub error_text: Option<String>,
}

impl LogViewModel {
    /// Transform the open log into a display-ready view model
    pub fn from_state(state: &LogViewState, minimap_height: usize, theme: &Theme) -> Self {
        let view = &state.view;
        let total = view.log().len();
        let number_width = total.max(1).to_string().len();
        let focused = view.focused_line();

        let range = view.viewport().visible_range();
        let mut rows: Vec<LogRowViewModel> = view
            .log()
            .slice(range.clone())
            .iter()
            .zip(range.clone())
            .map(|(record, index)| {
                let number = format!("{:>width$}", index + 1, width = number_width);
                Self::build_row(record.parsed(), number, focused == Some(index), theme)
            })
            .collect();

        if let Some(tail) = view.log().pending_tail().filter(|_| range.contains(&total)) {
            let number = format!("{:>width$}", "~", width = number_width);
            let mut row = Self::build_row(&parse_line(tail), number, false, theme);
            row.is_provisional = true;
            rows.push(row);
        }

        Self {
            title: format!(" Build {} ", state.build_id),
            share_link: state.share_link(),
            rows,
            minimap: Self::build_minimap(view, minimap_height, theme),
            status: Self::build_status(state, theme),
        }
    }

    fn build_row(
        parsed: &ParsedLine,
        line_number: String,
        is_focused: bool,
        theme: &Theme,
    ) -> LogRowViewModel {
        let segments = parsed
            .segments
            .iter()
            .filter_map(|segment| {
                let text = display_text(segment);
                if text.is_empty() {
                    return None;
                }
                let style = if is_focused {
                    theme.focused_line()
                } else {
                    ansi_to_style(&segment.style)
                };
                Some((text, style))
            })
            .collect();

        LogRowViewModel {
            line_number,
            segments,
            is_focused,
            is_provisional: false,
        }
    }

    fn build_minimap(view: &LogView, height: usize, theme: &Theme) -> Vec<MinimapCellViewModel> {
        let total = view.log().len();
        let visible = view.viewport().visible_range();
        let mut cells: Vec<MinimapCellViewModel> = (0..height)
            .map(|row| MinimapCellViewModel {
                mark: None,
                severity: None,
                color: theme.minimap_bg,
                in_viewport: !visible.is_empty()
                    && row >= minimap_row(visible.start, total, height)
                    && row <= minimap_row(visible.end - 1, total, height),
            })
            .collect();

        for mark in view.minimap().marks() {
            let Some(cell) = cells.get_mut(minimap_row(mark.line, total, height)) else {
                continue;
            };
            // A failure outranks a success sharing the same row
            let outranks = match cell.severity {
                None => true,
                Some(existing) => existing != Severity::Failure && mark.severity == Severity::Failure,
            };
            if outranks {
                cell.mark = Some(mark.line);
                cell.severity = Some(mark.severity);
                cell.color = severity_color(mark.severity, theme);
            }
        }

        cells
    }

    fn build_status(state: &LogViewState, theme: &Theme) -> LogStatusViewModel {
        let view = &state.view;
        let viewport = view.viewport();

        let (mode_text, mode_color) = match &state.goto_input {
            Some(input) => (format!(":{}", input), theme.accent_primary),
            None if viewport.follow() => ("FOLLOW".to_string(), theme.status_success),
            None => ("PAUSED".to_string(), theme.status_warning),
        };

        let range = viewport.visible_range();
        let position_text = if range.is_empty() {
            format!("waiting for output · {} polls", state.polls)
        } else {
            format!(
                "lines {}-{} of {} · {} bytes",
                range.start + 1,
                range.end,
                view.log().row_count(),
                state.cursor
            )
        };

        let failures = view.minimap().failures();
        let marks_text = match failures {
            0 => format!("{} marks", view.minimap().len()),
            1 => "1 failure".to_string(),
            n => format!("{} failures", n),
        };

        let error_text = state.last_error.as_ref().map(|error| {
            if state.consecutive_failures > 1 {
                format!(
                    "{} ({} in a row, {} total)",
                    error, state.consecutive_failures, state.failures
                )
            } else {
                error.clone()
            }
        });

        LogStatusViewModel {
            mode_text,
            mode_color,
            position_text,
            marks_text,
            error_text,
        }
    }
}

/// Minimap row that represents `line` when `total` lines share `height` rows
pub fn minimap_row(line: usize, total: usize, height: usize) -> usize {
    if height == 0 || total <= height {
        line
    } else {
        line * height / total
    }
}

/// The marked line drawn at minimap `row`, failures first
pub fn mark_at_row(view: &LogView, row: usize, height: usize) -> Option<usize> {
    let total = view.log().len();
    let mut on_row = view
        .minimap()
        .marks()
        .iter()
        .filter(|mark| minimap_row(mark.line, total, height) == row);

    let first = on_row.next()?;
    if first.severity == Severity::Failure {
        return Some(first.line);
    }
    Some(
        on_row
            .find(|mark| mark.severity == Severity::Failure)
            .unwrap_or(first)
            .line,
    )
}

fn severity_color(severity: Severity, theme: &Theme) -> Color {
    match severity {
        Severity::Failure => theme.status_error,
        Severity::Success => theme.status_success,
        Severity::Plain => theme.text_muted,
    }
}

/// Tabs would be drawn as a single cell
fn display_text(segment: &StyledSegment) -> String {
    segment.text.replace('\t', "    ")
}

/// Convert a parsed ANSI style into a ratatui style
pub fn ansi_to_style(style: &AnsiStyle) -> Style {
    let mut result = Style::default();
    if let Some(fg) = style.fg_color {
        result = result.fg(ansi_to_color(fg));
    }
    if let Some(bg) = style.bg_color {
        result = result.bg(ansi_to_color(bg));
    }

    let flags = [
        (style.bold, Modifier::BOLD),
        (style.faint, Modifier::DIM),
        (style.italic, Modifier::ITALIC),
        (style.underline, Modifier::UNDERLINED),
        (style.blink, Modifier::SLOW_BLINK),
        (style.reversed, Modifier::REVERSED),
        (style.hidden, Modifier::HIDDEN),
        (style.strikethrough, Modifier::CROSSED_OUT),
    ];
    for (set, modifier) in flags {
        if set {
            result = result.add_modifier(modifier);
        }
    }
    result
}

fn ansi_to_color(color: AnsiColor) -> Color {
    match color {
        AnsiColor::Rgb(r, g, b) => Color::Rgb(r, g, b),
        AnsiColor::Palette256(index) => Color::Indexed(index),
        AnsiColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::Gray,
            NamedColor::BrightBlack => Color::DarkGray,
            NamedColor::BrightRed => Color::LightRed,
            NamedColor::BrightGreen => Color::LightGreen,
            NamedColor::BrightYellow => Color::LightYellow,
            NamedColor::BrightBlue => Color::LightBlue,
            NamedColor::BrightMagenta => Color::LightMagenta,
            NamedColor::BrightCyan => Color::LightCyan,
            NamedColor::BrightWhite => Color::White,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ci_tail_core::LineFragment;
    use pretty_assertions::assert_eq;

    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";

    fn state(output: &str, height: usize) -> LogViewState {
        let mut view = LogView::new(height);
        view.on_chunk(output);
        LogViewState::new(1, "42".to_string(), None, view)
    }

    #[test]
    fn test_minimap_row_scaling() {
        // Fewer lines than rows: one row per line
        assert_eq!(minimap_row(3, 5, 10), 3);
        // 100 lines over 10 rows
        assert_eq!(minimap_row(0, 100, 10), 0);
        assert_eq!(minimap_row(55, 100, 10), 5);
        assert_eq!(minimap_row(99, 100, 10), 9);
    }

    #[test]
    fn test_rows_cover_viewport_only() {
        let output: String = (0..10).map(|i| format!("line {}\n", i)).collect();
        let state = state(&output, 4);
        let vm = LogViewModel::from_state(&state, 4, &Theme::default());

        // Following: last four lines
        assert_eq!(vm.rows.len(), 4);
        assert_eq!(vm.rows[0].line_number, " 7");
        assert_eq!(vm.rows[0].segments[0].0, "line 6");
        assert_eq!(vm.status.mode_text, "FOLLOW");
        assert_eq!(vm.status.position_text, "lines 7-10 of 10 · 0 bytes");
    }

    #[test]
    fn test_pending_tail_is_a_provisional_row() {
        let state = state("a\nb\n\x1b[32mcompil", 10);
        let vm = LogViewModel::from_state(&state, 10, &Theme::default());

        assert_eq!(vm.rows.len(), 3);
        let tail = &vm.rows[2];
        assert!(tail.is_provisional);
        assert_eq!(tail.line_number, "~");
        assert_eq!(tail.segments[0].0, "compil");
        assert!(!vm.rows[1].is_provisional);
        assert_eq!(vm.status.position_text, "lines 1-3 of 3 · 0 bytes");
    }

    #[test]
    fn test_focused_row_is_flagged() {
        let mut view = LogView::with_fragment(10, Some(LineFragment::new(1)));
        view.on_chunk("a\nb\nc\n");
        let state = LogViewState::new(1, "42".to_string(), Some("http://ci.test/b".to_string()), view);
        let vm = LogViewModel::from_state(&state, 10, &Theme::default());

        let focused: Vec<_> = vm.rows.iter().map(|r| r.is_focused).collect();
        assert_eq!(focused, vec![false, true, false]);
        assert_eq!(vm.share_link.as_deref(), Some("http://ci.test/b#line1"));
    }

    #[test]
    fn test_minimap_marks_and_hit_test() {
        let output = format!("ok\n{RED}FAIL{RESET}\nok\n{RED}FAIL{RESET}\n");
        let state = state(&output, 10);
        let theme = Theme::default();
        let vm = LogViewModel::from_state(&state, 10, &theme);

        assert_eq!(vm.minimap[1].mark, Some(1));
        assert_eq!(vm.minimap[1].color, theme.status_error);
        assert_eq!(vm.minimap[2].mark, None);
        assert_eq!(vm.status.marks_text, "2 failures");

        assert_eq!(mark_at_row(&state.view, 3, 10), Some(3));
        assert_eq!(mark_at_row(&state.view, 0, 10), None);
    }

    #[test]
    fn test_status_shows_prompt_and_errors() {
        let mut state = state("a\n", 10);
        state.goto_input = Some("12".to_string());
        state.last_error = Some("Request timed out after 30s".to_string());
        state.consecutive_failures = 3;
        state.failures = 5;
        let vm = LogViewModel::from_state(&state, 10, &Theme::default());

        assert_eq!(vm.status.mode_text, ":12");
        assert_eq!(
            vm.status.error_text.as_deref(),
            Some("Request timed out after 30s (3 in a row, 5 total)")
        );
    }

    #[test]
    fn test_ansi_to_style() {
        let style = AnsiStyle {
            fg_color: Some(AnsiColor::Named(NamedColor::BrightRed)),
            bold: true,
            ..AnsiStyle::default()
        };
        assert_eq!(
            ansi_to_style(&style),
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
        );
    }
}
