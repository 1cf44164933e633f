//! Log View
//!
//! Renders the open log: header, visible lines, minimap column and the
//! status bar.

use crate::state::LogViewState;
use crate::view_models::{LogStatusViewModel, LogViewModel, MinimapCellViewModel};
use crate::views::layout::LogLayout;
use ci_tail_theme::Theme;
use ratatui::{prelude::*, widgets::*};

pub fn render(state: &LogViewState, theme: &Theme, area: Rect, f: &mut Frame) {
    let layout = LogLayout::new(area);
    let vm = LogViewModel::from_state(state, layout.minimap.height as usize, theme);

    f.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    render_header(f, &vm, theme, layout.header);
    render_lines(f, &vm, theme, layout.lines);
    render_minimap(f, &vm.minimap, theme, layout.minimap);
    render_status(f, &vm.status, theme, layout.status);
}

fn render_header(f: &mut Frame, vm: &LogViewModel, theme: &Theme, area: Rect) {
    let mut spans = vec![Span::styled(vm.title.clone(), theme.panel_title())];
    if let Some(link) = &vm.share_link {
        spans.push(Span::styled(format!(" {}", link), theme.muted()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(theme.panel_background()),
        area,
    );
}

fn render_lines(f: &mut Frame, vm: &LogViewModel, theme: &Theme, area: Rect) {
    if vm.rows.is_empty() {
        let waiting = Paragraph::new("Waiting for output...")
            .style(theme.muted())
            .alignment(Alignment::Center);
        f.render_widget(waiting, area);
        return;
    }

    // One log line per screen row, no wrapping
    let lines: Vec<Line> = vm
        .rows
        .iter()
        .map(|row| {
            let mut spans = Vec::with_capacity(row.segments.len() + 1);
            let number_style = if row.is_focused {
                theme.focused_line()
            } else if row.is_provisional {
                theme.muted()
            } else {
                theme.line_number()
            };
            spans.push(Span::styled(format!("{} ", row.line_number), number_style));
            spans.extend(
                row.segments
                    .iter()
                    .map(|(text, style)| Span::styled(text.clone(), *style)),
            );

            let line = Line::from(spans);
            if row.is_focused {
                line.style(theme.focused_line())
            } else {
                line
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines).style(theme.text()), area);
}

fn render_minimap(f: &mut Frame, cells: &[MinimapCellViewModel], theme: &Theme, area: Rect) {
    let lines: Vec<Line> = cells
        .iter()
        .map(|cell| {
            let bg = if cell.in_viewport {
                theme.minimap_viewport
            } else {
                theme.minimap_bg
            };
            let symbol = if cell.mark.is_some() { "▐█" } else { "  " };
            Line::from(Span::styled(symbol, Style::default().fg(cell.color).bg(bg)))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn render_status(f: &mut Frame, vm: &LogStatusViewModel, theme: &Theme, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", vm.mode_text),
            Style::default()
                .fg(theme.bg_primary)
                .bg(vm.mode_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", vm.position_text), theme.key_description()),
        Span::styled(format!("· {} ", vm.marks_text), theme.muted()),
    ];
    if let Some(error) = &vm.error_text {
        spans.push(Span::styled(format!("· {} ", error), theme.error()));
    }

    let hints = [("n/N", "marks"), (":", "go to"), ("G", "follow"), ("q", "close")];
    for (key, description) in hints {
        spans.push(Span::styled(format!(" {}", key), theme.key_hint()));
        spans.push(Span::styled(format!(" {}", description), theme.key_description()));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(theme.panel_background()),
        area,
    );
}
