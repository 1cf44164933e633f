//! Dashboard View
//!
//! Renders the build table with the build list summary in the header.

use crate::state::AppState;
use crate::view_models::DashboardViewModel;
use crate::views::layout::DashboardLayout;
use ratatui::{prelude::*, widgets::*};

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let layout = DashboardLayout::new(area);
    let vm = DashboardViewModel::from_state(&state.dashboard, &state.server_url, theme);

    f.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    // Header: summary of the board
    let header = Line::from(vec![
        Span::styled(" ci-tail ", theme.panel_title()),
        Span::styled(vm.summary_text.clone(), Style::default().fg(vm.summary_color)),
    ]);
    f.render_widget(
        Paragraph::new(header).style(theme.panel_background()),
        layout.header,
    );

    let offset = layout.row_offset(vm.selected_index);
    let rows: Vec<Row> = vm
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(layout.visible_rows())
        .map(|(index, row)| {
            let cells = vec![
                Cell::from(row.status_text.clone()).style(Style::default().fg(row.status_color)),
                Cell::from(row.id.clone()),
                Cell::from(row.title.clone()),
                Cell::from(row.git_ref.clone()),
                Cell::from(row.sha.clone()).style(theme.muted()),
                Cell::from(row.message.clone()),
            ];
            let row = Row::new(cells);
            if index == vm.selected_index {
                row.style(theme.table_selected())
            } else {
                row.style(theme.text())
            }
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(18),
        Constraint::Length(24),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Status", "Build", "Repository", "Ref", "SHA", "Commit"])
                .style(theme.panel_title()),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(vm.title.clone())
                .border_style(theme.panel_border()),
        );
    f.render_widget(table, layout.table);

    if vm.rows.is_empty() && layout.visible_rows() > 0 {
        let empty_area = Rect {
            y: layout.first_row_y(),
            height: 1,
            ..layout.table.inner(Margin::new(1, 0))
        };
        f.render_widget(
            Paragraph::new("No builds yet").style(theme.muted()),
            empty_area,
        );
    }

    let hints = [("j/k", "move"), ("Enter", "open"), ("q", "quit")];
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(format!(" {}", key), theme.key_hint()),
                Span::styled(format!(" {} ", description), theme.key_description()),
            ]
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(theme.panel_background()),
        layout.help,
    );
}
