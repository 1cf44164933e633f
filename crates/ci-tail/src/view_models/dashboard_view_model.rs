//! View model for the build list
//!
//! Pre-computes all display text and colors of the dashboard table.

use crate::state::DashboardState;
use ci_tail_core::{BuildRow, BuildStatus};
use ci_tail_theme::Theme;
use ratatui::style::Color;

/// View model for the build table
#[derive(Debug, Clone)]
pub struct DashboardViewModel {
    pub title: String,
    /// "3 running · 10 passed · 2 failed", or the load state
    pub summary_text: String,
    pub summary_color: Color,
    pub rows: Vec<BuildRowViewModel>,
    pub selected_index: usize,
}

/// View model for a single build row
#[derive(Debug, Clone)]
pub struct BuildRowViewModel {
    pub status_text: String, // "✓ passed"
    pub status_color: Color,
    pub id: String,
    pub title: String,   // "acme/widgets"
    pub git_ref: String, // "main"
    pub sha: String,     // "deadbee"
    pub message: String, // first line of the head commit
}

impl DashboardViewModel {
    /// Transform state into display-ready view model
    pub fn from_state(state: &DashboardState, server_url: &str, theme: &Theme) -> Self {
        let (summary_text, summary_color) = Self::build_summary(state, theme);

        Self {
            title: format!(" Builds on {} ", server_url),
            summary_text,
            summary_color,
            rows: state
                .board
                .rows()
                .iter()
                .map(|row| Self::build_row(row, theme))
                .collect(),
            selected_index: state.selected,
        }
    }

    fn build_summary(state: &DashboardState, theme: &Theme) -> (String, Color) {
        if let Some(error) = &state.last_error {
            return (format!("Error: {}", error), theme.status_error);
        }
        if !state.loaded {
            return ("Loading...".to_string(), theme.status_warning);
        }

        let board = &state.board;
        (
            format!(
                "{} running · {} passed · {} failed",
                board.count(BuildStatus::Running),
                board.count(BuildStatus::Passed),
                board.count(BuildStatus::Failed)
            ),
            theme.text_muted,
        )
    }

    fn build_row(row: &BuildRow, theme: &Theme) -> BuildRowViewModel {
        let build = &row.build;
        let message = build
            .commits
            .first()
            .and_then(|commit| commit.message.lines().next())
            .unwrap_or_default()
            .to_string();

        BuildRowViewModel {
            status_text: format!("{} {}", status_icon(row.status), row.status),
            status_color: status_color(row.status, theme),
            id: build.id.clone(),
            title: row.title(),
            git_ref: build.git_ref.clone(),
            sha: build.sha.chars().take(7).collect(),
            message,
        }
    }
}

fn status_icon(status: BuildStatus) -> &'static str {
    match status {
        BuildStatus::Running => "●",
        BuildStatus::Passed => "✓",
        BuildStatus::Failed => "✗",
    }
}

fn status_color(status: BuildStatus, theme: &Theme) -> Color {
    match status {
        BuildStatus::Running => theme.status_running,
        BuildStatus::Passed => theme.status_success,
        BuildStatus::Failed => theme.status_error,
    }
}
