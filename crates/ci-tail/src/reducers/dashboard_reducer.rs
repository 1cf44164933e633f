//! Dashboard Reducer

use crate::actions::DashboardAction;
use crate::state::DashboardState;

/// Reduce dashboard state based on DashboardAction
pub fn reduce_dashboard(mut state: DashboardState, action: &DashboardAction) -> DashboardState {
    match action {
        DashboardAction::BuildsLoaded(builds) => {
            // Keep the cursor on the same build when new rows are prepended
            let selected_id = state.selected_row().map(|row| row.id().to_string());
            let diff = state.board.apply(builds);
            for id in &diff.created {
                log::info!("New build {}", id);
            }
            for change in &diff.status_changed {
                log::info!("Build {} {} -> {}", change.id, change.from, change.to);
            }

            if let Some(id) = selected_id {
                if let Some(pos) = state.board.rows().iter().position(|r| r.id() == id) {
                    state.selected = pos;
                }
            }
            state.loaded = true;
            state.last_error = None;
        }

        DashboardAction::LoadError(error) => {
            state.last_error = Some(error.clone());
        }

        DashboardAction::NavigateNext => {
            if state.selected + 1 < state.board.len() {
                state.selected += 1;
            }
        }

        DashboardAction::NavigatePrevious => {
            state.selected = state.selected.saturating_sub(1);
        }

        DashboardAction::Select(pos) => {
            if *pos < state.board.len() {
                state.selected = *pos;
            }
        }

        DashboardAction::StartPolling | DashboardAction::OpenSelected => {}
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use ci_tail_client::BuildSummary;
    use ci_tail_core::BuildStatus;
    use pretty_assertions::assert_eq;

    fn build(id: &str, complete: bool) -> BuildSummary {
        BuildSummary {
            id: id.to_string(),
            owner: String::new(),
            repo: "widgets".to_string(),
            git_ref: "main".to_string(),
            sha: String::new(),
            complete,
            success: true,
            commits: vec![],
            github_url: String::new(),
        }
    }

    #[test]
    fn test_selection_follows_build_when_rows_are_prepended() {
        let state = reduce_dashboard(
            DashboardState::default(),
            &DashboardAction::BuildsLoaded(vec![build("1", true), build("2", false)]),
        );
        // Rows: 2, 1; select build 1
        let state = reduce_dashboard(state, &DashboardAction::NavigateNext);
        assert_eq!(state.selected_row().unwrap().id(), "1");

        let state = reduce_dashboard(
            state,
            &DashboardAction::BuildsLoaded(vec![build("1", true), build("2", true), build("3", false)]),
        );
        assert_eq!(state.selected, 2);
        assert_eq!(state.selected_row().unwrap().id(), "1");
        assert_eq!(state.board.get("2").unwrap().status, BuildStatus::Passed);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let state = reduce_dashboard(
            DashboardState::default(),
            &DashboardAction::BuildsLoaded(vec![build("1", true)]),
        );
        let state = reduce_dashboard(state, &DashboardAction::NavigateNext);
        assert_eq!(state.selected, 0);
        let state = reduce_dashboard(state, &DashboardAction::NavigatePrevious);
        assert_eq!(state.selected, 0);
        let state = reduce_dashboard(state, &DashboardAction::Select(5));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_error_is_kept_until_next_success() {
        let state = reduce_dashboard(
            DashboardState::default(),
            &DashboardAction::LoadError("HTTP 502".to_string()),
        );
        assert_eq!(state.last_error.as_deref(), Some("HTTP 502"));
        assert!(!state.loaded);

        let state = reduce_dashboard(state, &DashboardAction::BuildsLoaded(vec![]));
        assert_eq!(state.last_error, None);
        assert!(state.loaded);
    }
}
