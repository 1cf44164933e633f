//! Log View Reducer
//!
//! Feeds fetcher results and user input into the log's [`LogView`].
//!
//! [`LogView`]: ci_tail_core::LogView

use crate::actions::LogViewAction;
use crate::state::LogViewState;
use ci_tail_core::LineFragment;

/// Reduce log view state based on LogViewAction
pub fn reduce_log_view(mut state: LogViewState, action: &LogViewAction) -> LogViewState {
    match action {
        LogViewAction::ChunkReceived { output, cursor, .. } => {
            let report = state.view.on_chunk(output);
            state.cursor = *cursor;
            state.polls += 1;
            state.consecutive_failures = 0;
            log::trace!(
                "Appended lines {:?}, {} new marks, {:?}",
                report.appended,
                report.new_marks,
                report.scroll
            );
        }

        LogViewAction::NothingNew { .. } => {
            state.polls += 1;
            state.consecutive_failures = 0;
        }

        LogViewAction::FetchFailed {
            message,
            consecutive_failures,
            ..
        } => {
            state.polls += 1;
            state.failures += 1;
            state.consecutive_failures = *consecutive_failures;
            state.last_error = Some(message.clone());
        }

        LogViewAction::ScrollBy(delta) => {
            state.view.on_scroll_by(*delta);
        }

        LogViewAction::ScrollPages(pages) => {
            let height = state.view.viewport().height().max(1) as isize;
            state.view.on_scroll_by(pages * height);
        }

        LogViewAction::ScrollToTop => {
            state.view.on_scroll(0);
        }

        LogViewAction::ScrollToBottom => {
            state.view.on_scroll_to_bottom();
        }

        LogViewAction::SetViewportHeight(height) => {
            if state.view.viewport().height() != *height {
                state.view.on_resize(*height);
            }
        }

        LogViewAction::LineClicked(line) => {
            state.view.on_line_clicked(*line);
        }

        LogViewAction::MarkClicked(line) => {
            if let Some(mark) = state.view.minimap().mark_for_line(*line) {
                state.view.on_mark_clicked(&mark);
            }
        }

        LogViewAction::NextMark => {
            if let Some(mark) = state.view.next_mark_after(None) {
                state.view.on_mark_clicked(&mark);
            }
        }

        LogViewAction::PrevMark => {
            if let Some(mark) = state.view.prev_mark_before(None) {
                state.view.on_mark_clicked(&mark);
            }
        }

        LogViewAction::FragmentChanged(fragment) => {
            state.view.on_fragment_changed(*fragment);
        }

        LogViewAction::GotoStart => {
            state.goto_input = Some(String::new());
        }

        LogViewAction::GotoChar(c) => {
            if let Some(input) = state.goto_input.as_mut() {
                if c.is_ascii_digit() {
                    input.push(*c);
                }
            }
        }

        LogViewAction::GotoBackspace => {
            if let Some(input) = state.goto_input.as_mut() {
                input.pop();
            }
        }

        LogViewAction::GotoConfirm => {
            if let Some(input) = state.goto_input.take() {
                // Same as editing the fragment by hand; empty clears it
                let fragment = if input.is_empty() {
                    None
                } else {
                    LineFragment::parse(format!("line{}", input))
                };
                state.view.on_fragment_changed(fragment);
            }
        }

        LogViewAction::GotoCancel => {
            state.goto_input = None;
        }

        // Handled by the tail middleware and the root reducer
        LogViewAction::Open { .. } | LogViewAction::Opened { .. } => {}
    }

    state
}
