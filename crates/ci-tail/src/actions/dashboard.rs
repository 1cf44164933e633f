//! Build list actions

use ci_tail_client::BuildSummary;

#[derive(Debug, Clone)]
pub enum DashboardAction {
    /// Start polling the build list
    StartPolling,
    /// One poll returned
    BuildsLoaded(Vec<BuildSummary>),
    /// One poll failed
    LoadError(String),
    NavigateNext,
    NavigatePrevious,
    /// Select a row by position (mouse)
    Select(usize),
    /// Open the log of the selected build
    OpenSelected,
}
