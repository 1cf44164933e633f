//! Actions module
//!
//! Actions are tagged by the screen they target:
//! - `Global`: raw input and application-wide actions
//! - `Dashboard`: the build list
//! - `LogView`: the log viewer and its tail fetcher

pub mod dashboard;
pub mod global;
pub mod log_view;

pub use dashboard::DashboardAction;
pub use global::GlobalAction;
pub use log_view::LogViewAction;

/// Root action enum - tagged by screen
#[derive(Debug, Clone)]
pub enum Action {
    /// Global application actions
    Global(GlobalAction),
    /// Build list actions
    Dashboard(DashboardAction),
    /// Log viewer actions
    LogView(LogViewAction),
}
