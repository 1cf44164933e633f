//! Application State Module

mod app;
mod dashboard;
mod log_view;

pub use app::{AppState, Screen};
pub use dashboard::DashboardState;
pub use log_view::LogViewState;
