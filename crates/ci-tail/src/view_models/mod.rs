pub mod dashboard_view_model;
pub mod log_view_model;

pub use dashboard_view_model::DashboardViewModel;
pub use log_view_model::{LogStatusViewModel, LogViewModel, MinimapCellViewModel};
