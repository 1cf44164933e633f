pub mod app_reducer;
pub mod dashboard_reducer;
pub mod log_view_reducer;
