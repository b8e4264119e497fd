pub mod dashboard_model;
pub mod dashboard_view;

pub use dashboard_model::DashboardModel;
pub use dashboard_view::{CurrentCard, DashboardView, StripCard};
