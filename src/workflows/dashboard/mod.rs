//! Aggregate statistics for the dashboard and analytics screens. The
//! numbers are pure functions of a fetched snapshot; nothing here keeps
//! state of its own.

pub mod router;
pub mod service;
pub mod stats;
pub mod views;

pub use router::dashboard_router;
pub use service::{DashboardError, DashboardService};
pub use stats::{board_summary, dashboard_stats, internship_loads, BoardSummary, DashboardStats, InternshipLoad};
pub use views::{ActivityEntry, DashboardSnapshot};
