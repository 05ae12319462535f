//! Backend for the TalentDesk recruiting dashboard: internship postings,
//! candidate pipelines, competitions, and the aggregate statistics the
//! dashboard screens are built from.

pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod workflows;
