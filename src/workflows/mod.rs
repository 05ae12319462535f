//! Workflow modules backing the dashboard screens. Each module owns its
//! collection schema, a typed repository over the document store, a service
//! facade, and an HTTP router.

pub mod applications;
pub mod candidates;
pub mod communication;
pub mod competitions;
pub mod dashboard;
pub mod internships;
