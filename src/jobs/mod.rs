//! Job postings published by agencies, and the REST API that manages them.

pub mod model;
pub mod routes;

pub use model::{JobPosting, NewJobPosting};
pub use routes::{JobRouteState, job_routes};
