//! Shared helpers for the backend's unit and integration tests: log capture,
//! problem-details assertions and unique fixture names.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
