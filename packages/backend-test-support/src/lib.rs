//! Backend test support utilities
//!
//! Logging initialization, error envelope assertions and unique data helpers
//! shared by the catalog API's unit and integration tests.

pub mod error_envelope;
pub mod logging;
pub mod unique_helpers;
