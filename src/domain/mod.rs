//! Domain models and types for the relay.
//!
//! This module contains the core domain models, types, and business rules:
//!
//! - **Row types** ([`SourceRecord`], [`OutputRecord`]) with the validation
//!   and conversion rules of the HR import schema
//! - **Cycle outcomes** ([`CycleOutcome`], [`Stage`], [`EndpointResult`]) —
//!   the typed per-cycle result the scheduler acts on
//! - **Error types** ([`RelayError`] and the per-stage error enums)
//! - **Result type alias** ([`Result`])
//!
//! All entities are cycle-scoped value data; nothing here persists or is
//! shared across cycles.

pub mod errors;
pub mod outcome;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{EndpointError, FetchError, NotifyError, RelayError, TransformError};
pub use outcome::{CycleOutcome, EndpointResult, Stage};
pub use records::{
    OutputRecord, SourceRecord, COMPLETED_FLAG, COURSE_TYPE, FAIL_FLAG, OUTPUT_COLUMNS,
};
pub use result::Result;
