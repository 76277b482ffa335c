//! Core business logic
//!
//! The pipeline itself: when to run ([`schedule`]), what one cycle does
//! ([`scheduler`]), and how the extract is reshaped ([`transform`]).

pub mod schedule;
pub mod scheduler;
pub mod transform;
