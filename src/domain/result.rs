//! Result type alias for the relay
//!
//! This module provides a convenient Result type alias that uses RelayError
//! as the error type.

use super::errors::RelayError;

/// Result type alias for relay operations
///
/// This is a convenience type alias that uses `RelayError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use course_relay::domain::result::Result;
/// use course_relay::domain::errors::RelayError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RelayError::Other("boom".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RelayError>;
