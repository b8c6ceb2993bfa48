//! Result type alias for jsonymize
//!
//! This module provides a convenient Result type alias that uses
//! JsonymizeError as the error type.

use super::errors::JsonymizeError;

/// Result type alias for jsonymize operations
///
/// This is a convenience type alias that uses `JsonymizeError` as the error
/// type. Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use jsonymize::domain::result::Result;
/// use jsonymize::domain::errors::JsonymizeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(JsonymizeError::Configuration("invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, JsonymizeError>;
