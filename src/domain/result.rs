//! Result type alias for n2md

use super::errors::N2mdError;

/// Result type alias for n2md operations
///
/// # Examples
///
/// ```
/// use n2md::domain::result::Result;
/// use n2md::domain::errors::N2mdError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(N2mdError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, N2mdError>;
