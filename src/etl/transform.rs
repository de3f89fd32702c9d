//! Transformer trait for data transformation

use eyre::Result;

/// Transformer trait for transforming data items
///
/// # Example
/// ```no_run
/// use harness_app_migrator::etl::Transformer;
/// use eyre::Result;
///
/// struct Upper;
///
/// impl Transformer for Upper {
///     type Input = String;
///     type Output = String;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input.to_uppercase())
///     }
/// }
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if transformation fails (validation, conversion, etc.)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;
}

