//! Loader trait for loading data to destinations

use eyre::Result;

/// Loader trait for loading data to a destination
///
/// Loaders borrow their items so the same batch can be handed to the next
/// stage afterwards (projects are provisioned, then migrated).
///
/// # Example
/// ```no_run
/// use harness_app_migrator::etl::Loader;
/// use eyre::Result;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     type Item = String;
///
///     async fn load(&self, items: &[Self::Item]) -> Result<usize> {
///         Ok(items.len())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Sync;

    /// Load items to the destination
    ///
    /// Returns the number of items successfully loaded
    ///
    /// # Errors
    /// Returns an error if loading fails (network, I/O, validation, etc.)
    fn load(
        &self,
        items: &[Self::Item],
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}
