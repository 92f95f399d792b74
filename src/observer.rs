//! Observer hooks for commits and suggestion updates.

use crate::types::{Searchable, SearchHit};

/// A trait for observers that are notified as the engine's outputs change.
///
/// All methods have default no-op implementations, so an observer implements
/// only the notifications it cares about. Observers are registered on the
/// engine builder and invoked synchronously from the engine's own event
/// handlers.
///
/// # Examples
///
/// ```rust
/// use typeahead::prelude::*;
///
/// struct ResultLogger;
///
/// impl<T: Searchable> SearchObserver<T> for ResultLogger {
///   fn on_results(&self, hits: &[SearchHit<T>], committed_query: &str) {
///     println!("{} hits for {committed_query:?}", hits.len());
///   }
/// }
/// ```
pub trait SearchObserver<T: Searchable>: Send + Sync {
  /// Called once per commit with the ranked results, including the empty
  /// commit fired immediately when the query is cleared.
  fn on_results(&self, _hits: &[SearchHit<T>], _committed_query: &str) {}

  /// Called when the suggestion list for the live (non-debounced) query
  /// changes.
  fn on_suggestions(&self, _suggestions: &[String]) {}
}
