//! The engine that ties matching, ranking, debouncing, and suggestions
//! together behind one query-update entry point.

use crate::debounce::{Debouncer, TimerToken};
use crate::error::ConfigError;
use crate::fields::FieldSpecs;
use crate::observer::SearchObserver;
use crate::ranker::Ranker;
use crate::suggest::{QueryHistory, Suggester};
use crate::types::{Searchable, SearchHit};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Default quiescence window between the last keystroke and the commit.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
/// Default minimum query length for ranking.
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 1;
/// Default cap on generated suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Lifecycle phase of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
  /// No query is active.
  Idle,
  /// A debounce window is armed and waiting to elapse.
  Pending,
  /// Results for the last debounced query have been delivered.
  Committed,
}

/// A finalized search: the committed query and its ranked results.
#[derive(Debug, Clone)]
pub struct Commit<T> {
  /// The query the results were ranked against.
  pub query: String,
  /// Ranked results, best first.
  pub hits: Vec<SearchHit<T>>,
}

/// Outcome of a query update.
#[derive(Debug)]
pub enum QueryEvent<T> {
  /// The query was cleared; an empty commit fired immediately, bypassing
  /// the debounce window.
  Committed(Commit<T>),
  /// A debounce window was armed; call [`TypeaheadEngine::fire`] with the
  /// token once `deadline` passes.
  Scheduled {
    /// Token identifying this window; superseded by any later update.
    token: TimerToken,
    /// When the host should fire the token.
    deadline: Instant,
  },
}

/// The incremental search engine.
///
/// The engine owns its items, field specs, debouncer, query history, and
/// live suggestion list; all of them are mutated only by its own event
/// handlers, so it needs no locking. Everything runs synchronously inside
/// the caller's event loop: the host feeds every input change to
/// [`on_query_changed`](Self::on_query_changed), schedules a callback for
/// the returned deadline, and completes the round trip through
/// [`fire`](Self::fire).
///
/// Dropping the engine cancels any pending window: outstanding
/// [`TimerToken`]s cannot fire because firing requires exclusive access to
/// the engine.
///
/// # Examples
///
/// ```rust
/// use typeahead::prelude::*;
///
/// #[derive(Debug, Clone, serde::Serialize)]
/// struct Symbol {
///   name: String,
///   description: String,
/// }
///
/// let symbols = vec![
///   Symbol {
///     name: "Sigma".into(),
///     description: "Summation sign".into(),
///   },
///   Symbol {
///     name: "Pi".into(),
///     description: "Product sign".into(),
///   },
/// ];
///
/// let engine = TypeaheadEngine::builder()
///   .items(symbols)
///   .fields(
///     FieldSpecs::builder()
///       .field("name", FieldSpec::substring().weight(2.0))
///       .field("description", FieldSpec::fuzzy())
///       .build(),
///   )
///   .build()
///   .unwrap();
///
/// let hits = engine.rank_now("sig");
/// assert_eq!(hits[0].item.name, "Sigma");
/// ```
pub struct TypeaheadEngine<T: Searchable> {
  items: Vec<T>,
  ranker: Ranker,
  debouncer: Debouncer,
  suggester: Suggester,
  history: QueryHistory,
  suggestions: Vec<String>,
  live_query: String,
  phase: EnginePhase,
  observers: Vec<Box<dyn SearchObserver<T>>>,
}

impl<T> TypeaheadEngine<T>
where
  T: Searchable + serde::Serialize + Clone,
{
  /// Creates a new `TypeaheadEngineBuilder` to construct an engine.
  pub fn builder() -> TypeaheadEngineBuilder<T> {
    TypeaheadEngineBuilder::new()
  }

  /// Handle a query update from the input control.
  ///
  /// An empty query cancels any pending window and commits an empty result
  /// set immediately. Any other value re-arms the debounce window; the
  /// caller schedules a callback for the returned deadline and fires the
  /// token then. Only the latest token wins: updates arriving before the
  /// window elapses supersede the pending value.
  pub fn on_query_changed(&mut self, query: &str, now: Instant) -> QueryEvent<T> {
    self.live_query = query.to_string();
    self.refresh_suggestions();

    if query.is_empty() {
      // Clearing bypasses the debounce window.
      self.debouncer.cancel();
      self.phase = EnginePhase::Idle;
      debug!("query cleared, committing empty result set");
      let commit = Commit {
        query: String::new(),
        hits: Vec::new(),
      };
      self.notify_results(&commit);
      return QueryEvent::Committed(commit);
    }

    let (token, deadline) = self.debouncer.schedule(query, now);
    self.phase = EnginePhase::Pending;
    trace!(query, "debounce window armed");
    QueryEvent::Scheduled { token, deadline }
  }

  /// Fire a debounce token once its deadline has passed.
  ///
  /// Returns `None` for tokens superseded by a later update, cancelled, or
  /// already fired; exactly one commit results from any burst of updates.
  pub fn fire(&mut self, token: TimerToken) -> Option<Commit<T>> {
    let query = self.debouncer.fire(token)?;
    Some(self.commit(query))
  }

  /// Rank synchronously against the configured items, bypassing the
  /// debouncer entirely. History and observers are not touched.
  pub fn rank_now(&self, query: &str) -> Vec<SearchHit<T>> {
    self.ranker.rank(&self.items, query)
  }

  /// Cancel a pending window without committing, as when the search view
  /// unmounts but the engine is kept around.
  pub fn cancel_pending(&mut self) {
    self.debouncer.cancel();
    self.phase = EnginePhase::Idle;
  }

  /// Current lifecycle phase.
  pub fn phase(&self) -> EnginePhase {
    self.phase
  }

  /// Suggestions for the current live query.
  pub fn suggestions(&self) -> &[String] {
    &self.suggestions
  }

  /// Recorded query history, most recent first.
  pub fn history(&self) -> &QueryHistory {
    &self.history
  }

  /// The configured items.
  pub fn items(&self) -> &[T] {
    &self.items
  }

  /// Deadline of the pending debounce window, if one is armed.
  pub fn pending_deadline(&self) -> Option<Instant> {
    self.debouncer.deadline()
  }

  fn commit(&mut self, query: String) -> Commit<T> {
    let hits = self.ranker.rank(&self.items, &query);
    debug!(query = %query, hits = hits.len(), "committed debounced query");

    self.history.record(&query);
    self.phase = EnginePhase::Committed;
    // The history just changed, which can surface the committed query
    // itself as a suggestion.
    self.refresh_suggestions();

    let commit = Commit { query, hits };
    self.notify_results(&commit);
    commit
  }

  fn refresh_suggestions(&mut self) {
    let next = self.suggester.suggest(
      &self.live_query,
      &self.items,
      self.ranker.specs(),
      &self.history,
    );
    if next != self.suggestions {
      self.suggestions = next;
      for observer in &self.observers {
        observer.on_suggestions(&self.suggestions);
      }
    }
  }

  fn notify_results(&self, commit: &Commit<T>) {
    for observer in &self.observers {
      observer.on_results(&commit.hits, &commit.query);
    }
  }
}

/// A builder for creating `TypeaheadEngine` instances.
///
/// Items and field specs are supplied once and treated as read-only for the
/// engine's lifetime. `build` validates the configuration and refuses to
/// construct an engine that would silently mis-rank.
pub struct TypeaheadEngineBuilder<T: Searchable> {
  items: Vec<T>,
  specs: FieldSpecs,
  debounce_window: Duration,
  min_query_length: usize,
  max_suggestions: usize,
  max_results: Option<usize>,
  observers: Vec<Box<dyn SearchObserver<T>>>,
}

impl<T: Searchable> TypeaheadEngineBuilder<T> {
  /// Creates a new builder with default configuration.
  pub fn new() -> Self {
    Self {
      items: Vec::new(),
      specs: FieldSpecs::default(),
      debounce_window: DEFAULT_DEBOUNCE,
      min_query_length: DEFAULT_MIN_QUERY_LENGTH,
      max_suggestions: DEFAULT_MAX_SUGGESTIONS,
      max_results: None,
      observers: Vec::new(),
    }
  }

  /// Set the items to search.
  pub fn items(mut self, items: Vec<T>) -> Self {
    self.items = items;
    self
  }

  /// Set the field specs.
  pub fn fields(mut self, specs: FieldSpecs) -> Self {
    self.specs = specs;
    self
  }

  /// Set the debounce quiescence window.
  pub fn debounce_window(mut self, window: Duration) -> Self {
    self.debounce_window = window;
    self
  }

  /// Set the minimum query length for ranking.
  pub fn min_query_length(mut self, length: usize) -> Self {
    self.min_query_length = length;
    self
  }

  /// Set the maximum number of suggestions.
  pub fn max_suggestions(mut self, count: usize) -> Self {
    self.max_suggestions = count;
    self
  }

  /// Cap the number of results per commit. Unlimited by default.
  pub fn max_results(mut self, count: usize) -> Self {
    self.max_results = Some(count);
    self
  }

  /// Register an observer for commits and suggestion updates.
  pub fn with_observer(mut self, observer: Box<dyn SearchObserver<T>>) -> Self {
    self.observers.push(observer);
    self
  }

  /// Validate the configuration and build the engine.
  pub fn build(self) -> Result<TypeaheadEngine<T>, ConfigError> {
    self.specs.validate()?;

    Ok(TypeaheadEngine {
      items: self.items,
      ranker: Ranker::new(self.specs, self.min_query_length, self.max_results),
      debouncer: Debouncer::new(self.debounce_window),
      suggester: Suggester::new(self.max_suggestions),
      history: QueryHistory::new(),
      suggestions: Vec::new(),
      live_query: String::new(),
      phase: EnginePhase::Idle,
      observers: self.observers,
    })
  }
}

impl<T: Searchable> Default for TypeaheadEngineBuilder<T> {
  fn default() -> Self {
    Self::new()
  }
}
