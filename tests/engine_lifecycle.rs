use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use typeahead::prelude::*;

#[derive(Debug, Clone, Serialize, PartialEq)]
struct Entry {
  name: String,
}

fn entries() -> Vec<Entry> {
  ["Symbol Alpha", "Symbol Beta", "Other"]
    .into_iter()
    .map(|name| Entry { name: name.into() })
    .collect()
}

#[derive(Default)]
struct RecordingObserver {
  commits: Arc<Mutex<Vec<(String, usize)>>>,
  suggestions: Arc<Mutex<Vec<Vec<String>>>>,
}

impl SearchObserver<Entry> for RecordingObserver {
  fn on_results(&self, hits: &[SearchHit<Entry>], committed_query: &str) {
    self
      .commits
      .lock()
      .unwrap()
      .push((committed_query.to_string(), hits.len()));
  }

  fn on_suggestions(&self, suggestions: &[String]) {
    self.suggestions.lock().unwrap().push(suggestions.to_vec());
  }
}

fn engine_with_observer() -> (
  TypeaheadEngine<Entry>,
  Arc<Mutex<Vec<(String, usize)>>>,
  Arc<Mutex<Vec<Vec<String>>>>,
) {
  let observer = RecordingObserver::default();
  let commits = Arc::clone(&observer.commits);
  let suggestions = Arc::clone(&observer.suggestions);

  let engine = TypeaheadEngine::builder()
    .items(entries())
    .fields(
      FieldSpecs::builder()
        .field("name", FieldSpec::substring())
        .build(),
    )
    .debounce_window(Duration::from_millis(100))
    .with_observer(Box::new(observer))
    .build()
    .unwrap();

  (engine, commits, suggestions)
}

fn scheduled(event: QueryEvent<Entry>) -> (TimerToken, Instant) {
  match event {
    QueryEvent::Scheduled { token, deadline } => (token, deadline),
    QueryEvent::Committed(commit) => panic!("expected a scheduled window, got commit {:?}", commit),
  }
}

#[test]
fn debounce_coalesces_a_burst_into_one_commit() {
  let (mut engine, commits, _) = engine_with_observer();
  let now = Instant::now();

  let (first, _) = scheduled(engine.on_query_changed("a", now));
  let (second, _) = scheduled(engine.on_query_changed("ab", now));
  let (third, _) = scheduled(engine.on_query_changed("abc", now));

  assert_eq!(engine.phase(), EnginePhase::Pending);
  assert!(engine.fire(first).is_none());
  assert!(engine.fire(second).is_none());

  let commit = engine.fire(third).expect("latest token commits");
  assert_eq!(commit.query, "abc");
  assert_eq!(engine.phase(), EnginePhase::Committed);

  let commits = commits.lock().unwrap();
  assert_eq!(commits.as_slice(), &[("abc".to_string(), 0)]);
}

#[test]
fn clearing_the_query_commits_immediately() {
  let (mut engine, commits, _) = engine_with_observer();
  let now = Instant::now();

  let (token, _) = scheduled(engine.on_query_changed("symbol", now));

  let event = engine.on_query_changed("", now);
  match event {
    QueryEvent::Committed(commit) => {
      assert_eq!(commit.query, "");
      assert!(commit.hits.is_empty());
    }
    QueryEvent::Scheduled { .. } => panic!("clear must bypass the debounce window"),
  }

  assert_eq!(engine.phase(), EnginePhase::Idle);
  // The pending window for "symbol" was cancelled along the way.
  assert!(engine.fire(token).is_none());

  let commits = commits.lock().unwrap();
  assert_eq!(commits.as_slice(), &[(String::new(), 0)]);
}

#[test]
fn commit_ranks_and_notifies() {
  let (mut engine, commits, _) = engine_with_observer();
  let (token, _) = scheduled(engine.on_query_changed("symbol", Instant::now()));

  let commit = engine.fire(token).unwrap();
  assert_eq!(commit.hits.len(), 2);
  assert_eq!(commit.hits[0].item.name, "Symbol Alpha");
  assert_eq!(commit.hits[1].item.name, "Symbol Beta");

  let commits = commits.lock().unwrap();
  assert_eq!(commits.as_slice(), &[("symbol".to_string(), 2)]);
}

#[test]
fn superseded_tokens_never_fire() {
  let (mut engine, _, _) = engine_with_observer();
  let now = Instant::now();

  let (stale, _) = scheduled(engine.on_query_changed("sym", now));
  let (current, _) = scheduled(engine.on_query_changed("symbol", now));

  assert!(engine.fire(stale).is_none());
  assert_eq!(engine.phase(), EnginePhase::Pending);

  let commit = engine.fire(current).unwrap();
  assert_eq!(commit.query, "symbol");
}

#[test]
fn deadline_reflects_the_configured_window() {
  let (mut engine, _, _) = engine_with_observer();
  let now = Instant::now();

  let (_, deadline) = scheduled(engine.on_query_changed("sym", now));
  assert_eq!(deadline, now + Duration::from_millis(100));
  assert_eq!(engine.pending_deadline(), Some(deadline));
}

#[test]
fn cancel_pending_returns_to_idle() {
  let (mut engine, commits, _) = engine_with_observer();
  let (token, _) = scheduled(engine.on_query_changed("symbol", Instant::now()));

  engine.cancel_pending();
  assert_eq!(engine.phase(), EnginePhase::Idle);
  assert_eq!(engine.pending_deadline(), None);
  assert!(engine.fire(token).is_none());
  assert!(commits.lock().unwrap().is_empty());
}

#[test]
fn committed_queries_enter_history_and_suggestions() {
  let (mut engine, _, suggestion_log) = engine_with_observer();

  let (token, _) = scheduled(engine.on_query_changed("symbol", Instant::now()));
  engine.fire(token).unwrap();

  assert_eq!(engine.history().entries(), ["symbol".to_string()]);
  // History entry first, then the field token.
  assert_eq!(
    engine.suggestions(),
    ["symbol".to_string(), "Symbol".to_string()]
  );

  let log = suggestion_log.lock().unwrap();
  assert_eq!(
    log.as_slice(),
    &[
      vec!["Symbol".to_string()],
      vec!["symbol".to_string(), "Symbol".to_string()],
    ]
  );
}

#[test]
fn single_character_commits_stay_out_of_history() {
  let (mut engine, _, _) = engine_with_observer();

  let (token, _) = scheduled(engine.on_query_changed("s", Instant::now()));
  let commit = engine.fire(token).unwrap();

  assert_eq!(commit.query, "s");
  assert!(engine.history().is_empty());
}

#[test]
fn non_positive_weights_are_rejected_at_build_time() {
  let result = TypeaheadEngine::<Entry>::builder()
    .items(entries())
    .fields(
      FieldSpecs::builder()
        .field("name", FieldSpec::substring().weight(0.0))
        .build(),
    )
    .build();

  match result {
    Err(ConfigError::InvalidWeight { field, weight }) => {
      assert_eq!(field, "name");
      assert_eq!(weight, 0.0);
    }
    Ok(_) => panic!("zero weight must not build"),
  }
}
