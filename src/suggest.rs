//! Follow-up query suggestions from recent queries and indexed field tokens.

use crate::fields::FieldSpecs;
use crate::ranker::field_text;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Most-recent distinct queries kept for suggestion generation.
pub const HISTORY_LIMIT: usize = 10;
/// Queries shorter than this produce no suggestions and are not recorded.
pub const MIN_SUGGEST_QUERY: usize = 2;

/// Ordered list of recent committed queries, most recent first.
///
/// The engine records a query after every debounced commit; entries are
/// distinct (recording an existing query moves it to the front) and the list
/// never grows past [`HISTORY_LIMIT`]. The engine keeps it in memory only;
/// persisting across sessions is the caller's choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHistory {
  entries: Vec<String>,
}

impl QueryHistory {
  /// Create an empty history.
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a committed query. Queries shorter than [`MIN_SUGGEST_QUERY`]
  /// characters are ignored.
  pub fn record(&mut self, query: &str) {
    if query.chars().count() < MIN_SUGGEST_QUERY {
      return;
    }
    self.entries.retain(|entry| entry != query);
    self.entries.insert(0, query.to_string());
    self.entries.truncate(HISTORY_LIMIT);
  }

  /// The recorded queries, most recent first.
  pub fn entries(&self) -> &[String] {
    &self.entries
  }

  /// Number of recorded queries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether nothing has been recorded.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Extracts candidate follow-up queries for a live query.
///
/// Candidates come from the history first, then from whitespace-delimited
/// tokens of every configured field value, in item and field declaration
/// order. The pool is deduplicated with first-insertion order preserved and
/// capped at the configured maximum, so output is deterministic.
pub struct Suggester {
  max_suggestions: usize,
}

impl Suggester {
  /// Create a suggester that returns at most `max_suggestions` entries.
  pub fn new(max_suggestions: usize) -> Self {
    Self { max_suggestions }
  }

  /// Generate suggestions for `query`.
  pub fn suggest<T>(
    &self,
    query: &str,
    items: &[T],
    specs: &FieldSpecs,
    history: &QueryHistory,
  ) -> Vec<String>
  where
    T: serde::Serialize,
  {
    if self.max_suggestions == 0 || query.chars().count() < MIN_SUGGEST_QUERY {
      return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut suggestions = Vec::new();

    for entry in history.entries() {
      if suggestions.len() >= self.max_suggestions {
        return suggestions;
      }
      if entry.to_lowercase().contains(&needle) && seen.insert(entry.clone()) {
        suggestions.push(entry.clone());
      }
    }

    for item in items {
      let value = match serde_json::to_value(item) {
        Ok(value) => value,
        Err(_) => continue,
      };

      for (name, _) in specs.iter() {
        let text = match field_text(&value, name) {
          Some(text) => text,
          None => continue,
        };

        for token in text.split_whitespace() {
          if suggestions.len() >= self.max_suggestions {
            return suggestions;
          }
          if token.chars().count() > 2
            && token.to_lowercase().contains(&needle)
            && seen.insert(token.to_string())
          {
            suggestions.push(token.to_string());
          }
        }
      }
    }

    suggestions
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fields::FieldSpec;
  use serde::Serialize;

  #[derive(Serialize)]
  struct Doc {
    title: String,
  }

  fn title_specs() -> FieldSpecs {
    FieldSpecs::builder()
      .field("title", FieldSpec::substring())
      .build()
  }

  #[test]
  fn history_is_deduplicated_and_bounded() {
    let mut history = QueryHistory::new();
    for i in 0..12 {
      history.record(&format!("query {i}"));
    }
    history.record("query 3");

    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history.entries()[0], "query 3");
    assert_eq!(history.entries().iter().filter(|e| *e == "query 3").count(), 1);
  }

  #[test]
  fn short_queries_are_not_recorded() {
    let mut history = QueryHistory::new();
    history.record("a");
    history.record("");
    assert!(history.is_empty());
  }

  #[test]
  fn history_entries_come_before_field_tokens() {
    let mut history = QueryHistory::new();
    history.record("symbolic");

    let items = vec![Doc {
      title: "Symbol Alpha".into(),
    }];

    let suggester = Suggester::new(5);
    let suggestions = suggester.suggest("sym", &items, &title_specs(), &history);
    assert_eq!(suggestions, vec!["symbolic".to_string(), "Symbol".to_string()]);
  }

  #[test]
  fn tokens_are_deduplicated_and_capped() {
    let items = vec![
      Doc {
        title: "Symbol Alpha".into(),
      },
      Doc {
        title: "Symbol Beta symbols".into(),
      },
    ];

    let suggester = Suggester::new(2);
    let suggestions = suggester.suggest("sym", &items, &title_specs(), &QueryHistory::new());
    assert_eq!(suggestions, vec!["Symbol".to_string(), "symbols".to_string()]);
  }

  #[test]
  fn short_live_query_yields_nothing() {
    let items = vec![Doc {
      title: "Symbol".into(),
    }];
    let suggester = Suggester::new(5);
    assert!(suggester
      .suggest("s", &items, &title_specs(), &QueryHistory::new())
      .is_empty());
  }
}
