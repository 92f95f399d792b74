//! Ranks items by weighted per-field relevance.

use crate::fields::FieldSpecs;
use crate::matcher::match_field;
use crate::types::{FieldMatch, Searchable, SearchHit};
use serde_json::Value;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores and orders items against a query using the configured field specs.
///
/// Ranking is a pure function of its inputs: running it twice over the same
/// items and query yields identical output, including span ordering. The
/// sort is stable, so items with equal totals keep their input order.
pub struct Ranker {
  specs: FieldSpecs,
  min_query_length: usize,
  max_results: Option<usize>,
}

impl Ranker {
  /// Create a ranker over the given field specs.
  pub fn new(specs: FieldSpecs, min_query_length: usize, max_results: Option<usize>) -> Self {
    Self {
      specs,
      min_query_length,
      max_results,
    }
  }

  /// The configured field specs.
  pub fn specs(&self) -> &FieldSpecs {
    &self.specs
  }

  /// Rank `items` against `query`.
  ///
  /// Queries shorter than the configured minimum return no results. Items
  /// whose fields accumulate no score are excluded entirely.
  pub fn rank<T>(&self, items: &[T], query: &str) -> Vec<SearchHit<T>>
  where
    T: Searchable + serde::Serialize + Clone,
  {
    if query.chars().count() < self.min_query_length {
      return Vec::new();
    }

    #[cfg(feature = "parallel")]
    let mut hits: Vec<SearchHit<T>> = items
      .par_iter()
      .enumerate()
      .filter_map(|(index, item)| self.score_item(item, index, query))
      .collect();

    #[cfg(not(feature = "parallel"))]
    let mut hits: Vec<SearchHit<T>> = items
      .iter()
      .enumerate()
      .filter_map(|(index, item)| self.score_item(item, index, query))
      .collect();

    self.sort_hits(&mut hits);

    if let Some(cap) = self.max_results {
      hits.truncate(cap);
    }

    trace!(query, hits = hits.len(), "ranked items");
    hits
  }

  /// Score a single item: accumulate `score × weight` over every matching
  /// field, recording a match entry per field in declaration order.
  fn score_item<T>(&self, item: &T, index: usize, query: &str) -> Option<SearchHit<T>>
  where
    T: Searchable + serde::Serialize + Clone,
  {
    // Serialize once per item; every configured field reads from this value.
    let value = serde_json::to_value(item).ok()?;

    let mut total = 0.0_f32;
    let mut matches = Vec::new();

    for (name, spec) in self.specs.iter() {
      let text = match field_text(&value, name) {
        Some(text) if !text.is_empty() => text,
        _ => continue,
      };

      if let Some(m) = match_field(&text, query, spec.fuzzy) {
        let weighted = m.score * spec.weight;
        total += weighted;
        matches.push(FieldMatch {
          field: name.to_string(),
          value: text,
          spans: m.spans,
          score: weighted,
        });
      }
    }

    if total > 0.0 {
      Some(SearchHit::new(item.clone(), total, index).with_matches(matches))
    } else {
      None
    }
  }

  /// Sort hits by score in descending order, stable on ties.
  #[cfg(feature = "parallel")]
  fn sort_hits<T: Send>(&self, hits: &mut Vec<SearchHit<T>>) {
    hits.par_sort_by(|a, b| {
      b.score
        .partial_cmp(&a.score)
        .unwrap_or(std::cmp::Ordering::Equal)
    });
  }

  /// Sort hits by score in descending order, stable on ties.
  #[cfg(not(feature = "parallel"))]
  fn sort_hits<T>(&self, hits: &mut Vec<SearchHit<T>>) {
    hits.sort_by(|a, b| {
      b.score
        .partial_cmp(&a.score)
        .unwrap_or(std::cmp::Ordering::Equal)
    });
  }
}

/// Read a field's string value from the serialized item.
///
/// Dotted keys traverse nested objects. Absent, null, and non-string values
/// read as `None`; the ranker and suggester treat that as an empty string
/// rather than an error.
pub(crate) fn field_text(value: &Value, path: &str) -> Option<String> {
  let mut current = value;

  for part in path.split('.') {
    current = current.get(part)?;
  }

  match current {
    Value::String(s) => Some(s.clone()),
    _ => None,
  }
}
