//! Core data types for the Typeahead search engine.

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
pub trait Searchable: Send + Sync {}
#[cfg(feature = "parallel")]
impl<T: Send + Sync> Searchable for T {}

#[cfg(not(feature = "parallel"))]
pub trait Searchable {}
#[cfg(not(feature = "parallel"))]
impl<T> Searchable for T {}

/// A half-open `[start, end)` character range within a field value.
///
/// Spans index *characters* (not bytes) of the original field value, so a UI
/// layer can slice the string into highlighted and plain segments without any
/// further bookkeeping. Within one [`FieldMatch`] the spans are listed in
/// increasing order and never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
  /// Index of the first matched character.
  pub start: usize,
  /// Index one past the last matched character.
  pub end: usize,
}

impl MatchSpan {
  /// Creates a span covering `[start, end)`.
  pub fn new(start: usize, end: usize) -> Self {
    Self { start, end }
  }

  /// Number of characters covered by the span.
  pub fn len(&self) -> usize {
    self.end.saturating_sub(self.start)
  }

  /// Whether the span covers no characters.
  pub fn is_empty(&self) -> bool {
    self.end <= self.start
  }
}

/// One field's contribution to a hit: where the query matched and how much
/// the field added to the item's total score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
  /// The field key, as declared in the [`FieldSpecs`](crate::fields::FieldSpecs).
  pub field: String,
  /// The field's string value at match time, for rendering.
  pub value: String,
  /// Highlight ranges within `value`.
  pub spans: Vec<MatchSpan>,
  /// The weighted score this field contributed to the item total.
  pub score: f32,
}

/// A single ranked search result.
///
/// Hits are produced by the [`Ranker`](crate::ranker::Ranker) in descending
/// score order; items with identical totals keep their original relative
/// order, and `id` carries the item's index in the input collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit<T> {
  /// The item's index in the collection supplied at configuration time.
  pub id: usize,
  /// The matched item.
  pub item: T,
  /// Total weighted relevance, strictly greater than zero.
  pub score: f32,
  /// Per-field match detail, in field declaration order.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub matches: Vec<FieldMatch>,
}

impl<T: Searchable> SearchHit<T> {
  /// Creates a hit with no field detail attached yet.
  pub fn new(item: T, score: f32, id: usize) -> Self {
    Self {
      id,
      item,
      score,
      matches: Vec::new(),
    }
  }

  /// Attaches the per-field match detail.
  pub fn with_matches(mut self, matches: Vec<FieldMatch>) -> Self {
    self.matches = matches;
    self
  }
}
