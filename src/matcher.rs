//! Scores a single field value against a query, substring or fuzzy.

use crate::types::MatchSpan;

/// Score for a case-insensitive whole-value match.
pub const SCORE_EQUAL: f32 = 1.0;
/// Score for a case-insensitive prefix match.
pub const SCORE_PREFIX: f32 = 0.8;
/// Score for a case-insensitive substring match elsewhere in the value.
pub const SCORE_CONTAINS: f32 = 0.5;
/// Factor applied to the query/value length ratio for subsequence matches.
pub const SUBSEQUENCE_FACTOR: f32 = 0.7;

/// A positive match: its score in `(0, 1]` and the highlight spans.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
  /// Raw (unweighted) relevance of this field for the query.
  pub score: f32,
  /// Character ranges of the matched portions of the field value,
  /// increasing and non-overlapping.
  pub spans: Vec<MatchSpan>,
}

/// Match `value` against `query`, returning `None` when the field does not
/// match at all.
///
/// In substring mode the score ladder is: whole-value equality
/// ([`SCORE_EQUAL`]), prefix ([`SCORE_PREFIX`]), containment anywhere
/// ([`SCORE_CONTAINS`]). Fuzzy mode first applies the containment check at
/// [`SCORE_EQUAL`] (a contiguous substring is never scored below what plain
/// substring matching would give it), then falls back to an in-order
/// subsequence scan scored `SUBSEQUENCE_FACTOR × |query| / |value|`.
///
/// An empty query never matches in either mode.
pub fn match_field(value: &str, query: &str, fuzzy: bool) -> Option<MatchScore> {
  let haystack = fold_chars(value);
  let needle = fold_chars(query);

  if needle.is_empty() || haystack.is_empty() {
    return None;
  }

  if fuzzy {
    fuzzy_match(&haystack, &needle)
  } else {
    substring_match(&haystack, &needle)
  }
}

fn substring_match(haystack: &[char], needle: &[char]) -> Option<MatchScore> {
  if haystack == needle {
    return Some(MatchScore {
      score: SCORE_EQUAL,
      spans: vec![MatchSpan::new(0, haystack.len())],
    });
  }

  if haystack.starts_with(needle) {
    return Some(MatchScore {
      score: SCORE_PREFIX,
      spans: vec![MatchSpan::new(0, needle.len())],
    });
  }

  let pos = find_subslice(haystack, needle)?;
  Some(MatchScore {
    score: SCORE_CONTAINS,
    spans: vec![MatchSpan::new(pos, pos + needle.len())],
  })
}

fn fuzzy_match(haystack: &[char], needle: &[char]) -> Option<MatchScore> {
  // Contiguous containment dominates the subsequence formula.
  if let Some(pos) = find_subslice(haystack, needle) {
    return Some(MatchScore {
      score: SCORE_EQUAL,
      spans: vec![MatchSpan::new(pos, pos + needle.len())],
    });
  }

  let indices = subsequence_indices(haystack, needle)?;
  let score = SUBSEQUENCE_FACTOR * (needle.len() as f32 / haystack.len() as f32);

  Some(MatchScore {
    score,
    spans: contiguous_runs(&indices),
  })
}

/// Case-fold to one lowercase char per input char, so span indices always
/// line up with the original string.
fn fold_chars(text: &str) -> Vec<char> {
  text
    .chars()
    .map(|c| c.to_lowercase().next().unwrap_or(c))
    .collect()
}

/// Position of the first occurrence of `needle` within `haystack`.
fn find_subslice(haystack: &[char], needle: &[char]) -> Option<usize> {
  if needle.len() > haystack.len() {
    return None;
  }
  haystack
    .windows(needle.len())
    .position(|window| window == needle)
}

/// Scan `haystack` left to right consuming `needle` characters in order.
/// Returns the matched indices only if every needle character was found.
fn subsequence_indices(haystack: &[char], needle: &[char]) -> Option<Vec<usize>> {
  let mut indices = Vec::with_capacity(needle.len());
  let mut next = 0;

  for (i, &c) in haystack.iter().enumerate() {
    if next < needle.len() && c == needle[next] {
      indices.push(i);
      next += 1;
    }
  }

  (next == needle.len()).then_some(indices)
}

/// Compress ascending indices into maximal runs of consecutive characters.
fn contiguous_runs(indices: &[usize]) -> Vec<MatchSpan> {
  let mut spans = Vec::new();
  let mut iter = indices.iter().copied();

  let Some(first) = iter.next() else {
    return spans;
  };
  let mut start = first;
  let mut end = first + 1;

  for i in iter {
    if i == end {
      end += 1;
    } else {
      spans.push(MatchSpan::new(start, end));
      start = i;
      end = i + 1;
    }
  }
  spans.push(MatchSpan::new(start, end));

  spans
}
