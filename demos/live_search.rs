//! Live search demo: simulated keystrokes against a math symbol directory.

use std::time::Instant;
use typeahead::prelude::*;

/// A directory entry for demonstration.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MathSymbol {
  pub name: String,
  pub meaning: String,
  pub tex: String,
}

impl MathSymbol {
  pub fn new(
    name: impl Into<String>,
    meaning: impl Into<String>,
    tex: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      meaning: meaning.into(),
      tex: tex.into(),
    }
  }
}

fn sample_symbols() -> Vec<MathSymbol> {
  vec![
    MathSymbol::new("Sigma", "Summation over an index", "\\sum"),
    MathSymbol::new("Pi", "Product over an index", "\\prod"),
    MathSymbol::new("Integral", "Signed area under a curve", "\\int"),
    MathSymbol::new("Partial", "Partial derivative", "\\partial"),
    MathSymbol::new("Infinity", "Unbounded limit", "\\infty"),
    MathSymbol::new("Subset", "Set containment", "\\subset"),
  ]
}

/// Render a field value with its match spans wrapped in brackets.
fn highlight(value: &str, spans: &[MatchSpan]) -> String {
  let chars: Vec<char> = value.chars().collect();
  let mut out = String::new();
  let mut pos = 0;

  for span in spans {
    out.extend(&chars[pos..span.start]);
    out.push('[');
    out.extend(&chars[span.start..span.end]);
    out.push(']');
    pos = span.end;
  }
  out.extend(&chars[pos..]);

  out
}

fn main() {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  let mut engine = TypeaheadEngine::builder()
    .items(sample_symbols())
    .fields(
      FieldSpecs::builder()
        .field("name", FieldSpec::substring().weight(2.0))
        .field("meaning", FieldSpec::fuzzy())
        .build(),
    )
    .max_suggestions(4)
    .build()
    .expect("valid configuration");

  // A burst of keystrokes: only the last one survives the debounce window.
  let mut armed = None;
  for keystroke in ["s", "su", "sub"] {
    if let QueryEvent::Scheduled { token, .. } = engine.on_query_changed(keystroke, Instant::now())
    {
      armed = Some(token);
    }
  }

  let commit = engine
    .fire(armed.expect("non-empty queries arm the debouncer"))
    .expect("the latest token commits");

  println!("results for {:?}:", commit.query);
  for hit in &commit.hits {
    println!("  {:>5.2}  {}", hit.score, hit.item.name);
    for field_match in &hit.matches {
      println!(
        "         {}: {}",
        field_match.field,
        highlight(&field_match.value, &field_match.spans)
      );
    }
  }
  println!("suggestions: {:?}", engine.suggestions());
}
