//! Typeahead - an incremental fuzzy search engine for interactive UIs.
//!
//! Typeahead scores a read-only collection of items against a live query,
//! ranks them by weighted field relevance, coalesces keystroke-rate query
//! updates through a trailing-edge debouncer, and generates follow-up query
//! suggestions from recent queries and indexed field tokens.

pub mod types;
pub mod fields;
pub mod error;
pub mod matcher;
pub mod ranker;
pub mod debounce;
pub mod suggest;
pub mod observer;
pub mod engine;

pub mod prelude {
  //! Convenient re-exports for common types and traits.

  pub use crate::types::*;
  pub use crate::fields::*;
  pub use crate::error::*;
  pub use crate::matcher::*;
  pub use crate::ranker::*;
  pub use crate::debounce::*;
  pub use crate::suggest::*;
  pub use crate::observer::*;
  pub use crate::engine::*;
}
