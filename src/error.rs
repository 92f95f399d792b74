//! Configuration errors.

use thiserror::Error;

/// Rejected caller misconfiguration, surfaced at build time.
///
/// Runtime data never errors: absent, null, or non-string field values are
/// read as empty strings, so ranking is total over whatever items the caller
/// supplies. The only thing the engine refuses is a configuration that would
/// silently mis-rank results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
  /// A field weight was zero, negative, or not finite.
  #[error("field `{field}` has invalid weight {weight}; weights must be positive and finite")]
  InvalidWeight {
    /// The offending field key.
    field: String,
    /// The rejected weight.
    weight: f32,
  },
}
