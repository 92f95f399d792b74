//! Field specification DSL for configuring which fields participate in search.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The set of fields the engine scores, in declaration order.
///
/// Declaration order is load-bearing: field match entries, suggestion token
/// harvesting, and therefore the engine's output all follow it, which keeps
/// repeated runs over identical input byte-identical.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSpecs {
    fields: Vec<(String, FieldSpec)>,
}

impl FieldSpecs {
    /// Create a new specs builder.
    pub fn builder() -> FieldSpecsBuilder {
        FieldSpecsBuilder::default()
    }

    /// Iterate over the configured fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Number of configured fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are configured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check that every weight is positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, spec) in self.iter() {
            if !(spec.weight.is_finite() && spec.weight > 0.0) {
                return Err(ConfigError::InvalidWeight {
                    field: name.to_string(),
                    weight: spec.weight,
                });
            }
        }
        Ok(())
    }
}

/// Builder for field specs.
#[derive(Debug, Default)]
pub struct FieldSpecsBuilder {
    fields: Vec<(String, FieldSpec)>,
}

impl FieldSpecsBuilder {
    /// Add a field spec. Re-declaring a field appends a second entry rather
    /// than replacing the first; declare each field once.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }

    /// Build the field specs.
    pub fn build(self) -> FieldSpecs {
        FieldSpecs {
            fields: self.fields,
        }
    }
}

/// How a single field is matched and weighted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Relative importance of this field. Weights are caller-supplied and
    /// never normalized; keep them on comparable scales across fields.
    #[serde(default = "default_weight")]
    pub weight: f32,
    /// Whether approximate (subsequence) matching is allowed for this field.
    #[serde(default)]
    pub fuzzy: bool,
}

fn default_weight() -> f32 {
    1.0
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            weight: default_weight(),
            fuzzy: false,
        }
    }
}

impl FieldSpec {
    /// Create a substring-only spec (exact, prefix, or containment match).
    pub fn substring() -> Self {
        Self::default()
    }

    /// Create a spec that also allows in-order subsequence matching.
    pub fn fuzzy() -> Self {
        Self {
            fuzzy: true,
            ..Self::default()
        }
    }

    /// Set the weight.
    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}
