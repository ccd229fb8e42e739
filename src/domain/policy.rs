use std::fmt;
use std::str::FromStr;

// ============================================================================
// Input Validation Policy
// ============================================================================
//
// Lenient mode keeps the legacy contract: unknown order states are stored
// verbatim, transitions are not direction-checked, and unparsable numbers
// become 0. Strict mode rejects all three at the input edge.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    Lenient,
    Strict,
}

/// A numeric form field that could not be parsed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} must be an integer, got {raw:?}")]
pub struct MalformedNumber {
    pub field: &'static str,
    pub raw: String,
}

impl ValidationMode {
    pub fn is_strict(self) -> bool {
        matches!(self, ValidationMode::Strict)
    }

    /// Parse a numeric field. Lenient mode falls back to the type's zero value.
    pub fn parse_integer<T>(self, field: &'static str, raw: &str) -> Result<T, MalformedNumber>
    where
        T: FromStr + Default,
    {
        match raw.parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) if !self.is_strict() => {
                tracing::warn!(field, raw, "Unparsable integer coerced to 0");
                Ok(T::default())
            }
            Err(_) => Err(MalformedNumber {
                field,
                raw: raw.to_string(),
            }),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" | "legacy" => Ok(ValidationMode::Lenient),
            "strict" => Ok(ValidationMode::Strict),
            other => Err(format!("expected `lenient` or `strict`, got `{other}`")),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Lenient => f.write_str("lenient"),
            ValidationMode::Strict => f.write_str("strict"),
        }
    }
}
