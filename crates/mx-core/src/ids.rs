use core::fmt;
use uuid::Uuid;

/// Stable identifier for mixtures and ingredient edges.
///
/// - minted from a v4 UUID, optionally behind a readable prefix
/// - survives clone and serialization unchanged
/// - an edge whose item is a mixture carries that mixture's id
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Id(String);

impl Id {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh, globally unique identifier.
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Mint a fresh identifier of the form `{prefix}-{uuid}`.
    pub fn mint_with_prefix(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type MixtureId = Id;
pub type IngredientId = Id;
