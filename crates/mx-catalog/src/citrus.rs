//! Citrus juices present most of their citric acid already dissociated by the
//! minerals that accompany it; a fixed per-fruit factor accounts for that.

/// Citrus fruit whose juice receives a free-acid correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CitrusKind {
    Lemon,
    Lime,
    Orange,
    Grapefruit,
}

impl CitrusKind {
    pub const ALL: [CitrusKind; 4] = [
        CitrusKind::Lemon,
        CitrusKind::Lime,
        CitrusKind::Orange,
        CitrusKind::Grapefruit,
    ];

    /// Fraction of the juice's acid that is already dissociated.
    pub fn dissociation(&self) -> f64 {
        match self {
            CitrusKind::Lemon => 0.9057,
            CitrusKind::Lime => 0.93828,
            CitrusKind::Orange => 0.99157,
            CitrusKind::Grapefruit => 0.9924,
        }
    }

    /// Mixture id prefix that marks a juice subtree.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            CitrusKind::Lemon => "lemon-juice",
            CitrusKind::Lime => "lime-juice",
            CitrusKind::Orange => "orange-juice",
            CitrusKind::Grapefruit => "grapefruit-juice",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CitrusKind::Lemon => "Lemon Juice",
            CitrusKind::Lime => "Lime Juice",
            CitrusKind::Orange => "Orange Juice",
            CitrusKind::Grapefruit => "Grapefruit Juice",
        }
    }

    /// Detect a juice from the id of the mixture that holds it.
    pub fn from_mixture_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| id.starts_with(kind.id_prefix()))
    }
}

impl std::str::FromStr for CitrusKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lemon" => Ok(CitrusKind::Lemon),
            "lime" => Ok(CitrusKind::Lime),
            "orange" => Ok(CitrusKind::Orange),
            "grapefruit" => Ok(CitrusKind::Grapefruit),
            _ => Err("unknown citrus fruit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_prefix() {
        assert_eq!(
            CitrusKind::from_mixture_id("lime-juice-1234"),
            Some(CitrusKind::Lime)
        );
        assert_eq!(
            CitrusKind::from_mixture_id("grapefruit-juice"),
            Some(CitrusKind::Grapefruit)
        );
        assert_eq!(CitrusKind::from_mixture_id("simple-syrup"), None);
    }

    #[test]
    fn dissociation_constants() {
        assert_eq!(CitrusKind::Lemon.dissociation(), 0.9057);
        assert_eq!(CitrusKind::Orange.dissociation(), 0.99157);
    }

    #[test]
    fn parse_names() {
        assert_eq!("Lemon".parse::<CitrusKind>().unwrap(), CitrusKind::Lemon);
        assert!("kumquat".parse::<CitrusKind>().is_err());
    }
}
