use serde::{Deserialize, Serialize};

/// Overall condition grade of a vehicle, as submitted by the seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    /// Lenient parse for user-supplied text. Unknown values return `None`,
    /// which prices with the neutral 1.0 multiplier.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excellent" => Some(Self::Excellent),
            "good" => Some(Self::Good),
            "fair" => Some(Self::Fair),
            "poor" => Some(Self::Poor),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Condition::parse("Excellent"), Some(Condition::Excellent));
        assert_eq!(Condition::parse("GOOD"), Some(Condition::Good));
        assert_eq!(Condition::parse(" fair "), Some(Condition::Fair));
    }

    #[test]
    fn parse_rejects_unknown_grades() {
        assert_eq!(Condition::parse("mint"), None);
        assert_eq!(Condition::parse(""), None);
    }

    #[test]
    fn as_str_round_trips() {
        for c in [
            Condition::Excellent,
            Condition::Good,
            Condition::Fair,
            Condition::Poor,
        ] {
            assert_eq!(Condition::parse(c.as_str()), Some(c));
        }
    }
}
