use serde::{Deserialize, Serialize};

/// Behavioral engagement category of a player.
///
/// Variants are declared in ascending engagement order, so the derived
/// `Ord` sorts `Low < Medium < High`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum EngagementLevel {
    Low,
    Medium,
    High,
}

impl EngagementLevel {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Ordinal encoding used when averaging engagement over a group:
    /// `Low = 0`, `Medium = 1`, `High = 2`.
    ///
    /// This is unrelated to the class indices emitted by the trained
    /// classifier, which follow their own fixed table.
    ///
    /// ```
    /// # use engagement_core::EngagementLevel;
    /// assert_eq!(EngagementLevel::Low.ordinal(), 0);
    /// assert_eq!(EngagementLevel::High.ordinal(), 2);
    /// ```
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Parses a dataset label, returning `None` for anything unrecognized.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == label.trim())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_encoding() {
        let encoded = EngagementLevel::ALL.map(EngagementLevel::ordinal);
        assert_eq!(encoded, [0, 1, 2]);
    }

    #[test]
    fn test_from_label() {
        assert_eq!(EngagementLevel::from_label("Medium"), Some(EngagementLevel::Medium));
        assert_eq!(EngagementLevel::from_label(" High "), Some(EngagementLevel::High));
        assert_eq!(EngagementLevel::from_label("Extreme"), None);
        assert_eq!(EngagementLevel::from_label(""), None);
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(EngagementLevel::Low.to_string(), "Low");
        assert_eq!("High".parse::<EngagementLevel>().unwrap(), EngagementLevel::High);
    }
}
