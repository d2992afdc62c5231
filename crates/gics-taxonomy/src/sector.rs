//! The eleven GICS sectors, their codes and shorthand names.
//!
//! The loaded [`TaxonomyTable`](crate::TaxonomyTable) is the authority on
//! which sectors exist. This module only maps user input such as `"it"` or
//! `"45"` to the official sector name before it is classified.

use serde::{Deserialize, Serialize};
use std::fmt;

/// GICS Level 1 sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GicsSector {
    /// 10
    Energy,
    /// 15
    Materials,
    /// 20
    Industrials,
    /// 25
    ConsumerDiscretionary,
    /// 30
    ConsumerStaples,
    /// 35
    HealthCare,
    /// 40
    Financials,
    /// 45
    InformationTechnology,
    /// 50
    CommunicationServices,
    /// 55
    Utilities,
    /// 60
    RealEstate,
}

impl GicsSector {
    /// All sectors in code order.
    pub const ALL: [Self; 11] = [
        Self::Energy,
        Self::Materials,
        Self::Industrials,
        Self::ConsumerDiscretionary,
        Self::ConsumerStaples,
        Self::HealthCare,
        Self::Financials,
        Self::InformationTechnology,
        Self::CommunicationServices,
        Self::Utilities,
        Self::RealEstate,
    ];

    /// Two-digit sector code.
    pub const fn code(&self) -> u8 {
        match self {
            Self::Energy => 10,
            Self::Materials => 15,
            Self::Industrials => 20,
            Self::ConsumerDiscretionary => 25,
            Self::ConsumerStaples => 30,
            Self::HealthCare => 35,
            Self::Financials => 40,
            Self::InformationTechnology => 45,
            Self::CommunicationServices => 50,
            Self::Utilities => 55,
            Self::RealEstate => 60,
        }
    }

    /// Official sector name, as it appears in the hierarchy.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::Materials => "Materials",
            Self::Industrials => "Industrials",
            Self::ConsumerDiscretionary => "Consumer Discretionary",
            Self::ConsumerStaples => "Consumer Staples",
            Self::HealthCare => "Health Care",
            Self::Financials => "Financials",
            Self::InformationTechnology => "Information Technology",
            Self::CommunicationServices => "Communication Services",
            Self::Utilities => "Utilities",
            Self::RealEstate => "Real Estate",
        }
    }

    /// Shorthand accepted by [`parse`](Self::parse), besides the full name.
    const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Energy => &[],
            Self::Materials => &[],
            Self::Industrials => &["industrial"],
            Self::ConsumerDiscretionary => &["discretionary"],
            Self::ConsumerStaples => &["staples"],
            Self::HealthCare => &["health"],
            Self::Financials => &["finance", "financial"],
            Self::InformationTechnology => &["it", "tech"],
            Self::CommunicationServices => &["comms", "communication"],
            Self::Utilities => &["utility"],
            Self::RealEstate => &["estate"],
        }
    }

    /// Look up a sector by code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Parse a full name, shorthand or two-digit code.
    ///
    /// Case, spaces and underscores are ignored: `"Health Care"`,
    /// `"healthcare"`, `"health"` and `"35"` all give
    /// [`HealthCare`](Self::HealthCare).
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(code) = input.parse::<u8>() {
            return Self::from_code(code);
        }

        let key = normalize(input);
        Self::ALL.into_iter().find(|s| {
            normalize(s.name()) == key || s.aliases().iter().any(|a| *a == key)
        })
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for GicsSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Information Technology", GicsSector::InformationTechnology)]
    #[case("it", GicsSector::InformationTechnology)]
    #[case("45", GicsSector::InformationTechnology)]
    #[case("staples", GicsSector::ConsumerStaples)]
    #[case("consumer_discretionary", GicsSector::ConsumerDiscretionary)]
    #[case("HEALTHCARE", GicsSector::HealthCare)]
    #[case("comms", GicsSector::CommunicationServices)]
    #[case("finance", GicsSector::Financials)]
    #[case("real estate", GicsSector::RealEstate)]
    fn test_parse(#[case] input: &str, #[case] expected: GicsSector) {
        assert_eq!(GicsSector::parse(input), Some(expected));
    }

    #[rstest]
    #[case("crypto")]
    #[case("99")]
    #[case("")]
    fn test_parse_unknown(#[case] input: &str) {
        assert_eq!(GicsSector::parse(input), None);
    }

    #[test]
    fn test_codes_round_trip() {
        for sector in GicsSector::ALL {
            assert_eq!(GicsSector::from_code(sector.code()), Some(sector));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(GicsSector::RealEstate.to_string(), "Real Estate");
    }
}
