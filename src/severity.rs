//! Health severity tiers for AQI values

use serde::{Deserialize, Serialize};

/// EPA health category of an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Negative input, which no real AQI can produce
    Unknown,
    /// 0 to 50
    Good,
    /// 51 to 100
    Moderate,
    /// 101 to 150
    UnhealthyForSensitiveGroups,
    /// 151 to 200
    Unhealthy,
    /// 201 to 300
    VeryUnhealthy,
    /// Above 300
    Hazardous,
}

impl Severity {
    /// Classify an AQI value.
    ///
    /// Takes a float so out-of-domain raw concentrations can be classified too;
    /// fractional values between two integer thresholds go to the higher tier.
    ///
    /// ```rust
    /// use purple_aqi::Severity;
    ///
    /// assert_eq!(Severity::classify(300.0), Severity::VeryUnhealthy);
    /// assert_eq!(Severity::classify(301.0), Severity::Hazardous);
    /// ```
    #[must_use]
    pub fn classify(aqi: f64) -> Self {
        if aqi > 300.0 {
            Self::Hazardous
        } else if aqi > 200.0 {
            Self::VeryUnhealthy
        } else if aqi > 150.0 {
            Self::Unhealthy
        } else if aqi > 100.0 {
            Self::UnhealthyForSensitiveGroups
        } else if aqi > 50.0 {
            Self::Moderate
        } else if aqi >= 0.0 {
            Self::Good
        } else {
            Self::Unknown
        }
    }

    /// Short lowercase description
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::UnhealthyForSensitiveGroups => "unhealthy for sensitive groups",
            Self::Unhealthy => "unhealthy",
            Self::VeryUnhealthy => "very unhealthy",
            Self::Hazardous => "hazardous",
        }
    }

    /// Description with every word capitalized, e.g. "Unhealthy For Sensitive Groups"
    #[must_use]
    pub fn title(self) -> String {
        self.label()
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Status-bar icon for the tier
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Unknown => "🤷",
            Self::Good => "🏖",
            Self::Moderate => "⛅",
            Self::UnhealthyForSensitiveGroups => "😷",
            Self::Unhealthy => "🤢",
            Self::VeryUnhealthy => "🤮",
            Self::Hazardous => "☣️",
        }
    }

    /// Icon and title as shown in the dropdown, e.g. "⛅ Moderate".
    ///
    /// The hazard sign renders wide but measures narrow, so it gets an extra
    /// space to keep the title from overlapping it.
    #[must_use]
    pub fn description(self) -> String {
        let gap = if self == Self::Hazardous { "  " } else { " " };
        format!("{}{gap}{}", self.icon(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-1.0, Severity::Unknown)]
    #[case(-0.5, Severity::Unknown)]
    #[case(0.0, Severity::Good)]
    #[case(50.0, Severity::Good)]
    #[case(50.5, Severity::Moderate)]
    #[case(51.0, Severity::Moderate)]
    #[case(100.0, Severity::Moderate)]
    #[case(101.0, Severity::UnhealthyForSensitiveGroups)]
    #[case(150.0, Severity::UnhealthyForSensitiveGroups)]
    #[case(151.0, Severity::Unhealthy)]
    #[case(200.0, Severity::Unhealthy)]
    #[case(201.0, Severity::VeryUnhealthy)]
    #[case(300.0, Severity::VeryUnhealthy)]
    #[case(301.0, Severity::Hazardous)]
    #[case(1044.0, Severity::Hazardous)]
    fn classify_cases(#[case] aqi: f64, #[case] expected: Severity) {
        assert_eq!(Severity::classify(aqi), expected);
    }

    #[rstest]
    #[case(Severity::Good, "good", "Good")]
    #[case(Severity::VeryUnhealthy, "very unhealthy", "Very Unhealthy")]
    #[case(
        Severity::UnhealthyForSensitiveGroups,
        "unhealthy for sensitive groups",
        "Unhealthy For Sensitive Groups"
    )]
    #[case(Severity::Unknown, "unknown", "Unknown")]
    fn label_and_title(#[case] severity: Severity, #[case] label: &str, #[case] title: &str) {
        assert_eq!(severity.label(), label);
        assert_eq!(severity.title(), title);
    }

    #[rstest]
    #[case(Severity::Good, "🏖 Good")]
    #[case(Severity::Moderate, "⛅ Moderate")]
    #[case(Severity::VeryUnhealthy, "🤮 Very Unhealthy")]
    #[case(Severity::Hazardous, "☣️  Hazardous")]
    fn descriptions(#[case] severity: Severity, #[case] expected: &str) {
        assert_eq!(severity.description(), expected);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Severity::Unknown < Severity::Good);
        assert!(Severity::Good < Severity::Moderate);
        assert!(Severity::VeryUnhealthy < Severity::Hazardous);
    }
}
