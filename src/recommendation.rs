//! Recommendation Generator
//!
//! Maps a declared risk tier to a bond/equity split and phrases it for the user.

use std::fmt;

/// Returned when the name or risk tier is missing or not recognized
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    None,
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::None,
        RiskTier::Low,
        RiskTier::Medium,
        RiskTier::High,
    ];

    /// Case-insensitive lookup of a tier name; surrounding whitespace is not stripped
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "none" => Some(RiskTier::None),
            "low" => Some(RiskTier::Low),
            "medium" => Some(RiskTier::Medium),
            "high" => Some(RiskTier::High),
            _ => None,
        }
    }

    pub fn allocation(&self) -> &'static str {
        match self {
            RiskTier::None => "100% bonds (AGG), 0% equities (SPY)",
            RiskTier::Low => "60% bonds (AGG), 40% equities (SPY)",
            RiskTier::Medium => "40% bonds (AGG), 60% equities (SPY)",
            RiskTier::High => "20% bonds (AGG), 80% equities (SPY)",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTier::None => "None",
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Phrase the allocation for `risk_level`, addressed to `name`.
pub fn recommend(name: Option<&str>, risk_level: Option<&str>) -> String {
    let (Some(name), Some(risk_level)) = (name, risk_level) else {
        return UNKNOWN.to_string();
    };

    let allocation = RiskTier::parse(risk_level)
        .map(|tier| tier.allocation())
        .unwrap_or(UNKNOWN);

    format!(
        "{}, given the risk level you chose, we recommend {}",
        name, allocation
    )
}
