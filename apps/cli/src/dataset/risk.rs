//! Risk classification — maps a dataset's numeric signal into one of three
//! ordinal bands by equal-width range splitting.

use serde::{Deserialize, Serialize};

/// Ordinal risk band derived from `Data_Value`. Never user-supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Normal Risk")]
    Normal,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// The exact string persisted in the `Risk Level` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Normal => "Normal Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band boundaries splitting `[min, max]` into three equal-width ranges.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub low: f64,
    pub normal: f64,
}

impl Thresholds {
    pub fn from_range(min: f64, max: f64) -> Self {
        let band = (max - min) / 3.0;
        Thresholds {
            low: min + band,
            normal: min + 2.0 * band,
        }
    }

    /// Classifies a value. Boundaries are inclusive-low: a value exactly at a
    /// threshold falls into the higher band.
    pub fn classify(&self, value: f64) -> RiskLevel {
        if value < self.low {
            RiskLevel::Low
        } else if value < self.normal {
            RiskLevel::Normal
        } else {
            RiskLevel::High
        }
    }
}
