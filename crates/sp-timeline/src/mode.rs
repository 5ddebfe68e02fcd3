use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// How the planning period is represented and labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    /// Absolute calendar dates ("Jan 2026").
    #[default]
    Dates,
    /// Simulation duration counted from a synthetic epoch ("M1 Y1").
    Duration,
}

impl PeriodMode {
    pub fn other(self) -> Self {
        match self {
            PeriodMode::Dates => PeriodMode::Duration,
            PeriodMode::Duration => PeriodMode::Dates,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodMode::Dates => "dates",
            PeriodMode::Duration => "duration",
        }
    }
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown period mode: {0:?} (expected \"dates\" or \"duration\")")]
pub struct UnknownPeriodMode(pub String);

impl FromStr for PeriodMode {
    type Err = UnknownPeriodMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dates" | "date" | "calendar" => Ok(PeriodMode::Dates),
            "duration" | "relative" => Ok(PeriodMode::Duration),
            _ => Err(UnknownPeriodMode(s.to_string())),
        }
    }
}
