use serde::Serialize;
use std::fmt;

/// Three-tier sustainability classification derived from the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rating {
    Bronze,
    Silver,
    Green,
}

impl Rating {
    /// Lowest percentage (inclusive) rated Green
    pub const GREEN_THRESHOLD: f64 = 80.0;
    /// Lowest percentage (inclusive) rated Silver
    pub const SILVER_THRESHOLD: f64 = 50.0;

    /// Thresholds are checked highest first; the first match wins.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= Self::GREEN_THRESHOLD {
            Rating::Green
        } else if percentage >= Self::SILVER_THRESHOLD {
            Rating::Silver
        } else {
            Rating::Bronze
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Green => "Green",
            Rating::Silver => "Silver",
            Rating::Bronze => "Bronze",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Rating::Green => "Highly Sustainable",
            Rating::Silver => "Moderately Sustainable",
            Rating::Bronze => "Needs Improvement",
        }
    }

    /// Display colour as a CSS colour name or hex code
    pub fn color(self) -> &'static str {
        match self {
            Rating::Green => "green",
            Rating::Silver => "silver",
            Rating::Bronze => "#cd7f32",
        }
    }

    /// RGB value of [`Rating::color`]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Rating::Green => (0, 128, 0),
            Rating::Silver => (192, 192, 192),
            Rating::Bronze => (0xcd, 0x7f, 0x32),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.description())
    }
}
