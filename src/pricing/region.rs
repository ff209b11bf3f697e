//! Pricing regions.

use serde::Serialize;

/// Storage key value for the Delhi-NCR region
pub const NCR_KEY: &str = "ncr";
/// Storage key value for the rest of India
pub const OTHER_KEY: &str = "other";

/// Pricing zone deciding which of an item's two prices applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Ncr,
    #[default]
    Other,
}

impl Region {
    /// Parse a stored or clicked region key.
    ///
    /// Only `"ncr"` selects [`Region::Ncr`]; every other string, including
    /// unknown ones, falls into [`Region::Other`].
    pub fn from_key(key: &str) -> Self {
        if key == NCR_KEY {
            Region::Ncr
        } else {
            Region::Other
        }
    }

    /// Key written to the preference store and carried by region buttons
    pub fn key(self) -> &'static str {
        match self {
            Region::Ncr => NCR_KEY,
            Region::Other => OTHER_KEY,
        }
    }

    /// Human-readable region name shown in the indicator and breakdown
    pub fn display_name(self) -> &'static str {
        match self {
            Region::Ncr => "Delhi-NCR",
            Region::Other => "Rest of India",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
