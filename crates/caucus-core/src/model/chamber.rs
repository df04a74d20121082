use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the two legislative bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    Lower,
    Upper,
}

impl Chamber {
    /// Accepts `lower`/`representatives` and `upper`/`senate`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidChamber`] for any other spelling.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "lower" | "representatives" => Ok(Self::Lower),
            "upper" | "senate" => Ok(Self::Upper),
            other => Err(CoreError::InvalidChamber(other.to_string())),
        }
    }

    /// The API's `bill_type` filter value for bills introduced in this chamber.
    #[must_use]
    pub const fn bill_type(self) -> &'static str {
        match self {
            Self::Lower => "house_bill",
            Self::Upper => "senate_bill",
        }
    }

    /// Normalized name, used in cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chamber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_bill_types() {
        assert_eq!(Chamber::parse("lower").expect("lower").bill_type(), "house_bill");
        assert_eq!(
            Chamber::parse("representatives").expect("representatives").bill_type(),
            "house_bill"
        );
        assert_eq!(Chamber::parse("upper").expect("upper").bill_type(), "senate_bill");
        assert_eq!(Chamber::parse("senate").expect("senate").bill_type(), "senate_bill");
    }

    #[test]
    fn aliases_normalize_to_the_same_key() {
        assert_eq!(Chamber::parse("representatives").ok(), Chamber::parse("lower").ok());
        assert_eq!(Chamber::parse("senate").ok(), Chamber::parse("upper").ok());
    }

    #[test]
    fn unknown_chamber_is_rejected() {
        for raw in ["house", "Senate", "", "assembly"] {
            assert!(matches!(
                Chamber::parse(raw),
                Err(CoreError::InvalidChamber(ref v)) if v == raw
            ));
        }
    }
}
