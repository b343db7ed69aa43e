//! Optimization criterion selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a query names an unsupported criterion.
///
/// Never silently substituted with a default: an unrecognized name is a
/// malformed request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown criterion {name:?} (expected \"time\" or \"cost\")")]
pub struct UnknownCriterion {
    name: String,
}

/// Named optimization axis selecting which edge weight the solver
/// minimizes.
///
/// # Examples
///
/// ```
/// use route_engine::domain::Criterion;
///
/// assert_eq!(Criterion::parse("time").unwrap(), Criterion::Time);
/// assert_eq!(Criterion::parse("cost").unwrap(), Criterion::Cost);
///
/// // Unrecognized names are rejected, never defaulted
/// assert!(Criterion::parse("distance").is_err());
/// assert!(Criterion::parse("Time").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Minimize elapsed traversal time.
    Time,
    /// Minimize monetary/operational cost.
    Cost,
}

impl Criterion {
    /// Parse a criterion name.
    ///
    /// Names are case-sensitive: exactly `"time"` or `"cost"`.
    pub fn parse(s: &str) -> Result<Self, UnknownCriterion> {
        match s {
            "time" => Ok(Criterion::Time),
            "cost" => Ok(Criterion::Cost),
            other => Err(UnknownCriterion {
                name: other.to_string(),
            }),
        }
    }

    /// The criterion's canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Time => "time",
            Criterion::Cost => "cost",
        }
    }
}

impl FromStr for Criterion {
    type Err = UnknownCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::parse(s)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
