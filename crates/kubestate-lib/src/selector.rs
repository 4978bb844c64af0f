//! `*`-or-exact selectors for namespaces and family names

use std::fmt;
use std::str::FromStr;

/// Matches everything when built from `*`, otherwise exactly one value
///
/// There is no glob or regex support: `kube_pod_*` only matches a family
/// literally named `kube_pod_*`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    All,
    Exact(String),
}

impl Selector {
    pub const WILDCARD: &'static str = "*";

    pub fn from_flag(value: &str) -> Self {
        if value == Self::WILDCARD {
            Selector::All
        } else {
            Selector::Exact(value.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Exact(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_flag(s))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str(Self::WILDCARD),
            Selector::Exact(value) => f.write_str(value),
        }
    }
}
