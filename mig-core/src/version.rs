use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// A library version used to select which change data applies.
///
/// Parsing is lenient: `"6"`, `"v6"`, `"6.1"` and `"6.1.2"` are all accepted,
/// missing components default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    /// Check whether this version lies in `[since, until)`.
    ///
    /// An absent bound is unbounded on that side.
    pub fn in_range(&self, since: Option<&Version>, until: Option<&Version>) -> bool {
        since.is_none_or(|s| self >= s) && until.is_none_or(|u| self < u)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let parts: Vec<&str> = body.split('.').collect();
        if body.is_empty() || parts.len() > 3 {
            return Err(format!("invalid version '{}', expected 'X', 'X.Y' or 'X.Y.Z'", s));
        }

        let component = |idx: usize, label: &str| -> Result<u32, String> {
            match parts.get(idx) {
                Some(p) => p
                    .parse()
                    .map_err(|_| format!("invalid {} in version '{}'", label, s)),
                None => Ok(0),
            }
        };

        Ok(Self {
            major: component(0, "major")?,
            minor: component(1, "minor")?,
            patch: component(2, "patch")?,
        })
    }
}
