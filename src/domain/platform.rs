//! Marketplace identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Upstream marketplace a product was fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Rakuten,
    Yahoo,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown platform '{0}' (expected 'rakuten' or 'yahoo')")]
pub struct UnknownPlatform(pub String);

impl Platform {
    /// Path segment and wire tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rakuten => "rakuten",
            Self::Yahoo => "yahoo",
        }
    }

    /// Human readable label ("Rakuten", "Yahoo")
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rakuten => "Rakuten",
            Self::Yahoo => "Yahoo",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rakuten" => Ok(Self::Rakuten),
            "yahoo" => Ok(Self::Yahoo),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}
