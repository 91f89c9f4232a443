use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A lightweight wrapper around a 64-bit Steam community id, kept in its decimal string form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SteamId(String);

#[derive(Debug, Clone, Error)]
#[error("Not a valid Steam id: {0}")]
pub struct SteamIdError(pub String);

impl SteamId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for SteamId {
    type Err = SteamIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SteamIdError(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl Display for SteamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
