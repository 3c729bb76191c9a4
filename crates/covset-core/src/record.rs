//! Record type

use crate::signal::CollisionSignal;
use serde::{Deserialize, Serialize};

/// A coverage value identified by a content hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub hash: String,
    /// Older producers emit this field as `cov`
    #[serde(alias = "cov")]
    pub value: f64,
}

impl Record {
    pub fn new(hash: impl Into<String>, value: f64) -> Self {
        Self {
            hash: hash.into(),
            value,
        }
    }

    /// Compare identities. Returns an empty signal for different hashes,
    /// `HASH_MATCH` for equal hashes and additionally `VALUE_DIFFERS` when
    /// the values are not equal.
    pub fn matches(&self, other: &Record) -> CollisionSignal {
        if self.hash != other.hash {
            return CollisionSignal::NONE;
        }

        let mut signal = CollisionSignal::HASH_MATCH;
        if self.value != other.value {
            signal |= CollisionSignal::VALUE_DIFFERS;
        }
        signal
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.hash, self.value)
    }
}
