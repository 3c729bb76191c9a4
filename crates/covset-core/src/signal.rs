//! Non-fatal collision signals raised while resolving duplicate hashes

use crate::error::{Error, Result};
use std::ops::{BitOr, BitOrAssign};

/// Composite flags describing what a mutation found when hashes collided.
///
/// An empty signal means no collision happened. `HASH_MATCH` is raised
/// whenever a duplicate hash was resolved; `VALUE_DIFFERS` is only raised
/// by [`RecordSet::append`](crate::RecordSet::append) alongside
/// `HASH_MATCH` when the replaced record carried a different value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[must_use]
pub struct CollisionSignal(u8);

impl CollisionSignal {
    pub const NONE: Self = Self(0);
    pub const HASH_MATCH: Self = Self(1 << 0);
    pub const VALUE_DIFFERS: Self = Self(1 << 1);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every flag in `other` is also set in `self`
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Lift a non-empty signal into [`Error::Collision`]
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Collision(self))
        }
    }
}

impl BitOr for CollisionSignal {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionSignal {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::fmt::Display for CollisionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "no collision");
        }
        if !self.contains(Self::HASH_MATCH) {
            return write!(f, "Unknown collision");
        }
        write!(f, "There is a matching record for hash")?;
        if self.contains(Self::VALUE_DIFFERS) {
            write!(f, " and value is different than old")?;
        }
        Ok(())
    }
}
