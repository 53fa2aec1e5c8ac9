use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Creation time of a content entity.
///
/// Wall-clock milliseconds since the UNIX epoch. Timestamps order replies
/// within a post; ties are broken by reply id, so the ordering of a sorted
/// reply collection is always a total order.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The zero timestamp (epoch).
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from milliseconds since the UNIX epoch.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(millis)
    }

    /// Milliseconds since the UNIX epoch.
    pub const fn millis(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms)", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_millis() {
        assert!(Timestamp::from_millis(1) < Timestamp::from_millis(2));
        assert!(Timestamp::ZERO < Timestamp::from_millis(1));
    }

    #[test]
    fn now_is_after_epoch() {
        assert!(Timestamp::now() > Timestamp::ZERO);
    }

    #[test]
    fn serde_is_transparent() {
        let ts = Timestamp::from_millis(1000);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "1000");
    }
}
