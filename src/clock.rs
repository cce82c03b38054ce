use chrono::{DateTime, Utc};

/// Source of report timestamps; fixed in tests so reports compare equal.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// 2023-11-14T22:13:20Z
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(
        DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
            .expect("fixed timestamp should be valid"),
    )
}
