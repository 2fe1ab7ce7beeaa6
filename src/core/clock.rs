//! Time sources for loggers
//!
//! A [`Clock`] supplies the current instant and the zone used to render
//! time-of-day. Fixed clocks make log output reproducible in tests.

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Zone used to turn an instant into a time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClockZone {
    Utc,
    #[default]
    Local,
    Offset(FixedOffset),
}

impl ClockZone {
    /// Offset from UTC in seconds at the given instant
    pub fn offset_seconds(&self, time: &DateTime<Utc>) -> i32 {
        match self {
            ClockZone::Utc => 0,
            ClockZone::Local => Local
                .offset_from_utc_datetime(&time.naive_utc())
                .fix()
                .local_minus_utc(),
            ClockZone::Offset(offset) => offset.local_minus_utc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Clock {
    /// The system clock, rendered in the given zone
    System(ClockZone),
    /// Always reports the same instant
    Fixed {
        instant: DateTime<Utc>,
        zone: ClockZone,
    },
}

impl Default for Clock {
    fn default() -> Self {
        Clock::System(ClockZone::Local)
    }
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Clock::default()
    }

    #[must_use]
    pub fn system_utc() -> Self {
        Clock::System(ClockZone::Utc)
    }

    #[must_use]
    pub fn fixed(instant: DateTime<Utc>, zone: ClockZone) -> Self {
        Clock::Fixed { instant, zone }
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System(_) => Utc::now(),
            Clock::Fixed { instant, .. } => *instant,
        }
    }

    pub fn zone(&self) -> ClockZone {
        match self {
            Clock::System(zone) | Clock::Fixed { zone, .. } => *zone,
        }
    }

    /// Milliseconds since midnight in this clock's zone
    pub fn day_millis(&self, time: &DateTime<Utc>) -> u32 {
        let offset_millis = i64::from(self.zone().offset_seconds(time)) * 1000;
        let millis = (time.timestamp_millis() + offset_millis).rem_euclid(MILLIS_PER_DAY);
        // rem_euclid keeps this in 0..86_400_000
        millis as u32
    }
}
