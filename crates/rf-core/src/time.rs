//! Clocks and the feed's timestamp display.

use chrono::{DateTime, FixedOffset, Local, SubsecRound, Utc};

use crate::traits::Clock;

/// `DD.MM.YYYY HH:MM`, 24-hour, zero-padded.
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Wall clock truncated to milliseconds, so stamped instants survive the stored format exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// Always returns the same instant. For tests and reproducible demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Whose calendar fields the feed shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    /// The zone of the machine running the server.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    pub fn format(&self, instant: &DateTime<Utc>) -> String {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
            DisplayZone::Fixed(offset) => instant.with_timezone(offset).format(DISPLAY_FORMAT).to_string(),
        }
    }
}
