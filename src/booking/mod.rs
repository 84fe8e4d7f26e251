//! Pure booking calculus: slot generation and the working-hour policy
//!
//! Nothing in this module performs I/O; the availability resolver and the
//! booking validator build on these functions with repository reads.

mod slots;

pub use slots::generate_slots;

use chrono::{NaiveDateTime, Timelike};

use crate::config::BookingConfig;

/// Working-hour policy for a deployment.
///
/// All stored instants are timezone-naive and interpreted in the
/// deployment's local civil time.
#[derive(Debug, Clone, Copy)]
pub struct WorkingHours {
    pub opening_hour: u32,
    pub closing_hour: u32,
    pub slot_minutes: u32,
}

impl WorkingHours {
    pub fn new(opening_hour: u32, closing_hour: u32, slot_minutes: u32) -> Self {
        Self {
            opening_hour,
            closing_hour,
            slot_minutes,
        }
    }

    /// True when a requested time slot falls within working hours and on
    /// the slot grid (minute 0 or 30 for 30-minute slots).
    pub fn is_bookable(&self, slot: NaiveDateTime) -> bool {
        let hour = slot.hour();
        if hour < self.opening_hour || hour >= self.closing_hour {
            return false;
        }
        self.slot_minutes != 0 && slot.minute() % self.slot_minutes == 0 && slot.second() == 0
    }

    /// All bookable slots on a given date under this policy
    pub fn slots_for_date(&self, date: chrono::NaiveDate) -> Vec<NaiveDateTime> {
        generate_slots(date, self.opening_hour, self.closing_hour, self.slot_minutes)
    }
}

impl From<&BookingConfig> for WorkingHours {
    fn from(config: &BookingConfig) -> Self {
        Self::new(config.opening_hour, config.closing_hour, config.slot_minutes)
    }
}
