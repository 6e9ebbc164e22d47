//! Update-schedule decision policy.

use chrono::{Datelike, NaiveDateTime, Timelike};

use folio_core::parsers::parse_clock_time;
use folio_core::types::ScheduleConfig;

/// Decide whether a fetch is due at `now`.
///
/// Checked in order: the daily morning time, the daily night time, then the
/// weekday window on the configured minute interval. Exact-minute matches
/// only; the function keeps no state and the coordinator re-evaluates it on
/// every tick.
pub fn should_update_now(now: NaiveDateTime, schedule: &ScheduleConfig) -> bool {
    let hour = now.hour();
    let minute = now.minute();

    if let Some((h, m)) = parse_clock_time(&schedule.morning_time) {
        if hour == h && minute == m {
            return true;
        }
    }
    if let Some((h, m)) = parse_clock_time(&schedule.night_time) {
        if hour == h && minute == m {
            return true;
        }
    }

    // Monday through Friday, within [start, end), on the interval.
    if now.weekday().num_days_from_monday() < 5
        && schedule.weekday_start_hour <= hour
        && hour < schedule.weekday_end_hour
        && minute % schedule.weekday_interval_minutes.max(1) == 0
    {
        return true;
    }

    false
}
