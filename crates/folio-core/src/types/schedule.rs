//! Update-schedule configuration.

use serde::{Deserialize, Serialize};

/// User-configurable update schedule.
///
/// Weekday polling covers `[weekday_start_hour, weekday_end_hour)` on a
/// minute interval, Monday through Friday; the night and morning times fire
/// once per day regardless of weekday. A window whose start is at or past
/// its end is accepted and simply never triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Minutes between weekday updates, 1 to 60.
    pub weekday_interval_minutes: u32,
    /// First hour of the weekday window, 0 to 23.
    pub weekday_start_hour: u32,
    /// Hour the weekday window closes (exclusive), 0 to 23.
    pub weekday_end_hour: u32,
    /// Daily evening update, `"HH:MM"`.
    pub night_time: String,
    /// Daily morning update, `"HH:MM"`.
    pub morning_time: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekday_interval_minutes: 15,
            weekday_start_hour: 9,
            weekday_end_hour: 21,
            night_time: "22:05".to_string(),
            morning_time: "04:00".to_string(),
        }
    }
}
