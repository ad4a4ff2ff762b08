//! milestone.rs
//!
//! Celebration detection: birthdays and "days since you came home"
//! anniversaries.
//!
//! Rules are checked in a fixed order and the first match wins:
//!   1. birth in the future        -> nothing
//!   2. calendar birthday          -> birthday / N-th birthday
//!   3. exactly 30/90/180/365 days -> 1, 3, 6 month / 1 year anniversary
//!   4. within the window after a 365.25-day year boundary -> N years
//!
//! Rule 4 works in 365.25-day years, so near leap years it can disagree with
//! rule 3 about where a year ends. Rule 3 always wins.

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};

use crate::age::{DAYS_PER_YEAR, days_since_birth, whole_years};

pub const DEFAULT_ANNIVERSARY_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneKind {
    #[serde(rename = "birthday")]
    Birthday,
    #[serde(rename = "anniversary_1month")]
    OneMonth,
    #[serde(rename = "anniversary_3months")]
    ThreeMonths,
    #[serde(rename = "anniversary_6months")]
    SixMonths,
    #[serde(rename = "anniversary_1year")]
    OneYear,
    #[serde(rename = "anniversary_multiple_years")]
    MultipleYears,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneInfo {
    #[serde(rename = "type")]
    pub kind: MilestoneKind,
    pub message: String,
    pub value: u32,
}

impl MilestoneInfo {
    fn new(kind: MilestoneKind, value: u32) -> Self {
        let message = match kind {
            MilestoneKind::Birthday => "Happy birthday!".to_string(),
            MilestoneKind::OneMonth => "It has been 1 month since you came home!".to_string(),
            MilestoneKind::ThreeMonths => {
                "It has been 3 months since you came home!".to_string()
            }
            MilestoneKind::SixMonths => "It has been 6 months since you came home!".to_string(),
            MilestoneKind::OneYear => {
                "It has been exactly 1 year since you came home!".to_string()
            }
            MilestoneKind::MultipleYears => {
                format!("It has been {value} years since you came home!")
            }
        };

        Self {
            kind,
            message,
            value,
        }
    }

    /// Birthday greeting for a pet that turned `years` today.
    fn birthday(years: u32) -> Self {
        if years == 0 {
            return Self::new(MilestoneKind::Birthday, 0);
        }
        Self {
            kind: MilestoneKind::MultipleYears,
            message: format!("Happy {} birthday!", ordinal(years)),
            value: years,
        }
    }
}

/// Milestone rules with a configurable anniversary window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MilestoneDetector {
    /// Days after a year boundary that still count as the anniversary.
    pub anniversary_window_days: u32,
}

impl Default for MilestoneDetector {
    fn default() -> Self {
        Self {
            anniversary_window_days: DEFAULT_ANNIVERSARY_WINDOW_DAYS,
        }
    }
}

impl MilestoneDetector {
    pub fn new(anniversary_window_days: u32) -> Self {
        Self {
            anniversary_window_days,
        }
    }

    pub fn detect<Tz: TimeZone>(
        &self,
        birth: &DateTime<Tz>,
        now: &DateTime<Tz>,
    ) -> Option<MilestoneInfo> {
        let days = days_since_birth(birth, now);
        if days < 0 {
            return None;
        }

        let years = whole_years(days);

        if is_birthday_today(birth, now) {
            return Some(MilestoneInfo::birthday(years as u32));
        }

        match days {
            30 => return Some(MilestoneInfo::new(MilestoneKind::OneMonth, 1)),
            90 => return Some(MilestoneInfo::new(MilestoneKind::ThreeMonths, 3)),
            180 => return Some(MilestoneInfo::new(MilestoneKind::SixMonths, 6)),
            365 => return Some(MilestoneInfo::new(MilestoneKind::OneYear, 1)),
            _ => {}
        }

        let into_year = days as f64 % DAYS_PER_YEAR;
        if years > 0 && into_year <= f64::from(self.anniversary_window_days) {
            return Some(MilestoneInfo::new(
                MilestoneKind::MultipleYears,
                years as u32,
            ));
        }

        None
    }
}

/// True when `now` falls on the month and day of `birth`, in whichever
/// timezone the two instants carry.
pub fn is_birthday_today<Tz: TimeZone>(birth: &DateTime<Tz>, now: &DateTime<Tz>) -> bool {
    birth.month() == now.month() && birth.day() == now.day()
}

/// Milestone reached at `now`, using the default anniversary window.
pub fn milestone<Tz: TimeZone>(birth: &DateTime<Tz>, now: &DateTime<Tz>) -> Option<MilestoneInfo> {
    MilestoneDetector::default().detect(birth, now)
}

/// Notification text addressed to the pet by name.
pub fn format_message(milestone: &MilestoneInfo, name: &str) -> String {
    match milestone.kind {
        MilestoneKind::Birthday => format!("Happy birthday, {name}! 🎉"),
        MilestoneKind::OneMonth => {
            format!("{name} has been home for 1 month! Great job ✨")
        }
        MilestoneKind::ThreeMonths => {
            format!("{name} has been home for 3 months! Great job ✨")
        }
        MilestoneKind::SixMonths => {
            format!("{name} has been home for 6 months! Great job ✨")
        }
        MilestoneKind::OneYear => {
            format!("{name} has been home for exactly 1 year! Great job ✨")
        }
        MilestoneKind::MultipleYears => format!(
            "{name} has been home for {} year{}! Great job ✨",
            milestone.value,
            if milestone.value == 1 { "" } else { "s" }
        ),
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn birthday_ignores_year() {
        let b = birth();
        let later = Utc.with_ymd_and_hms(2029, 3, 10, 1, 0, 0).unwrap();
        assert!(is_birthday_today(&b, &later));
        let not = Utc.with_ymd_and_hms(2029, 3, 11, 1, 0, 0).unwrap();
        assert!(!is_birthday_today(&b, &not));
    }

    #[test]
    fn birthday_follows_the_carried_timezone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let b = tokyo.with_ymd_and_hms(2021, 3, 10, 0, 30, 0).unwrap();
        let now = tokyo.with_ymd_and_hms(2024, 3, 10, 23, 0, 0).unwrap();
        assert!(is_birthday_today(&b, &now));
        // Same instants read in UTC fall on different days
        assert!(!is_birthday_today(
            &b.with_timezone(&Utc),
            &now.with_timezone(&Utc)
        ));
    }

    #[test]
    fn future_birth_has_no_milestone() {
        let b = birth();
        assert_eq!(milestone(&b, &(b - Duration::days(1))), None);
    }

    #[test]
    fn day_zero_is_a_birthday() {
        let b = birth();
        let m = milestone(&b, &b).unwrap();
        assert_eq!(m.kind, MilestoneKind::Birthday);
        assert_eq!(m.value, 0);
    }

    #[test]
    fn later_birthdays_count_years() {
        let b = birth();
        let third = Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap();
        let m = milestone(&b, &third).unwrap();
        assert_eq!(m.kind, MilestoneKind::MultipleYears);
        assert_eq!(m.value, 3);
        assert_eq!(m.message, "Happy 3rd birthday!");
    }

    #[test]
    fn exact_day_anniversaries() {
        let b = birth();
        let at = |d| milestone(&b, &(b + Duration::days(d))).unwrap();

        assert_eq!((at(30).kind, at(30).value), (MilestoneKind::OneMonth, 1));
        assert_eq!((at(90).kind, at(90).value), (MilestoneKind::ThreeMonths, 3));
        assert_eq!((at(180).kind, at(180).value), (MilestoneKind::SixMonths, 6));
    }

    #[test]
    fn exact_year_without_calendar_birthday() {
        // 2024 is a leap year, so 365 days after 2024-01-01 is 2024-12-31
        let b = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let m = milestone(&b, &(b + Duration::days(365))).unwrap();
        assert_eq!(m.kind, MilestoneKind::OneYear);
        assert_eq!(m.value, 1);
    }

    #[test]
    fn calendar_birthday_at_365_days_reports_zero_years() {
        // 365 days in a common year is still under one 365.25-day year
        let b = Utc.with_ymd_and_hms(2022, 5, 1, 0, 0, 0).unwrap();
        let m = milestone(&b, &(b + Duration::days(365))).unwrap();
        assert_eq!(m.kind, MilestoneKind::Birthday);
        assert_eq!(m.value, 0);
    }

    #[test]
    fn window_after_year_boundary() {
        let b = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let m = milestone(&b, &(b + Duration::days(368))).unwrap();
        assert_eq!(m.kind, MilestoneKind::MultipleYears);
        assert_eq!(m.value, 1);

        // 372 - 365.25 = 6.75, inside; 373 - 365.25 = 7.75, outside
        assert!(milestone(&b, &(b + Duration::days(372))).is_some());
        assert_eq!(milestone(&b, &(b + Duration::days(373))), None);
    }

    #[test]
    fn window_is_configurable() {
        let b = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let narrow = MilestoneDetector::new(2);
        assert_eq!(narrow.detect(&b, &(b + Duration::days(368))), None);
        // 732 - 730.5 = 1.5
        let m = narrow.detect(&b, &(b + Duration::days(732))).unwrap();
        assert_eq!(m.value, 2);
    }

    #[test]
    fn ordinary_days_have_no_milestone() {
        let b = birth();
        assert_eq!(milestone(&b, &(b + Duration::days(45))), None);
        assert_eq!(milestone(&b, &(b + Duration::days(200))), None);
    }

    #[test]
    fn formats_messages_with_name() {
        let b = birth();
        let m = milestone(&b, &b).unwrap();
        assert_eq!(format_message(&m, "Mochi"), "Happy birthday, Mochi! 🎉");

        let m = milestone(&b, &(b + Duration::days(90))).unwrap();
        assert_eq!(
            format_message(&m, "Mochi"),
            "Mochi has been home for 3 months! Great job ✨"
        );

        let m = MilestoneInfo::new(MilestoneKind::MultipleYears, 4);
        assert_eq!(
            format_message(&m, "Kuro"),
            "Kuro has been home for 4 years! Great job ✨"
        );
    }

    #[test]
    fn serializes_kind_under_type() {
        let m = MilestoneInfo::new(MilestoneKind::SixMonths, 6);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["type"], "anniversary_6months");
        assert_eq!(json["value"], 6);
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(113), "113th");
    }
}
