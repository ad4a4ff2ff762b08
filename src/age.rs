//! age.rs
//!
//! Elapsed-time buckets for a pet and its "human years" equivalent.
//!
//! Years and months are averages (365.25 and 30.44 days), not calendar
//! borrowing, so the figures shown in the app and the admin console always
//! agree for the same pair of instants.
//!
//! A recorded death freezes the age: once `deceased_at` has passed, every
//! later `now` yields the same result.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::species::Species;

pub(crate) const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
pub(crate) const DAYS_PER_YEAR: f64 = 365.25;
const DAYS_PER_MONTH: f64 = 30.44;

const UNKNOWN_HUMAN_AGE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeInfo {
    pub age_in_years: u64,
    pub age_in_months: u64,
    pub age_in_days: u64,
    pub human_age_in_years: f64,
    pub human_age_description: String,
}

/// Whole days between `birth` and `now`, rounded towards negative infinity.
///
/// A birth in the future gives a negative count.
pub fn days_since_birth<Tz: TimeZone>(birth: &DateTime<Tz>, now: &DateTime<Tz>) -> i64 {
    now.clone()
        .signed_duration_since(birth.clone())
        .num_milliseconds()
        .div_euclid(MS_PER_DAY)
}

/// Whole years in `days`, using 365.25-day years.
pub(crate) fn whole_years(days: i64) -> i64 {
    (days as f64 / DAYS_PER_YEAR).floor() as i64
}

/// Real age of a pet without any species overlay.
///
/// Returns `None` when the birth date is unknown or lies after the instant
/// the age is computed at.
pub fn age(
    birth: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    deceased_at: Option<DateTime<Utc>>,
) -> Option<AgeInfo> {
    let birth = birth?;

    let at = match deceased_at {
        Some(death) if death < now => death,
        _ => now,
    };

    let days = days_since_birth(&birth, &at);
    if days < 0 {
        return None;
    }

    Some(AgeInfo {
        age_in_years: whole_years(days) as u64,
        age_in_months: (days as f64 / DAYS_PER_MONTH).floor() as u64,
        age_in_days: days as u64,
        human_age_in_years: 0.0,
        human_age_description: UNKNOWN_HUMAN_AGE.to_string(),
    })
}

/// Human-equivalent years for a pet of `species` that is `age_in_years` old.
pub fn human_age(species: Species, age_in_years: i64) -> f64 {
    species.curve().human_years(age_in_years) as f64
}

/// Short label for a human-equivalent age, e.g. "about 24 years".
pub fn describe_human_age(years: f64) -> String {
    if years == 0.0 {
        return "0 years".to_string();
    }

    // Under a year is shown in months
    if years < 1.0 {
        let months = (years * 12.0).floor() as i64;
        return format!("{} month{}", months, plural(months));
    }

    let whole = years.floor() as i64;
    format!("about {} year{}", whole, plural(whole))
}

/// Real age plus the species-specific human age.
pub fn age_info(
    birth: Option<DateTime<Utc>>,
    species: Species,
    now: DateTime<Utc>,
    deceased_at: Option<DateTime<Utc>>,
) -> Option<AgeInfo> {
    let mut info = age(birth, now, deceased_at)?;

    let human = human_age(species, info.age_in_years as i64);
    info.human_age_in_years = human;
    info.human_age_description = describe_human_age(human);

    Some(info)
}

/// Renders an age as "2 years 3 months (human age: about 24 years)".
///
/// Memorial profiles drop the human-age annotation in favour of a farewell
/// suffix.
pub fn display_string(info: &AgeInfo, memorial: bool) -> String {
    let years = info.age_in_years as i64;
    let months = info.age_in_months as i64;

    let elapsed = if years == 0 {
        if months == 0 {
            let days = info.age_in_days as i64;
            format!("{} day{}", days, plural(days))
        } else {
            format!("{} month{}", months, plural(months))
        }
    } else {
        let remaining = months % 12;
        if remaining == 0 {
            format!("{} year{}", years, plural(years))
        } else {
            format!(
                "{} year{} {} month{}",
                years,
                plural(years),
                remaining,
                plural(remaining)
            )
        }
    };

    if memorial {
        return format!("{elapsed}, crossed the rainbow bridge");
    }

    format!("{elapsed} (human age: {})", info.human_age_description)
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 6, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn days_are_floored() {
        let b = birth();
        assert_eq!(days_since_birth(&b, &(b + Duration::hours(23))), 0);
        assert_eq!(days_since_birth(&b, &(b + Duration::hours(24))), 1);
        assert_eq!(days_since_birth(&b, &(b - Duration::hours(1))), -1);
    }

    #[test]
    fn missing_birth_is_none() {
        assert_eq!(age(None, Utc::now(), None), None);
    }

    #[test]
    fn future_birth_is_none() {
        let b = birth();
        assert_eq!(age(Some(b), b - Duration::days(2), None), None);
    }

    #[test]
    fn buckets_use_average_lengths() {
        let b = birth();
        let info = age(Some(b), b + Duration::days(800), None).unwrap();
        assert_eq!(info.age_in_days, 800);
        assert_eq!(info.age_in_years, 2);
        assert_eq!(info.age_in_months, 26);
        assert_eq!(info.human_age_description, "unknown");
    }

    #[test]
    fn death_freezes_age() {
        let b = birth();
        let death = b + Duration::days(400);
        let frozen = age(Some(b), b + Duration::days(4000), Some(death)).unwrap();
        assert_eq!(frozen.age_in_days, 400);

        // A death recorded after `now` does not apply yet
        let alive = age(Some(b), b + Duration::days(100), Some(death)).unwrap();
        assert_eq!(alive.age_in_days, 100);
    }

    #[test]
    fn describes_human_age() {
        assert_eq!(describe_human_age(0.0), "0 years");
        assert_eq!(describe_human_age(0.5), "6 months");
        assert_eq!(describe_human_age(1.0 / 12.0), "1 month");
        assert_eq!(describe_human_age(1.0), "about 1 year");
        assert_eq!(describe_human_age(24.9), "about 24 years");
    }

    #[test]
    fn age_info_overlays_species() {
        let b = birth();
        let info = age_info(Some(b), Species::Bird, b + Duration::days(731), None).unwrap();
        assert_eq!(info.age_in_years, 2);
        assert_eq!(info.human_age_in_years, 17.0);
        assert_eq!(info.human_age_description, "about 17 years");
    }

    #[test]
    fn display_collapses_units() {
        let b = birth();
        let d = |days| age_info(Some(b), Species::Dog, b + Duration::days(days), None).unwrap();

        assert_eq!(display_string(&d(1), false), "1 day (human age: 0 years)");
        assert_eq!(display_string(&d(12), false), "12 days (human age: 0 years)");
        assert_eq!(display_string(&d(61), false), "2 months (human age: 0 years)");
        assert_eq!(
            display_string(&d(366), false),
            "1 year (human age: about 15 years)"
        );
        assert_eq!(
            display_string(&d(800), false),
            "2 years 2 months (human age: about 24 years)"
        );
    }

    #[test]
    fn memorial_display_has_no_human_age() {
        let b = birth();
        let info = age_info(Some(b), Species::Cat, b + Duration::days(800), None).unwrap();
        assert_eq!(
            display_string(&info, true),
            "2 years 2 months, crossed the rainbow bridge"
        );
    }

    #[test]
    fn serializes_in_camel_case() {
        let b = birth();
        let info = age_info(Some(b), Species::Dog, b + Duration::days(30), None).unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["ageInDays"], 30);
        assert_eq!(json["ageInMonths"], 0);
        assert_eq!(json["humanAgeDescription"], "0 years");
    }
}
