//! Tokyo market trading-calendar check.
//!
//! The report cycle is skipped on weekends and Japanese national holidays.
//! Holidays are computed directly: fixed-date holidays, the Happy Monday
//! holidays, the approximate equinox days, and the Monday substitute rule.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc, Weekday};

fn jst_offset() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("valid JST offset")
}

/// The current calendar date in JST.
pub fn today_jst() -> NaiveDate {
    to_jst_date(Utc::now())
}

pub fn to_jst_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&jst_offset()).date_naive()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// (month, day, name) of the fixed-date national holidays
const FIXED_HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 1, "元日"),
    (2, 11, "建国記念の日"),
    (2, 23, "天皇誕生日"),
    (4, 29, "昭和の日"),
    (5, 3, "憲法記念日"),
    (5, 4, "みどりの日"),
    (5, 5, "こどもの日"),
    (8, 11, "山の日"),
    (11, 3, "文化の日"),
    (11, 23, "勤労感謝の日"),
];

/// (month, week ordinal, name) of the Happy Monday holidays
const MONDAY_HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 2, "成人の日"),
    (7, 3, "海の日"),
    (9, 3, "敬老の日"),
    (10, 2, "スポーツの日"),
];

/// Day-of-month of the equinox for a given year, by the standard
/// approximation (valid for 1980-2099).
fn equinox_day(year: i32, vernal: bool) -> u32 {
    let base = if vernal { 20.8431 } else { 23.2488 };
    let y = (year - 1980) as f64;
    (base + 0.242194 * y - (y / 4.0).floor()).floor() as u32
}

fn base_holiday(date: NaiveDate) -> Option<&'static str> {
    let (month, day) = (date.month(), date.day());
    for &(m, d, name) in FIXED_HOLIDAYS {
        if month == m && day == d {
            return Some(name);
        }
    }
    for &(m, week, name) in MONDAY_HOLIDAYS {
        if month == m && date.weekday() == Weekday::Mon && (day - 1) / 7 + 1 == week {
            return Some(name);
        }
    }
    if month == 3 && day == equinox_day(date.year(), true) {
        return Some("春分の日");
    }
    if month == 9 && day == equinox_day(date.year(), false) {
        return Some("秋分の日");
    }
    None
}

/// National holiday check, including the substitute holiday observed on a
/// Monday after a Sunday holiday.
pub fn japan_holiday(date: NaiveDate) -> Option<&'static str> {
    if let Some(name) = base_holiday(date) {
        return Some(name);
    }
    if date.weekday() == Weekday::Mon {
        if let Some(prev) = date.pred_opt() {
            if base_holiday(prev).is_some() {
                return Some("振替休日");
            }
        }
    }
    None
}

/// Why the market is closed today, or `None` when a session is expected.
pub fn market_closed_reason(date: NaiveDate) -> Option<String> {
    if is_weekend(date) {
        return Some("本日は土日（市場休場）です".to_string());
    }
    japan_holiday(date).map(|name| format!("本日は日本の祝日「{}」のため市場は休場です", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_is_closed() {
        assert!(is_weekend(date(2026, 8, 29))); // Saturday
        assert!(is_weekend(date(2026, 8, 30))); // Sunday
        assert!(!is_weekend(date(2026, 8, 28))); // Friday
        assert!(market_closed_reason(date(2026, 8, 29)).is_some());
    }

    #[test]
    fn test_fixed_holiday() {
        assert_eq!(japan_holiday(date(2026, 1, 1)), Some("元日"));
        assert_eq!(japan_holiday(date(2026, 11, 3)), Some("文化の日"));
    }

    #[test]
    fn test_happy_monday_holiday() {
        // second Monday of January 2026
        assert_eq!(japan_holiday(date(2026, 1, 12)), Some("成人の日"));
        // the Monday a week earlier is a plain trading day
        assert_eq!(japan_holiday(date(2026, 1, 5)), None);
    }

    #[test]
    fn test_equinox_days() {
        assert_eq!(japan_holiday(date(2026, 3, 20)), Some("春分の日"));
        assert_eq!(japan_holiday(date(2026, 9, 23)), Some("秋分の日"));
    }

    #[test]
    fn test_substitute_monday() {
        // 2025-02-23 (Emperor's Birthday) fell on a Sunday
        assert_eq!(japan_holiday(date(2025, 2, 24)), Some("振替休日"));
    }

    #[test]
    fn test_ordinary_weekday_is_open() {
        assert_eq!(market_closed_reason(date(2026, 8, 28)), None);
    }

    #[test]
    fn test_jst_date_rolls_over_before_utc() {
        let late_utc = DateTime::parse_from_rfc3339("2026-08-28T22:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(to_jst_date(late_utc), date(2026, 8, 29));
    }
}
