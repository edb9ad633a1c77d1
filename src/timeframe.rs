// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart windows and the calendar arithmetic behind them.
//!
//! A [`TimeFrame`] decides how far back from "now" a chart looks and which
//! [`Granularity`] its bars use. All arithmetic happens in UTC, so an hour or a
//! day is always the same length; months and years step by calendar month.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveTime, TimeDelta, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "D", alias = "day")]
    Day,
    #[serde(rename = "W", alias = "week")]
    Week,
    #[serde(rename = "M", alias = "month")]
    Month,
    #[serde(rename = "6M", alias = "six_months")]
    SixMonths,
    #[serde(rename = "Y", alias = "year")]
    Year,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 5] = [
        TimeFrame::Day,
        TimeFrame::Week,
        TimeFrame::Month,
        TimeFrame::SixMonths,
        TimeFrame::Year,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeFrame::Day => "D",
            TimeFrame::Week => "W",
            TimeFrame::Month => "M",
            TimeFrame::SixMonths => "6M",
            TimeFrame::Year => "Y",
        }
    }

    pub fn granularity(self) -> Granularity {
        match self {
            TimeFrame::Day => Granularity::Hour,
            TimeFrame::Week | TimeFrame::Month => Granularity::Day,
            TimeFrame::SixMonths => Granularity::Week,
            TimeFrame::Year => Granularity::Month,
        }
    }

    /// Earliest instant a transaction may carry to fall inside the window.
    /// `None` only when the subtraction leaves chrono's representable range.
    pub fn lookback_start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeFrame::Day => now.checked_sub_signed(TimeDelta::days(1)),
            TimeFrame::Week => now.checked_sub_signed(TimeDelta::days(7)),
            TimeFrame::Month => now.checked_sub_months(Months::new(1)),
            TimeFrame::SixMonths => now.checked_sub_months(Months::new(6)),
            TimeFrame::Year => now.checked_sub_months(Months::new(12)),
        }
    }

    /// strftime pattern for axis labels.
    pub fn label_format(self) -> &'static str {
        match self {
            TimeFrame::Day => "%-I %p",
            TimeFrame::Week | TimeFrame::Month => "%b %-d",
            TimeFrame::SixMonths | TimeFrame::Year => "%b %Y",
        }
    }

    pub fn format_label(self, ts: DateTime<Utc>) -> String {
        ts.format(self.label_format()).to_string()
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "day" => Ok(TimeFrame::Day),
            "w" | "week" => Ok(TimeFrame::Week),
            "m" | "month" => Ok(TimeFrame::Month),
            "6m" | "six_months" | "sixmonths" | "6months" => Ok(TimeFrame::SixMonths),
            "y" | "year" => Ok(TimeFrame::Year),
            other => Err(format!(
                "unknown time frame '{}', expected one of D, W, M, 6M, Y",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
}

impl Granularity {
    /// Start of the calendar unit containing `ts`.
    pub fn truncate(self, ts: DateTime<Utc>, week_start: Weekday) -> DateTime<Utc> {
        let date = ts.date_naive();
        let midnight = |d: chrono::NaiveDate| d.and_time(NaiveTime::MIN).and_utc();
        match self {
            Granularity::Hour => midnight(date) + TimeDelta::hours(i64::from(ts.hour())),
            Granularity::Day => midnight(date),
            Granularity::Week => {
                let back = (7 + date.weekday().num_days_from_monday()
                    - week_start.num_days_from_monday())
                    % 7;
                midnight(date - Days::new(u64::from(back)))
            }
            Granularity::Month => midnight(date - Days::new(u64::from(date.day0()))),
        }
    }

    /// Next boundary after `ts`. Month steps follow the calendar, never a fixed 30 days.
    pub fn step(self, ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Granularity::Hour => ts.checked_add_signed(TimeDelta::hours(1)),
            Granularity::Day => ts.checked_add_signed(TimeDelta::days(1)),
            Granularity::Week => ts.checked_add_signed(TimeDelta::weeks(1)),
            Granularity::Month => ts.checked_add_months(Months::new(1)),
        }
    }
}

pub fn parse_weekday(s: &str) -> Result<Weekday, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Mon),
        "sunday" | "sun" => Ok(Weekday::Sun),
        other => Err(format!(
            "unsupported week start '{}', expected monday or sunday",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn truncates_to_each_unit() {
        // Wednesday
        let ts = at(2025, 3, 12, 14, 37);
        assert_eq!(Granularity::Hour.truncate(ts, Weekday::Mon), at(2025, 3, 12, 14, 0));
        assert_eq!(Granularity::Day.truncate(ts, Weekday::Mon), at(2025, 3, 12, 0, 0));
        assert_eq!(Granularity::Week.truncate(ts, Weekday::Mon), at(2025, 3, 10, 0, 0));
        assert_eq!(Granularity::Week.truncate(ts, Weekday::Sun), at(2025, 3, 9, 0, 0));
        assert_eq!(Granularity::Month.truncate(ts, Weekday::Mon), at(2025, 3, 1, 0, 0));
    }

    #[test]
    fn week_truncation_on_the_start_day_is_identity() {
        let monday = at(2025, 3, 10, 0, 0);
        assert_eq!(Granularity::Week.truncate(monday, Weekday::Mon), monday);
        let sunday = at(2025, 3, 9, 23, 59);
        assert_eq!(Granularity::Week.truncate(sunday, Weekday::Mon), at(2025, 3, 3, 0, 0));
    }

    #[test]
    fn month_lookback_clamps_to_shorter_months() {
        let now = at(2025, 3, 31, 12, 0);
        assert_eq!(TimeFrame::Month.lookback_start(now), Some(at(2025, 2, 28, 12, 0)));
        assert_eq!(TimeFrame::Year.lookback_start(now), Some(at(2024, 3, 31, 12, 0)));
    }

    #[test]
    fn month_step_lands_on_the_first() {
        let jan = at(2025, 1, 1, 0, 0);
        let feb = Granularity::Month.step(jan).unwrap();
        let mar = Granularity::Month.step(feb).unwrap();
        assert_eq!(feb, at(2025, 2, 1, 0, 0));
        assert_eq!(mar, at(2025, 3, 1, 0, 0));
    }

    #[test]
    fn parses_labels_and_names() {
        for frame in TimeFrame::ALL {
            assert_eq!(frame.label().parse::<TimeFrame>().unwrap(), frame);
        }
        assert_eq!("six_months".parse::<TimeFrame>().unwrap(), TimeFrame::SixMonths);
        assert!("fortnight".parse::<TimeFrame>().is_err());
    }

    #[test]
    fn labels_follow_the_frame() {
        let ts = at(2025, 3, 12, 14, 0);
        assert_eq!(TimeFrame::Day.format_label(ts), "2 PM");
        assert_eq!(TimeFrame::Week.format_label(ts), "Mar 12");
        assert_eq!(TimeFrame::Year.format_label(ts), "Mar 2025");
    }
}
