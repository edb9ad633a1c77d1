// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Zero-filled, time-bucketed sums for charting.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc, Weekday};
use rust_decimal::Decimal;

use crate::models::{Bucket, Transaction};
use crate::timeframe::TimeFrame;

/// Buckets with the default (Monday) week start.
pub fn bucket(transactions: &[Transaction], frame: TimeFrame, now: DateTime<Utc>) -> Vec<Bucket> {
    Bucketer::default().bucket(transactions, frame, now)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucketer {
    week_start: Weekday,
}

impl Default for Bucketer {
    fn default() -> Self {
        Bucketer {
            week_start: Weekday::Mon,
        }
    }
}

impl Bucketer {
    pub fn new(week_start: Weekday) -> Self {
        Bucketer { week_start }
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Chronological series covering every boundary from the window start
    /// through `now`. Empty buckets carry a zero total.
    pub fn bucket(
        &self,
        transactions: &[Transaction],
        frame: TimeFrame,
        now: DateTime<Utc>,
    ) -> Vec<Bucket> {
        let Some(window_start) = frame.lookback_start(now) else {
            return Vec::new();
        };
        if now < window_start {
            return Vec::new();
        }
        let granularity = frame.granularity();

        let mut totals: BTreeMap<DateTime<Utc>, Decimal> = BTreeMap::new();
        for tx in transactions.iter().filter(|t| t.date >= window_start) {
            let key = granularity.truncate(tx.date, self.week_start);
            let total = totals.entry(key).or_insert(Decimal::ZERO);
            *total = total.saturating_add(tx.value);
        }

        for key in self.boundaries(frame, now) {
            totals.entry(key).or_insert(Decimal::ZERO);
        }

        totals
            .into_iter()
            .map(|(start, total)| Bucket { start, total })
            .collect()
    }

    /// Bucket starts from the truncated window start up to and including `now`.
    pub fn boundaries(&self, frame: TimeFrame, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let Some(window_start) = frame.lookback_start(now) else {
            return Vec::new();
        };
        let granularity = frame.granularity();
        let mut out = Vec::new();
        let mut current = Some(granularity.truncate(window_start, self.week_start));
        while let Some(ts) = current {
            if ts > now {
                break;
            }
            out.push(ts);
            current = granularity.step(ts);
        }
        out
    }
}
