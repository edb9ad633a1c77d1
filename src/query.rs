// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Stateless request/response surface over the aggregator and bucketer.
//!
//! Requests carry their own transaction snapshot. Records are validated here,
//! before any arithmetic, and the first bad one fails the whole request. A
//! record without `user_id` belongs to the request's `user_id`; with neither,
//! it is rejected.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::aggregator::{self, Summary};
use crate::bucketer::Bucketer;
use crate::error::{QueryError, ValidationError};
use crate::models::{Bucket, Transaction};
use crate::timeframe::TimeFrame;
use crate::utils::{parse_timestamp, parse_value, value_from_f64};

const DEFAULT_TOP: usize = 2;

/// A transaction as it arrives over the wire, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub value: Value,
    pub date: String,
}

impl RawTransaction {
    /// `owner` is the request-level user applied when the record names none.
    pub fn validate(&self, owner: Option<&str>) -> Result<Transaction, ValidationError> {
        let id = match &self.id {
            Some(s) => Uuid::parse_str(s.trim()).map_err(|_| ValidationError::Id(s.clone()))?,
            None => Uuid::new_v4(),
        };
        let user_id = match self.user_id.as_deref().or(owner).map(str::trim) {
            Some(u) if !u.is_empty() => u.to_string(),
            _ => return Err(ValidationError::UserId),
        };
        let value = match &self.value {
            Value::String(s) => parse_value(s)?,
            // Decimal text of the number keeps 0.1 as exactly 0.1
            Value::Number(n) => match parse_value(&n.to_string()) {
                Ok(d) => d,
                Err(_) => value_from_f64(n.as_f64().unwrap_or(f64::NAN))?,
            },
            other => return Err(ValidationError::Value(other.to_string())),
        };
        Ok(Transaction {
            id,
            user_id,
            name: self.name.clone(),
            category: self.category.clone(),
            value,
            date: parse_timestamp(&self.date)?,
        })
    }
}

pub fn validate_all(
    raw: &[RawTransaction],
    owner: Option<&str>,
) -> Result<Vec<Transaction>, QueryError> {
    raw.iter()
        .enumerate()
        .map(|(index, r)| {
            r.validate(owner).map_err(|source| {
                tracing::warn!(index, field = source.field(), "rejected transaction");
                QueryError::Invalid { index, source }
            })
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub transactions: Vec<RawTransaction>,
    pub time_frame: TimeFrame,
    pub now: DateTime<Utc>,
    #[serde(default)]
    pub week_start: Option<Weekday>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesResponse {
    pub time_frame: TimeFrame,
    pub window_start: Option<DateTime<Utc>>,
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub transactions: Vec<RawTransaction>,
    #[serde(default)]
    pub top: Option<usize>,
}

pub fn series(req: &SeriesRequest) -> Result<SeriesResponse, QueryError> {
    let txs = validate_all(&req.transactions, req.user_id.as_deref())?;
    let bucketer = Bucketer::new(req.week_start.unwrap_or(Weekday::Mon));
    Ok(SeriesResponse {
        time_frame: req.time_frame,
        window_start: req.time_frame.lookback_start(req.now),
        buckets: bucketer.bucket(&txs, req.time_frame, req.now),
    })
}

pub fn summary(req: &SummaryRequest) -> Result<Summary, QueryError> {
    let txs = validate_all(&req.transactions, req.user_id.as_deref())?;
    Ok(aggregator::summarize(&txs, req.top.unwrap_or(DEFAULT_TOP)))
}

pub fn series_from_json(body: &str) -> Result<SeriesResponse, QueryError> {
    let req: SeriesRequest = serde_json::from_str(body)?;
    series(&req)
}

pub fn summary_from_json(body: &str) -> Result<Summary, QueryError> {
    let req: SummaryRequest = serde_json::from_str(body)?;
    summary(&req)
}
