// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::utils::{parse_timestamp, parse_value};

/// A single income (positive) or expense (negative) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub category: String,
    pub value: Decimal,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        value: Decimal,
        date: DateTime<Utc>,
    ) -> Self {
        Transaction {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            name: name.into(),
            category: category.into(),
            value,
            date,
        }
    }

    /// Builds a transaction from raw form/CSV text, failing on the first bad field.
    pub fn parse(
        user_id: &str,
        name: &str,
        category: &str,
        value: &str,
        date: &str,
    ) -> Result<Self, ValidationError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ValidationError::UserId);
        }
        let value = parse_value(value)?;
        let date = parse_timestamp(date)?;
        Ok(Transaction::new(
            user_id,
            name.trim(),
            category.trim(),
            value,
            date,
        ))
    }

    pub fn is_expense(&self) -> bool {
        self.value < Decimal::ZERO
    }

    pub fn is_income(&self) -> bool {
        self.value > Decimal::ZERO
    }
}

/// One point of a charted series. Derived per query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub start: DateTime<Utc>,
    pub total: Decimal,
}
