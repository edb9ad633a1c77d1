// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;
use uuid::Uuid;

/// Rejected input, tagged with the field that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid value '{0}': expected a finite decimal amount of at most 10^15 in magnitude")]
    Value(String),
    #[error("invalid date '{0}': expected RFC 3339, 'YYYY-MM-DD HH:MM' or 'YYYY-MM-DD'")]
    Date(String),
    #[error("user id must not be empty")]
    UserId,
    #[error("invalid transaction id '{0}'")]
    Id(String),
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Value(_) => "value",
            ValidationError::Date(_) => "date",
            ValidationError::UserId => "user_id",
            ValidationError::Id(_) => "id",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("transaction {0} already exists")]
    DuplicateId(Uuid),
    #[error("stored transaction {id} is invalid: {source}")]
    Invalid {
        id: String,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("transaction #{index} has an invalid {}: {source}", .source.field())]
    Invalid {
        index: usize,
        #[source]
        source: ValidationError,
    },
}
