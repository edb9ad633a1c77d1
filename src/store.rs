// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where transactions come from and go to.
//!
//! Reports only ever see a snapshot handed over by a [`TransactionStore`]; they
//! never talk to the backend themselves.

use rusqlite::{Connection, ErrorCode, params};
use uuid::Uuid;

use crate::error::{StoreError, ValidationError};
use crate::models::Transaction;
use crate::utils::{check_value, parse_timestamp, parse_value};

pub trait TransactionStore {
    /// Every transaction owned by `user_id`, oldest first.
    fn fetch_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, StoreError>;

    fn create_transaction(&self, tx: Transaction) -> Result<Transaction, StoreError>;
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        SqliteStore { conn }
    }
}

/// Raw column text, as stored. Used by the row decoder and by `doctor`.
#[derive(Debug, Clone)]
pub struct StoredRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category: String,
    pub value: String,
    pub date: String,
}

impl StoredRow {
    pub fn decode(&self) -> Result<Transaction, ValidationError> {
        let id = Uuid::parse_str(&self.id).map_err(|_| ValidationError::Id(self.id.clone()))?;
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::UserId);
        }
        Ok(Transaction {
            id,
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            value: parse_value(&self.value)?,
            date: parse_timestamp(&self.date)?,
        })
    }
}

/// All stored rows without decoding, optionally narrowed to one user.
pub fn raw_rows(conn: &Connection, user_id: Option<&str>) -> Result<Vec<StoredRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, category, value, date FROM transactions
         WHERE ?1 IS NULL OR user_id=?1
         ORDER BY date, id",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok(StoredRow {
            id: r.get(0)?,
            user_id: r.get(1)?,
            name: r.get(2)?,
            category: r.get(3)?,
            value: r.get(4)?,
            date: r.get(5)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

impl TransactionStore for SqliteStore<'_> {
    fn fetch_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, StoreError> {
        let rows = raw_rows(self.conn, Some(user_id))?;
        tracing::debug!(user = user_id, rows = rows.len(), "fetched transactions");
        rows.iter()
            .map(|row| {
                row.decode().map_err(|source| StoreError::Invalid {
                    id: row.id.clone(),
                    source,
                })
            })
            .collect()
    }

    fn create_transaction(&self, tx: Transaction) -> Result<Transaction, StoreError> {
        if tx.user_id.trim().is_empty() {
            return Err(StoreError::Invalid {
                id: tx.id.to_string(),
                source: ValidationError::UserId,
            });
        }
        if let Err(source) = check_value(tx.value) {
            return Err(StoreError::Invalid {
                id: tx.id.to_string(),
                source,
            });
        }
        let res = self.conn.execute(
            "INSERT INTO transactions(id, user_id, name, category, value, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                tx.id.to_string(),
                tx.user_id,
                tx.name,
                tx.category,
                tx.value.to_string(),
                tx.date.to_rfc3339(),
            ],
        );
        match res {
            Ok(_) => {
                tracing::info!(id = %tx.id, user = %tx.user_id, category = %tx.category, "created transaction");
                Ok(tx)
            }
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                tracing::warn!(id = %tx.id, "duplicate transaction id rejected");
                Err(StoreError::DuplicateId(tx.id))
            }
            Err(e) => Err(e.into()),
        }
    }
}
