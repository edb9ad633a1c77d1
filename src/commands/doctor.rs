// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::raw_rows;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// One row per stored record that would be refused at the boundary today.
pub fn issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    for row in raw_rows(conn, None)? {
        if let Err(e) = row.decode() {
            rows.push(vec![
                format!("invalid_{}", e.field()),
                row.id.clone(),
                e.to_string(),
            ]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        tracing::warn!(count = rows.len(), "stored transactions failed validation");
        println!("{}", pretty_table(&["Issue", "Transaction", "Detail"], rows));
    }
    Ok(())
}
