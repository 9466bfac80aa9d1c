//! Read-only ad hoc queries, used by the assistant proxy.
//!
//! Callers are responsible for vetting the statement first. The statement
//! still runs with `PRAGMA query_only` on, so a write that slips past the
//! caller's check fails in SQLite instead of changing data.

use serde_json::{Map, Value};

use crate::TdahConn;
use crate::error::DatabaseError;
use crate::helpers::value_to_json;

impl TdahConn {
    /// Run `sql` in `query_only` mode and return every row as a JSON object
    /// keyed by column name. The connection is writable again afterwards.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails or tries to write.
    pub async fn query_json_rows(&self, sql: &str) -> Result<Vec<Map<String, Value>>, DatabaseError> {
        self.conn().execute("PRAGMA query_only = ON", ()).await?;
        let result = self.collect_json_rows(sql).await;
        if let Err(e) = self.conn().execute("PRAGMA query_only = OFF", ()).await {
            tracing::warn!(error = %e, "failed to clear query_only");
        }
        result
    }

    async fn collect_json_rows(&self, sql: &str) -> Result<Vec<Map<String, Value>>, DatabaseError> {
        let mut rows = self.conn().query(sql, ()).await?;

        let columns: Vec<String> = (0..rows.column_count())
            .map(|idx| {
                rows.column_name(idx)
                    .map_or_else(|| format!("column_{idx}"), str::to_string)
            })
            .collect();

        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            let mut object = Map::with_capacity(columns.len());
            for (idx, name) in (0_i32..).zip(&columns) {
                object.insert(name.clone(), value_to_json(row.get_value(idx)?));
            }
            out.push(object);
        }
        Ok(out)
    }
}
