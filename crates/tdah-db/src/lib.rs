//! # tdah-db
//!
//! libSQL storage for SMART-TDAH: principals, students, ownership links and
//! exercise records.
//!
//! [`TdahDb`] is the shared handle. Each request calls [`TdahDb::acquire`]
//! and works through the returned [`TdahConn`] guard; repository methods are
//! implemented as `impl TdahConn` blocks under [`repos`]. The guard is
//! released when dropped, so every exit path gives the connection back.
//!
//! Databases must live in a file. Every libSQL connection to `":memory:"`
//! sees its own private database.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
mod transaction;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use error::DatabaseError;
use libsql::Builder;

/// Milliseconds a connection waits on a locked database before failing.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Default)]
struct ConnectionStats {
    opened: AtomicU64,
    in_use: AtomicU64,
}

/// Shared database handle. Cheap to share behind an `Arc`.
pub struct TdahDb {
    db: libsql::Database,
    stats: Arc<ConnectionStats>,
}

impl TdahDb {
    /// Open a local database file, creating it if needed.
    ///
    /// Switches the file to WAL mode and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let tdah_db = Self {
            db,
            stats: Arc::new(ConnectionStats::default()),
        };

        let conn = tdah_db.acquire().await?;
        conn.conn()
            .execute_batch("PRAGMA journal_mode = WAL;")
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA journal_mode: {e}")))?;
        conn.run_migrations().await?;
        tracing::debug!(path, "database ready");

        Ok(tdah_db)
    }

    /// Open a fresh connection for one unit of work.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be opened or
    /// configured.
    pub async fn acquire(&self) -> Result<TdahConn, DatabaseError> {
        let conn = self.db.connect()?;
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        self.stats.in_use.fetch_add(1, Ordering::SeqCst);
        let guard = TdahConn {
            conn,
            stats: Arc::clone(&self.stats),
        };

        // Foreign keys are per-connection in SQLite.
        guard
            .conn
            .execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("PRAGMA foreign_keys: {e}")))?;
        guard
            .conn
            .execute_batch(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
            .await
            .map_err(|e| DatabaseError::Query(format!("PRAGMA busy_timeout: {e}")))?;

        Ok(guard)
    }

    /// Connections opened since this handle was created.
    #[must_use]
    pub fn connections_opened(&self) -> u64 {
        self.stats.opened.load(Ordering::SeqCst)
    }

    /// Connections currently held by a [`TdahConn`].
    #[must_use]
    pub fn connections_in_use(&self) -> u64 {
        self.stats.in_use.load(Ordering::SeqCst)
    }
}

/// A connection checked out of [`TdahDb`].
pub struct TdahConn {
    conn: libsql::Connection,
    stats: Arc<ConnectionStats>,
}

impl TdahConn {
    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Current database time, `YYYY-MM-DD HH:MM:SS` in UTC.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn server_time(&self) -> Result<String, DatabaseError> {
        let mut rows = self.conn.query("SELECT datetime('now')", ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

impl Drop for TdahConn {
    fn drop(&mut self) {
        self.stats.in_use.fetch_sub(1, Ordering::SeqCst);
    }
}
