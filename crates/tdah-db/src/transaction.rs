use std::future::Future;

use crate::TdahConn;
use crate::error::DatabaseError;

impl TdahConn {
    /// Run `work` inside one transaction on this connection.
    ///
    /// `work` receives a handle to the same connection. The transaction is
    /// committed when `work` returns `Ok` and rolled back when it returns
    /// `Err`; the error from `work` is returned either way.
    ///
    /// # Errors
    ///
    /// Returns the error from `work`, or `DatabaseError` if the transaction
    /// cannot begin or commit.
    pub async fn with_transaction<T, F, Fut>(&self, work: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(libsql::Connection) -> Fut,
        Fut: Future<Output = Result<T, DatabaseError>>,
    {
        let tx = self.conn().transaction().await?;
        match work(self.conn().clone()).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
