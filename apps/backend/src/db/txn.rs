use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::deadline::bounded;
use super::txn_policy;
use crate::error::AppError;
use crate::errors::domain::StorageOp;
use crate::infra::db_errors::map_db_err;
use crate::state::app_state::AppState;

/// Future returned by a [`with_txn`] body; it may borrow the transaction.
pub type TxnFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + 'c>>;

/// Execute a function within a database transaction.
///
/// Begins a transaction on `state.db`, runs `f`, then applies the process
/// transaction policy on `Ok` and rolls back on `Err`. Begin and commit are
/// bounded by the configured storage timeout.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R>,
{
    let limit = state.storage_timeout;

    let txn = bounded(limit, StorageOp::Read, "Failed to begin transaction", async {
        state.db.begin().await.map_err(|e| map_db_err(e, StorageOp::Read))
    })
    .await?;

    let out = f(&txn).await;

    match out {
        Ok(val) => {
            match txn_policy::current() {
                txn_policy::TxnPolicy::CommitOnOk => {
                    bounded(limit, StorageOp::Write, "Failed to commit", async {
                        txn.commit().await.map_err(|e| map_db_err(e, StorageOp::Write))
                    })
                    .await?;
                }
                txn_policy::TxnPolicy::RollbackOnOk => {
                    txn.rollback()
                        .await
                        .map_err(|e| map_db_err(e, StorageOp::Write))?;
                }
            }
            Ok(val)
        }
        Err(err) => {
            // Preserve the original error; a failed rollback is only logged.
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "Rollback after failed transaction body failed");
            }
            Err(err)
        }
    }
}
