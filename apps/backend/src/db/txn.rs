use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::debug;

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future borrowed from the transaction handed to a [`with_txn`] closure.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + 'a>>;

/// Execute `f` inside a fresh database transaction.
///
/// On `Ok` the transaction is committed (or rolled back under
/// [`txn_policy::TxnPolicy::RollbackOnOk`]); on `Err` it is rolled back and the
/// original error is returned.
///
/// ```ignore
/// let user = with_txn(&state, move |txn| {
///     Box::pin(async move { Ok(users::find_by_id(txn, id).await?) })
/// })
/// .await?;
/// ```
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; the closure's error wins.
            if let Err(rollback_err) = txn.rollback().await {
                debug!(error = %rollback_err, "rollback after failed transaction also failed");
            }
            Err(err)
        }
    }
}
