//! Transaction history operations

use bigdecimal::BigDecimal;

use crate::traits::TransactionLog;
use crate::types::*;

/// Manager for the append-only transaction history of accounts
pub struct TransactionManager<S: TransactionLog> {
    log: S,
}

impl<S: TransactionLog> TransactionManager<S> {
    /// Create a new transaction manager
    pub fn new(log: S) -> Self {
        Self { log }
    }

    /// Record a committed balance mutation
    pub(crate) async fn record(
        &self,
        account_number: &str,
        kind: TransactionKind,
        amount: &BigDecimal,
        balance_after: &BigDecimal,
        description: Option<String>,
    ) -> LedgerResult<Transaction> {
        self.log
            .append(account_number, kind, amount, balance_after, description)
            .await
    }

    /// List up to `take` transactions for an account, most recent first
    pub async fn list(&self, account_number: &str, take: usize) -> LedgerResult<Vec<Transaction>> {
        self.log.list(account_number, take).await
    }

    /// Discard the whole history of an account (cascade on delete)
    pub(crate) async fn purge(&self, account_number: &str) -> LedgerResult<()> {
        self.log.purge(account_number).await
    }
}
