//! Main ledger orchestrator that coordinates accounts and transactions

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use bigdecimal::BigDecimal;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::ledger::{AccountManager, TransactionManager};
use crate::traits::{AccountStore, TransactionLog};
use crate::types::*;
use crate::utils::validation;

/// Maximum number of read-compute-write cycles attempted when a
/// compare-and-swap loses a race before the operation gives up with
/// `ConcurrencyConflict`.
const BALANCE_RETRY_LIMIT: u32 = 5;

/// Registry of per-account mutexes serializing balance mutations
///
/// Holding an account's mutex makes the read-validate-write-append unit
/// indivisible relative to every other ledger operation on that account,
/// including deletion.
#[derive(Default)]
struct AccountLocks {
    inner: StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl AccountLocks {
    fn guard(&self, number: &str) -> Arc<AsyncMutex<()>> {
        let mut map = self.inner.lock().unwrap();
        map.entry(number.to_string()).or_default().clone()
    }

    fn forget(&self, number: &str) {
        self.inner.lock().unwrap().remove(number);
    }
}

/// Main ledger service that orchestrates all banking operations
///
/// Balance mutations are race-free under arbitrary interleaving: each
/// operation serializes on its account's mutex and commits the new balance
/// through the store's compare-and-swap, retrying the whole cycle when a
/// writer outside this service instance got there first. A transaction is
/// appended only for the attempt that actually committed.
pub struct Ledger<S: AccountStore + TransactionLog> {
    account_manager: AccountManager<S>,
    transaction_manager: TransactionManager<S>,
    locks: AccountLocks,
}

impl<S: AccountStore + TransactionLog + Clone> Ledger<S> {
    /// Create a new ledger with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            account_manager: AccountManager::new(storage.clone()),
            transaction_manager: TransactionManager::new(storage),
            locks: AccountLocks::default(),
        }
    }

    // Account operations

    /// Open a new account
    pub async fn open_account(
        &self,
        number: String,
        account_type: AccountType,
        owner_id: Uuid,
        opening_balance: BigDecimal,
    ) -> LedgerResult<Account> {
        let account = self
            .account_manager
            .open_account(number, account_type, owner_id, opening_balance)
            .await?;
        debug!(account = %account.number, "account opened");
        Ok(account)
    }

    /// Get an account by number
    pub async fn get_account(&self, number: &str) -> LedgerResult<Account> {
        self.account_manager.get_account_required(number).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.account_manager.list_accounts().await
    }

    /// Change the type tag of an existing account
    pub async fn update_account_type(
        &self,
        number: &str,
        account_type: AccountType,
    ) -> LedgerResult<()> {
        self.account_manager
            .update_account_type(number, account_type)
            .await
    }

    /// Delete an account and its entire transaction history
    ///
    /// Serialized on the same per-account mutex as balance mutations, so an
    /// in-flight deposit or withdrawal can never append to an account that
    /// is being removed. Deletion is allowed regardless of the remaining
    /// balance and cascades to the transaction log.
    pub async fn delete_account(&self, number: &str) -> LedgerResult<()> {
        let lock = self.locks.guard(number);
        let _serial = lock.lock().await;

        self.account_manager.delete_account(number).await?;
        self.transaction_manager.purge(number).await?;
        self.locks.forget(number);
        debug!(account = number, "account deleted, history purged");
        Ok(())
    }

    // Balance mutations

    /// Deposit a positive amount into an account
    pub async fn deposit(
        &self,
        number: &str,
        amount: BigDecimal,
        description: Option<String>,
    ) -> LedgerResult<Transaction> {
        validation::validate_positive_amount(&amount)?;

        let lock = self.locks.guard(number);
        let _serial = lock.lock().await;

        for attempt in 0..BALANCE_RETRY_LIMIT {
            let account = self.account_manager.get_account_required(number).await?;
            let new_balance = &account.balance + &amount;

            if self
                .account_manager
                .swap_balance(number, &account.balance, &new_balance)
                .await?
            {
                debug!(account = number, balance = %new_balance, "deposit committed");
                return self
                    .transaction_manager
                    .record(
                        number,
                        TransactionKind::Deposit,
                        &amount,
                        &new_balance,
                        description.clone(),
                    )
                    .await;
            }

            warn!(account = number, attempt, "deposit lost balance race, retrying");
        }

        Err(LedgerError::ConcurrencyConflict(number.to_string()))
    }

    /// Withdraw a positive amount from an account
    ///
    /// The sufficiency check runs against the freshly read balance on every
    /// retry: a withdrawal that lost its race to a concurrent debit fails
    /// with `InsufficientFunds` instead of overdrawing.
    pub async fn withdraw(
        &self,
        number: &str,
        amount: BigDecimal,
        description: Option<String>,
    ) -> LedgerResult<Transaction> {
        validation::validate_positive_amount(&amount)?;

        let lock = self.locks.guard(number);
        let _serial = lock.lock().await;

        for attempt in 0..BALANCE_RETRY_LIMIT {
            let account = self.account_manager.get_account_required(number).await?;

            if account.balance < amount {
                return Err(LedgerError::InsufficientFunds(number.to_string()));
            }

            let new_balance = &account.balance - &amount;

            if self
                .account_manager
                .swap_balance(number, &account.balance, &new_balance)
                .await?
            {
                debug!(account = number, balance = %new_balance, "withdrawal committed");
                return self
                    .transaction_manager
                    .record(
                        number,
                        TransactionKind::Withdrawal,
                        &amount,
                        &new_balance,
                        description.clone(),
                    )
                    .await;
            }

            warn!(account = number, attempt, "withdrawal lost balance race, retrying");
        }

        Err(LedgerError::ConcurrencyConflict(number.to_string()))
    }

    /// Move funds between two accounts, committing both legs or neither
    ///
    /// Locks are acquired in account-number order, so two opposing
    /// transfers cannot deadlock. The source leg is recorded as a
    /// withdrawal and the destination leg as a deposit.
    pub async fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: BigDecimal,
        description: Option<String>,
    ) -> LedgerResult<(Transaction, Transaction)> {
        validation::validate_positive_amount(&amount)?;

        if from == to {
            return Err(LedgerError::Validation(
                "transfer requires two distinct accounts".to_string(),
            ));
        }

        let (first, second) = if from < to { (from, to) } else { (to, from) };
        let first_lock = self.locks.guard(first);
        let second_lock = self.locks.guard(second);
        let _first = first_lock.lock().await;
        let _second = second_lock.lock().await;

        for attempt in 0..BALANCE_RETRY_LIMIT {
            let source = self.account_manager.get_account_required(from).await?;
            let dest = self.account_manager.get_account_required(to).await?;

            if source.balance < amount {
                return Err(LedgerError::InsufficientFunds(from.to_string()));
            }

            let new_source = &source.balance - &amount;
            let new_dest = &dest.balance + &amount;

            if !self
                .account_manager
                .swap_balance(from, &source.balance, &new_source)
                .await?
            {
                warn!(account = from, attempt, "transfer source lost balance race, retrying");
                continue;
            }

            if self
                .account_manager
                .swap_balance(to, &dest.balance, &new_dest)
                .await?
            {
                let debit = self
                    .transaction_manager
                    .record(
                        from,
                        TransactionKind::Withdrawal,
                        &amount,
                        &new_source,
                        description.clone(),
                    )
                    .await?;
                let credit = self
                    .transaction_manager
                    .record(
                        to,
                        TransactionKind::Deposit,
                        &amount,
                        &new_dest,
                        description.clone(),
                    )
                    .await?;
                debug!(from, to, "transfer committed");
                return Ok((debit, credit));
            }

            // Destination lost its race after the source already committed;
            // restore the source balance so neither leg is visible, then
            // retry the whole cycle.
            if !self
                .account_manager
                .swap_balance(from, &new_source, &source.balance)
                .await?
            {
                return Err(LedgerError::ConcurrencyConflict(from.to_string()));
            }

            warn!(account = to, attempt, "transfer destination lost balance race, retrying");
        }

        Err(LedgerError::ConcurrencyConflict(to.to_string()))
    }

    // History

    /// List up to `take` transactions for an account, most recent first
    ///
    /// Fails with `AccountNotFound` when the account does not exist (or was
    /// deleted, which also discarded its history).
    pub async fn get_transactions(
        &self,
        number: &str,
        take: usize,
    ) -> LedgerResult<Vec<Transaction>> {
        self.account_manager.get_account_required(number).await?;
        self.transaction_manager.list(number, take).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_store::MemoryStore;

    #[tokio::test]
    async fn test_ledger_basic_operations() {
        let storage = MemoryStore::new();
        let ledger = Ledger::new(storage);
        let owner = Uuid::new_v4();

        let account = ledger
            .open_account(
                "ACC1".to_string(),
                AccountType::Checking,
                owner,
                BigDecimal::from(0),
            )
            .await
            .unwrap();
        assert_eq!(account.balance, BigDecimal::from(0));

        let deposit = ledger
            .deposit("ACC1", BigDecimal::from(100), Some("payday".to_string()))
            .await
            .unwrap();
        assert_eq!(deposit.balance_after, BigDecimal::from(100));
        assert_eq!(deposit.sequence, 1);

        let withdrawal = ledger
            .withdraw("ACC1", BigDecimal::from(40), None)
            .await
            .unwrap();
        assert_eq!(withdrawal.balance_after, BigDecimal::from(60));
        assert_eq!(withdrawal.sequence, 2);

        let account = ledger.get_account("ACC1").await.unwrap();
        assert_eq!(account.balance, BigDecimal::from(60));

        let history = ledger.get_transactions("ACC1", 10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind, TransactionKind::Withdrawal);
        assert_eq!(history[1].kind, TransactionKind::Deposit);
    }

    #[tokio::test]
    async fn test_withdrawal_requires_sufficient_funds() {
        let ledger = Ledger::new(MemoryStore::new());

        ledger
            .open_account(
                "ACC1".to_string(),
                AccountType::Savings,
                Uuid::new_v4(),
                BigDecimal::from(100),
            )
            .await
            .unwrap();

        let err = ledger
            .withdraw("ACC1", BigDecimal::from(150), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds(_)));

        // failed withdrawal leaves no trace
        let account = ledger.get_account("ACC1").await.unwrap();
        assert_eq!(account.balance, BigDecimal::from(100));
        assert!(ledger.get_transactions("ACC1", 10).await.unwrap().is_empty());
    }
}
