//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory backend implementing both [`AccountStore`] and
/// [`TransactionLog`] behind one shared state, so account rows and their
/// transaction rows live in the same consistency domain.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    transactions: Arc<RwLock<HashMap<String, Vec<Transaction>>>>,
}

impl MemoryStore {
    /// Create a new memory store instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.accounts.write().unwrap().clear();
        self.transactions.write().unwrap().clear();
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create(&self, account: &Account) -> LedgerResult<()> {
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(&account.number) {
            return Err(LedgerError::DuplicateAccountNumber(account.number.clone()));
        }
        accounts.insert(account.number.clone(), account.clone());
        Ok(())
    }

    async fn get(&self, number: &str) -> LedgerResult<Option<Account>> {
        Ok(self.accounts.read().unwrap().get(number).cloned())
    }

    async fn list(&self) -> LedgerResult<Vec<Account>> {
        Ok(self.accounts.read().unwrap().values().cloned().collect())
    }

    async fn update_type(&self, number: &str, account_type: AccountType) -> LedgerResult<()> {
        let mut accounts = self.accounts.write().unwrap();
        match accounts.get_mut(number) {
            Some(account) => {
                account.account_type = account_type;
                account.updated_at = chrono::Utc::now().naive_utc();
                Ok(())
            }
            None => Err(LedgerError::AccountNotFound(number.to_string())),
        }
    }

    async fn delete(&self, number: &str) -> LedgerResult<()> {
        if self.accounts.write().unwrap().remove(number).is_some() {
            Ok(())
        } else {
            Err(LedgerError::AccountNotFound(number.to_string()))
        }
    }

    async fn compare_and_swap_balance(
        &self,
        number: &str,
        expected: &BigDecimal,
        new: &BigDecimal,
    ) -> LedgerResult<bool> {
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))?;

        if account.balance != *expected {
            return Ok(false);
        }

        account.balance = new.clone();
        account.updated_at = chrono::Utc::now().naive_utc();
        Ok(true)
    }
}

#[async_trait]
impl TransactionLog for MemoryStore {
    async fn append(
        &self,
        account_number: &str,
        kind: TransactionKind,
        amount: &BigDecimal,
        balance_after: &BigDecimal,
        description: Option<String>,
    ) -> LedgerResult<Transaction> {
        let mut transactions = self.transactions.write().unwrap();
        let entries = transactions.entry(account_number.to_string()).or_default();

        // entries are never removed individually, so the length tracks the
        // highest assigned sequence number
        let transaction = Transaction {
            sequence: entries.len() as u64 + 1,
            account_number: account_number.to_string(),
            timestamp: chrono::Utc::now().naive_utc(),
            kind,
            amount: amount.clone(),
            balance_after: balance_after.clone(),
            description,
        };
        entries.push(transaction.clone());
        Ok(transaction)
    }

    async fn list(&self, account_number: &str, take: usize) -> LedgerResult<Vec<Transaction>> {
        let transactions = self.transactions.read().unwrap();
        let mut entries = transactions
            .get(account_number)
            .cloned()
            .unwrap_or_default();

        entries.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then(b.sequence.cmp(&a.sequence))
        });
        entries.truncate(take);
        Ok(entries)
    }

    async fn purge(&self, account_number: &str) -> LedgerResult<()> {
        self.transactions.write().unwrap().remove(account_number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn account(number: &str, balance: i64) -> Account {
        Account::new(
            number.to_string(),
            AccountType::Checking,
            Uuid::new_v4(),
            BigDecimal::from(balance),
        )
    }

    #[tokio::test]
    async fn create_enforces_unique_numbers() {
        let store = MemoryStore::new();
        store.create(&account("A1", 10)).await.unwrap();

        let err = store.create(&account("A1", 99)).await.unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateAccountNumber(_)));

        // the first record is untouched
        let kept = store.get("A1").await.unwrap().unwrap();
        assert_eq!(kept.balance, BigDecimal::from(10));
    }

    #[tokio::test]
    async fn compare_and_swap_only_commits_on_expected_balance() {
        let store = MemoryStore::new();
        store.create(&account("A1", 100)).await.unwrap();

        let swapped = store
            .compare_and_swap_balance("A1", &BigDecimal::from(100), &BigDecimal::from(150))
            .await
            .unwrap();
        assert!(swapped);

        // stale expectation loses
        let swapped = store
            .compare_and_swap_balance("A1", &BigDecimal::from(100), &BigDecimal::from(200))
            .await
            .unwrap();
        assert!(!swapped);
        assert_eq!(
            store.get("A1").await.unwrap().unwrap().balance,
            BigDecimal::from(150)
        );

        let err = store
            .compare_and_swap_balance("missing", &BigDecimal::from(0), &BigDecimal::from(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound(_)));
    }

    #[tokio::test]
    async fn append_assigns_sequence_numbers_per_account() {
        let store = MemoryStore::new();

        for i in 1..=3u64 {
            let tx = store
                .append(
                    "A1",
                    TransactionKind::Deposit,
                    &BigDecimal::from(5),
                    &BigDecimal::from(5 * i as i64),
                    None,
                )
                .await
                .unwrap();
            assert_eq!(tx.sequence, i);
        }

        let other = store
            .append(
                "A2",
                TransactionKind::Deposit,
                &BigDecimal::from(1),
                &BigDecimal::from(1),
                None,
            )
            .await
            .unwrap();
        assert_eq!(other.sequence, 1);
    }

    #[tokio::test]
    async fn list_is_most_recent_first_and_bounded() {
        let store = MemoryStore::new();
        for i in 1..=5i64 {
            store
                .append(
                    "A1",
                    TransactionKind::Deposit,
                    &BigDecimal::from(i),
                    &BigDecimal::from(i),
                    None,
                )
                .await
                .unwrap();
        }

        let listed = TransactionLog::list(&store, "A1", 3).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].sequence, 5);
        assert_eq!(listed[1].sequence, 4);
        assert_eq!(listed[2].sequence, 3);

        assert!(TransactionLog::list(&store, "unknown", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn purge_discards_the_whole_history() {
        let store = MemoryStore::new();
        store
            .append(
                "A1",
                TransactionKind::Deposit,
                &BigDecimal::from(5),
                &BigDecimal::from(5),
                None,
            )
            .await
            .unwrap();

        store.purge("A1").await.unwrap();
        assert!(TransactionLog::list(&store, "A1", 10).await.unwrap().is_empty());

        // purging an account with no history is a no-op
        store.purge("A1").await.unwrap();
    }
}
