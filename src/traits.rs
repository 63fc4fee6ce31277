//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::types::*;

/// Keyed storage of account records
///
/// This trait allows the banking core to work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these
/// methods. Implementations must enforce uniqueness of account numbers and
/// are expected to use interior mutability so a single instance can be
/// shared across concurrent callers.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account; fails with `DuplicateAccountNumber` if the
    /// account number is already taken. The uniqueness check and the insert
    /// must happen atomically.
    async fn create(&self, account: &Account) -> LedgerResult<()>;

    /// Get an account by number
    async fn get(&self, number: &str) -> LedgerResult<Option<Account>>;

    /// List all accounts, in unspecified order
    async fn list(&self) -> LedgerResult<Vec<Account>>;

    /// Change the type tag of an existing account
    async fn update_type(&self, number: &str, account_type: AccountType) -> LedgerResult<()>;

    /// Remove an account record; fails with `AccountNotFound` if absent
    async fn delete(&self, number: &str) -> LedgerResult<()>;

    /// Conditionally write a new balance. Succeeds (returns `true`) only if
    /// the stored balance still equals `expected` at write time; returns
    /// `false` when another writer committed first. This is the primitive
    /// the ledger service builds its race-free balance updates on.
    async fn compare_and_swap_balance(
        &self,
        number: &str,
        expected: &BigDecimal,
        new: &BigDecimal,
    ) -> LedgerResult<bool>;
}

/// Append-only per-account sequence of immutable transaction records
#[async_trait]
pub trait TransactionLog: Send + Sync {
    /// Append a transaction for the account, assigning the next sequence
    /// number. Existing entries are never mutated or removed.
    async fn append(
        &self,
        account_number: &str,
        kind: TransactionKind,
        amount: &BigDecimal,
        balance_after: &BigDecimal,
        description: Option<String>,
    ) -> LedgerResult<Transaction>;

    /// List up to `take` transactions for the account, most recent first
    /// (timestamp descending, sequence number as tiebreaker). The result is
    /// a finite snapshot of the log at call time.
    async fn list(&self, account_number: &str, take: usize) -> LedgerResult<Vec<Transaction>>;

    /// Remove every transaction owned by the account. Only used by the
    /// ledger service when an account is deleted (cascade).
    async fn purge(&self, account_number: &str) -> LedgerResult<()>;
}
