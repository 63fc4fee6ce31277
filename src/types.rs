//! Core types and data structures for the banking ledger

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of bank accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Everyday transactional account
    Checking,
    /// Interest-bearing savings account
    Savings,
}

impl AccountType {
    /// Stable numeric tag for stores that persist account types as integers
    pub fn code(&self) -> u8 {
        match self {
            AccountType::Checking => 0,
            AccountType::Savings => 1,
        }
    }

    /// Resolve an account type from its numeric tag
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AccountType::Checking),
            1 => Some(AccountType::Savings),
            _ => None,
        }
    }
}

/// A balance-holding account identified by its unique account number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account number
    pub number: String,
    /// Type of account (Checking or Savings)
    pub account_type: AccountType,
    /// Current balance
    pub balance: BigDecimal,
    /// Opaque reference to the owning user; never interpreted by the core
    pub owner_id: Uuid,
    /// When the account was opened
    pub created_at: NaiveDateTime,
    /// When the account was last updated
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Create a new account record with the given opening balance
    pub fn new(
        number: String,
        account_type: AccountType,
        owner_id: Uuid,
        opening_balance: BigDecimal,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            number,
            account_type,
            balance: opening_balance,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Kinds of balance mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Funds added to the account
    Deposit,
    /// Funds removed from the account
    Withdrawal,
}

/// An immutable record of one balance mutation
///
/// Transactions are created exactly once per successful mutating ledger
/// operation and are never updated or deleted individually. The only way a
/// transaction leaves storage is the cascading delete of its account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Monotonically increasing sequence number, unique per account
    pub sequence: u64,
    /// Number of the owning account
    pub account_number: String,
    /// When the mutation was committed
    pub timestamp: NaiveDateTime,
    /// Deposit or withdrawal
    pub kind: TransactionKind,
    /// Positive magnitude of the mutation
    pub amount: BigDecimal,
    /// Balance snapshot after the mutation, kept for audit
    pub balance_after: BigDecimal,
    /// Optional free-text comment
    pub description: Option<String>,
}

impl Transaction {
    /// Amount with the sign implied by the kind: deposits are positive,
    /// withdrawals negative. Summing signed amounts in sequence order from
    /// the opening balance reproduces every `balance_after` snapshot.
    pub fn signed_amount(&self) -> BigDecimal {
        match self.kind {
            TransactionKind::Deposit => self.amount.clone(),
            TransactionKind::Withdrawal => -self.amount.clone(),
        }
    }
}

/// Errors that can occur in the ledger system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error("account not found: {0}")]
    AccountNotFound(String),
    #[error("insufficient funds in account {0}")]
    InsufficientFunds(String),
    #[error("account number already exists: {0}")]
    DuplicateAccountNumber(String),
    #[error("balance update conflict on account {0}, retry budget exhausted")]
    ConcurrencyConflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
