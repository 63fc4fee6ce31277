//! # Banking Core
//!
//! A banking ledger library maintaining monetary account balances and an
//! immutable per-account transaction history. Every balance mutation is
//! atomic and auditable: the stored balance never disagrees with the sum of
//! the account's transaction log.
//!
//! ## Features
//!
//! - **Account lifecycle**: open, inspect, retype, and delete accounts with
//!   cascading removal of their history
//! - **Atomic balance mutations**: deposits, withdrawals, and two-account
//!   transfers commit through compare-and-swap with bounded retries
//! - **Audit trail**: an append-only transaction log with per-account
//!   sequence numbers and post-mutation balance snapshots
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   account and transaction stores
//!
//! ## Quick Start
//!
//! ```rust
//! use banking_core::{AccountType, Ledger, MemoryStore};
//! use bigdecimal::BigDecimal;
//! use uuid::Uuid;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), banking_core::LedgerError> {
//! let ledger = Ledger::new(MemoryStore::new());
//!
//! ledger
//!     .open_account(
//!         "ACC1".to_string(),
//!         AccountType::Checking,
//!         Uuid::new_v4(),
//!         BigDecimal::from(0),
//!     )
//!     .await?;
//! ledger.deposit("ACC1", BigDecimal::from(100), None).await?;
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::*;
pub use traits::*;
pub use types::*;
pub use utils::memory_store::MemoryStore;
