//! Account lifecycle operations

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::traits::AccountStore;
use crate::types::*;
use crate::utils::validation;

/// Manager for account lifecycle operations against an [`AccountStore`]
pub struct AccountManager<S: AccountStore> {
    pub(crate) store: S,
}

impl<S: AccountStore> AccountManager<S> {
    /// Create a new account manager
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Open a new account with the given opening balance
    ///
    /// The opening balance is not recorded as a transaction; the account's
    /// history starts empty and the balance invariant is measured relative
    /// to this opening value.
    pub async fn open_account(
        &self,
        number: String,
        account_type: AccountType,
        owner_id: Uuid,
        opening_balance: BigDecimal,
    ) -> LedgerResult<Account> {
        validation::validate_account_number(&number)?;

        if opening_balance < BigDecimal::from(0) {
            return Err(LedgerError::InvalidAmount);
        }

        let account = Account::new(number, account_type, owner_id, opening_balance);
        self.store.create(&account).await?;

        Ok(account)
    }

    /// Get an account by number
    pub async fn get_account(&self, number: &str) -> LedgerResult<Option<Account>> {
        self.store.get(number).await
    }

    /// Get an account by number, returning an error if not found
    pub async fn get_account_required(&self, number: &str) -> LedgerResult<Account> {
        self.store
            .get(number)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.store.list().await
    }

    /// Change the type tag of an existing account
    pub async fn update_account_type(
        &self,
        number: &str,
        account_type: AccountType,
    ) -> LedgerResult<()> {
        self.store.update_type(number, account_type).await
    }

    /// Remove the account record itself. Cascading removal of the
    /// transaction history is the ledger service's responsibility.
    pub(crate) async fn delete_account(&self, number: &str) -> LedgerResult<()> {
        self.store.delete(number).await
    }

    /// Conditionally commit a new balance via the store's compare-and-swap
    pub(crate) async fn swap_balance(
        &self,
        number: &str,
        expected: &BigDecimal,
        new: &BigDecimal,
    ) -> LedgerResult<bool> {
        self.store.compare_and_swap_balance(number, expected, new).await
    }
}
