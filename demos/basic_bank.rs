//! Basic banking ledger usage example

use banking_core::{AccountType, Ledger, MemoryStore};
use bigdecimal::BigDecimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Banking Core - Basic Ledger Example\n");

    // Create a new ledger with in-memory storage
    let ledger = Ledger::new(MemoryStore::new());
    let owner = Uuid::new_v4();

    // 1. Open a couple of accounts
    println!("📂 Opening accounts...");
    let checking = ledger
        .open_account(
            "CHK-001".to_string(),
            AccountType::Checking,
            owner,
            BigDecimal::from(0),
        )
        .await?;
    println!(
        "  ✓ Opened {} ({:?}) with balance {}",
        checking.number, checking.account_type, checking.balance
    );

    let savings = ledger
        .open_account(
            "SAV-001".to_string(),
            AccountType::Savings,
            owner,
            BigDecimal::from(500),
        )
        .await?;
    println!(
        "  ✓ Opened {} ({:?}) with balance {}\n",
        savings.number, savings.account_type, savings.balance
    );

    // 2. Move some money around
    println!("💰 Recording transactions...");
    let deposit = ledger
        .deposit(
            "CHK-001",
            BigDecimal::from(1200),
            Some("Salary".to_string()),
        )
        .await?;
    println!(
        "  ✓ Deposit #{} of 1200, balance now {}",
        deposit.sequence, deposit.balance_after
    );

    let withdrawal = ledger
        .withdraw("CHK-001", BigDecimal::from(300), Some("Rent".to_string()))
        .await?;
    println!(
        "  ✓ Withdrawal #{} of 300, balance now {}",
        withdrawal.sequence, withdrawal.balance_after
    );

    let (debit, credit) = ledger
        .transfer(
            "CHK-001",
            "SAV-001",
            BigDecimal::from(400),
            Some("Monthly savings".to_string()),
        )
        .await?;
    println!(
        "  ✓ Transfer of 400: {} now {}, {} now {}\n",
        debit.account_number, debit.balance_after, credit.account_number, credit.balance_after
    );

    // A withdrawal beyond the balance fails without touching the account
    if let Err(err) = ledger.withdraw("CHK-001", BigDecimal::from(9999), None).await {
        println!("  ✗ Oversized withdrawal rejected: {err}\n");
    }

    // 3. Inspect the audit trail
    println!("🧾 Recent transactions for CHK-001:");
    for tx in ledger.get_transactions("CHK-001", 10).await? {
        println!(
            "  #{} {:?} {} → balance {} ({})",
            tx.sequence,
            tx.kind,
            tx.amount,
            tx.balance_after,
            tx.description.as_deref().unwrap_or("-")
        );
    }

    println!("\n📊 All accounts:");
    for account in ledger.list_accounts().await? {
        println!(
            "  {} ({:?}): {}",
            account.number, account.account_type, account.balance
        );
    }

    Ok(())
}
