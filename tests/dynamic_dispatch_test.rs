use mintpay::domain::account::PlayerId;
use mintpay::domain::amount::{Amount, Balance};
use mintpay::domain::currency::{Currency, CurrencyId};
use mintpay::domain::grant::AuditContext;
use mintpay::domain::ports::{CurrencyRegistryBox, LedgerBox};
use mintpay::infrastructure::in_memory::{InMemoryCurrencyRegistry, InMemoryLedger};
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_ports_as_trait_objects() {
    let ledger: LedgerBox = Box::new(InMemoryLedger::new());
    let registry: CurrencyRegistryBox = Box::new(InMemoryCurrencyRegistry::with_defaults());

    // Verify Send + Sync by spawning tasks
    let ledger_handle = tokio::spawn(async move {
        let ctx = AuditContext::new("ops");
        let currency = Currency::new("dollar", "$");
        ledger
            .credit(PlayerId(1), &currency, Amount::parse("100").unwrap(), &ctx)
            .await
            .unwrap();
        ledger.balance(PlayerId(1), &currency.id).await.unwrap()
    });

    let registry_handle = tokio::spawn(async move {
        registry
            .lookup(&CurrencyId::from_user_input("gold"))
            .await
            .unwrap()
    });

    let balance = ledger_handle.await.unwrap();
    assert_eq!(balance, Some(Balance::new(dec!(100.00))));

    let currency = registry_handle.await.unwrap();
    assert_eq!(currency.unwrap().name, "gold");
}
