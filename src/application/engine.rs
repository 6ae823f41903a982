use crate::application::notifier::Notifier;
use crate::domain::account::{Actor, BalanceEntry, Recipient};
use crate::domain::amount::Amount;
use crate::domain::currency::{Currency, CurrencyId};
use crate::domain::grant::{AuditContext, GrantReceipt};
use crate::domain::ports::{CurrencyRegistryBox, LedgerBox};
use crate::error::{GrantError, Result};
use tracing::info;

/// The main entry point for administrative grants.
///
/// `GrantEngine` reconciles amount parsing, currency resolution, the single
/// atomic ledger credit, and notification dispatch for one invocation at a
/// time. Collaborators are injected at construction.
pub struct GrantEngine {
    ledger: LedgerBox,
    currencies: CurrencyRegistryBox,
    notifier: Notifier,
}

impl GrantEngine {
    /// Creates a new `GrantEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `ledger` - The system of record for balances.
    /// * `currencies` - The currency registry.
    /// * `notifier` - The notification dispatcher.
    pub fn new(ledger: LedgerBox, currencies: CurrencyRegistryBox, notifier: Notifier) -> Self {
        Self {
            ledger,
            currencies,
            notifier,
        }
    }

    /// Credits (or, with a signed amount, debits) `recipient` by
    /// administrative fiat. No other account is touched.
    ///
    /// Fails with `InvalidAmount` before any lookup, `UnknownCurrency`
    /// before any mutation, and `TransactionFailed` before any
    /// notification; messages go out if and only if the ledger confirmed
    /// the credit.
    pub async fn grant(
        &self,
        actor: &Actor,
        recipient: &Recipient,
        raw_amount: &str,
        currency_name: Option<&str>,
    ) -> Result<GrantReceipt> {
        let amount = Amount::parse(raw_amount)?;
        let currency = self.resolve_currency(currency_name).await?;

        let ctx = AuditContext::new(&actor.name);
        let status = self
            .ledger
            .credit(recipient.id, &currency, amount, &ctx)
            .await?;
        if !status.is_success() {
            return Err(GrantError::TransactionFailed);
        }

        info!(
            player = %recipient.id,
            currency = %currency.id,
            amount = %amount.value(),
            initiator = %actor.name,
            "grant applied"
        );

        let receipt = GrantReceipt { currency, amount };
        self.notifier
            .dispatch(actor, recipient, raw_amount, &receipt)
            .await;
        Ok(receipt)
    }

    async fn resolve_currency(&self, name: Option<&str>) -> Result<Currency> {
        match name {
            Some(name) => {
                let id = CurrencyId::from_user_input(name);
                self.currencies
                    .lookup(&id)
                    .await?
                    .ok_or_else(|| GrantError::UnknownCurrency(name.to_string()))
            }
            None => self.currencies.default_currency().await,
        }
    }

    /// Consumes the engine and returns the ledger's final balance snapshot.
    pub async fn into_report(self) -> Result<Vec<BalanceEntry>> {
        self.ledger.balances().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::PlayerId;
    use crate::domain::amount::Balance;
    use crate::domain::ports::Ledger;
    use crate::infrastructure::catalog::StaticMessageCatalog;
    use crate::infrastructure::in_memory::{
        InMemoryCurrencyRegistry, InMemoryLedger, RecordingMessenger,
    };
    use rust_decimal_macros::dec;

    fn build_engine() -> (GrantEngine, InMemoryLedger, RecordingMessenger) {
        let ledger = InMemoryLedger::new();
        let messenger = RecordingMessenger::new();
        let engine = GrantEngine::new(
            Box::new(ledger.clone()),
            Box::new(InMemoryCurrencyRegistry::with_defaults()),
            Notifier::new(
                Box::new(StaticMessageCatalog::default()),
                Box::new(messenger.clone()),
            ),
        );
        (engine, ledger, messenger)
    }

    #[tokio::test]
    async fn test_grant_falls_back_to_default_currency() {
        let (engine, ledger, _) = build_engine();
        let actor = Actor::named("console");
        let recipient = Recipient::new(PlayerId(1), "Alice");

        let receipt = engine.grant(&actor, &recipient, "10", None).await.unwrap();
        assert_eq!(receipt.currency.id, CurrencyId::from_user_input("dollar"));

        let balance = ledger
            .balance(PlayerId(1), &CurrencyId::from_user_input("dollar"))
            .await
            .unwrap();
        assert_eq!(balance, Some(Balance::new(dec!(10.00))));
    }

    #[tokio::test]
    async fn test_grant_resolves_currency_case_insensitively() {
        let (engine, ledger, _) = build_engine();
        let actor = Actor::named("console");
        let recipient = Recipient::new(PlayerId(1), "Alice");

        engine
            .grant(&actor, &recipient, "25.509", Some("GOLD"))
            .await
            .unwrap();

        // Normalization truncates the extra digit.
        let balance = ledger
            .balance(PlayerId(1), &CurrencyId::from_user_input("gold"))
            .await
            .unwrap();
        assert_eq!(balance, Some(Balance::new(dec!(25.50))));
    }

    #[tokio::test]
    async fn test_unknown_currency_attempts_no_mutation() {
        let (engine, ledger, messenger) = build_engine();
        let actor = Actor::named("console");
        let recipient = Recipient::new(PlayerId(1), "Alice");

        let result = engine
            .grant(&actor, &recipient, "10", Some("emeralds"))
            .await;
        assert!(matches!(result, Err(GrantError::UnknownCurrency(_))));
        assert!(ledger.journal().await.is_empty());
        assert!(messenger.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_amount_attempts_no_mutation() {
        let (engine, ledger, messenger) = build_engine();
        let actor = Actor::named("console");
        let recipient = Recipient::new(PlayerId(1), "Alice");

        let result = engine.grant(&actor, &recipient, "1.2.3", None).await;
        assert!(matches!(result, Err(GrantError::InvalidAmount(_))));
        assert!(ledger.journal().await.is_empty());
        assert!(messenger.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_ledger_rejection_sends_no_messages() {
        let (engine, ledger, messenger) = build_engine();
        ledger.freeze(PlayerId(1)).await;
        let actor = Actor::named("console");
        let recipient = Recipient::new(PlayerId(1), "Alice");

        let result = engine.grant(&actor, &recipient, "10", None).await;
        assert!(matches!(result, Err(GrantError::TransactionFailed)));
        assert!(messenger.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_journal_attributes_initiator() {
        let (engine, ledger, _) = build_engine();
        let actor = Actor::named("ops");
        let recipient = Recipient::new(PlayerId(9), "Bob");

        engine.grant(&actor, &recipient, "5", None).await.unwrap();

        let journal = ledger.journal().await;
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].player, PlayerId(9));
        assert_eq!(journal[0].initiator, "ops");
    }
}
